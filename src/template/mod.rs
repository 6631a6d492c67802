//! Templating code.
//!
//! This defines the [`Page`] shell used by the admin pages of the demo
//! server. Icon fonts are not registered behind the scenes: whoever builds
//! the page links the icon provider's stylesheet through
//! [`Page::icon_stylesheet`].

use hypertext::prelude::*;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

pub struct Page<R1: Renderable> {
    title: String,
    body: Option<R1>,
    stylesheets: Vec<String>,
}

impl<R1: Renderable> Page<R1> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn body(mut self, body: R1) -> Self {
        self.body = Some(body);
        self
    }

    /// Links `href` once, however often it is passed.
    pub fn icon_stylesheet(mut self, href: Option<&str>) -> Self {
        match href {
            Some(href) if !self.stylesheets.iter().any(|s| s == href) => {
                self.stylesheets.push(href.to_string());
            }
            _ => (),
        }
        self
    }
}

impl<R1: Renderable> Renderable for Page<R1> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            html {
                head {
                    title { (self.title) }
                    link href=(BOOTSTRAP_CSS) rel="stylesheet";
                    @for href in &self.stylesheets {
                        link href=(href) rel="stylesheet";
                    }
                    meta
                        name="viewport"
                        content="width=device-width, initial-scale=1";
                }
                body class="d-flex flex-column vh-100" {
                    nav class="navbar navbar-expand"
                        style="background-color: #452859;"
                        data-bs-theme="dark" {
                        div class="container-fluid" {
                            a class="navbar-brand text-white" href="/" {
                                "Admin"
                            }
                        }
                    }
                    div class="container flex-grow-1 mt-3" {
                        @if let Some(body) = &self.body {
                            (body)
                        }
                    }
                }
            }
        }.render_to(buffer)
    }
}

impl<R1: Renderable> Default for Page<R1> {
    fn default() -> Self {
        Self {
            title: "Admin".to_string(),
            body: Default::default(),
            stylesheets: Default::default(),
        }
    }
}
