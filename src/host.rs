//! Collaborators supplied by the application hosting the grid.
//!
//! The action column never reaches for global state: the current request,
//! translations and icon markup are all handed to it through these traits.
//! Each comes with a small default implementation which is good enough for
//! the demo server and for tests.

use std::{collections::HashMap, sync::Arc};

use hypertext::prelude::*;
use serde::Deserialize;

use crate::route::Router;

/// Translation category used for the built-in button labels.
pub const CATEGORY: &str = "app";

pub trait Translator: Send + Sync {
    fn translate(&self, category: &str, message: &str) -> String;
}

pub trait CurrentRequest: Send + Sync {
    /// The URL of the page being rendered, used for `returnUrl`.
    fn current_url(&self) -> String;
}

pub trait IconProvider: Send + Sync {
    /// Markup for the named icon. An empty name renders nothing.
    fn render(&self, name: &str) -> String;

    /// Stylesheet the page has to link for the icons to show up.
    fn stylesheet(&self) -> Option<&str> {
        None
    }
}

/// Translations grouped by category, falling back to the source message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    categories: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(
        mut self,
        category: &str,
        message: &str,
        translation: &str,
    ) -> Self {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(message.to_string(), translation.to_string());
        self
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, category: &str, message: &str) -> String {
        self.categories
            .get(category)
            .and_then(|messages| messages.get(message))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}

/// A request whose URL is known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticRequest(pub String);

impl CurrentRequest for StaticRequest {
    fn current_url(&self) -> String {
        self.0.clone()
    }
}

/// Font Awesome 4 icons (`<i class="fa fa-NAME"></i>`).
#[derive(Debug, Clone)]
pub struct FontAwesome {
    pub stylesheet: String,
}

impl Default for FontAwesome {
    fn default() -> Self {
        Self {
            stylesheet: "https://cdn.jsdelivr.net/npm/font-awesome@4.7.0/css/font-awesome.min.css"
                .to_string(),
        }
    }
}

impl IconProvider for FontAwesome {
    fn render(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        maud! {
            i class=(format!("fa fa-{name}")) {}
        }
        .render()
        .into_inner()
    }

    fn stylesheet(&self) -> Option<&str> {
        Some(&self.stylesheet)
    }
}

/// The collaborators an action column renders with.
#[derive(Clone)]
pub struct Host {
    pub router: Arc<dyn Router>,
    pub request: Arc<dyn CurrentRequest>,
    pub translator: Arc<dyn Translator>,
    pub icons: Arc<dyn IconProvider>,
}

impl Host {
    /// A host with an empty current URL, untranslated messages and Font
    /// Awesome icons.
    pub fn new(router: impl Router + 'static) -> Self {
        Self {
            router: Arc::new(router),
            request: Arc::new(StaticRequest::default()),
            translator: Arc::new(MessageCatalog::new()),
            icons: Arc::new(FontAwesome::default()),
        }
    }

    pub fn request(mut self, request: impl CurrentRequest + 'static) -> Self {
        self.request = Arc::new(request);
        self
    }

    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn icons(mut self, icons: impl IconProvider + 'static) -> Self {
        self.icons = Arc::new(icons);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_falls_back_to_message() {
        let catalog = MessageCatalog::new().insert("app", "Edit", "Bearbeiten");
        assert_eq!(catalog.translate("app", "Edit"), "Bearbeiten");
        assert_eq!(catalog.translate("app", "Delete"), "Delete");
        assert_eq!(catalog.translate("other", "Edit"), "Edit");
    }

    #[test]
    fn font_awesome_markup() {
        let icons = FontAwesome::default();
        assert_eq!(icons.render("pencil"), r#"<i class="fa fa-pencil"></i>"#);
        assert_eq!(icons.render(""), "");
    }
}
