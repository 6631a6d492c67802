//! The action column: a group of Bootstrap buttons (edit, delete, ...) shown
//! in every row of an admin grid.

use hypertext::{
    Buffer,
    context::{AttributeValue, Node},
    prelude::*,
};
use indexmap::{IndexMap, IndexSet};

use crate::{
    button::{
        ButtonSource, ButtonSpec, PartialButtonSpec, configure, default_buttons,
        is_valid_attribute_name, validate_options,
    },
    context::RowContext,
    error::ConfigError,
    host::{CATEGORY, CurrentRequest, Host},
    route::RouteParams,
};

/// Name of the button which gets the confirmation dialog attributes.
pub const DELETE_BUTTON: &str = "delete";

/// Placed between the icon and the text of a button.
pub const LABEL_SEPARATOR: &str = "&nbsp;";

/// A button ready to be written out as a link.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedButton {
    pub name: String,
    pub href: String,
    /// Link content (icon markup and escaped text).
    pub label: String,
    pub css_classes: IndexSet<String>,
    /// Every attribute but `href` (`class` and `title` are included).
    pub html_attributes: IndexMap<String, String>,
}

impl RenderedButton {
    pub fn to_html(&self) -> String {
        self.render().into_inner()
    }
}

impl Renderable for RenderedButton {
    fn render_to(&self, buffer: &mut Buffer<Node>) {
        // XSS SAFETY: attribute names are checked by `render_button` and
        // values go through hypertext's attribute escaping. The label is
        // icon markup plus escaped text.
        buffer.dangerously_get_string().push_str(r#"<a href=""#);
        Renderable::<AttributeValue>::render_to(
            &self.href,
            buffer.as_attribute_buffer(),
        );
        buffer.dangerously_get_string().push('"');
        for (name, value) in &self.html_attributes {
            if !is_valid_attribute_name(name) {
                continue;
            }
            let out = buffer.dangerously_get_string();
            out.push(' ');
            out.push_str(name);
            out.push_str(r#"=""#);
            Renderable::<AttributeValue>::render_to(
                value,
                buffer.as_attribute_buffer(),
            );
            buffer.dangerously_get_string().push('"');
        }
        let out = buffer.dangerously_get_string();
        out.push('>');
        out.push_str(&self.label);
        out.push_str("</a>");
    }
}

/// Column of per-row action buttons.
///
/// Cloning is cheap (the collaborators are shared), which is how a
/// request-scoped copy is made with [`ActionColumn::for_request`].
#[derive(Clone)]
pub struct ActionColumn {
    buttons: ButtonSource,
    /// Whether buttons add `returnUrl` unless they say otherwise.
    pub append_return_url: bool,
    pub button_size_class: String,
    /// Params appended to every button's URL unless it sets `url_append`.
    pub append_url_params: IndexMap<String, String>,
    host: Host,
}

impl ActionColumn {
    /// A column with the default edit and delete buttons.
    pub fn new(host: Host) -> Self {
        Self {
            buttons: ButtonSource::Static(default_buttons(&*host.translator)),
            append_return_url: true,
            button_size_class: "btn-sm".to_string(),
            append_url_params: IndexMap::new(),
            host,
        }
    }

    /// Replaces the buttons. An empty static set keeps the defaults.
    pub fn buttons(mut self, buttons: impl Into<ButtonSource>) -> Self {
        match buttons.into() {
            ButtonSource::Static(set) if set.is_empty() => {
                self.buttons =
                    ButtonSource::Static(default_buttons(&*self.host.translator));
            }
            source => self.buttons = source,
        }
        self
    }

    /// Uses the default buttons with `overrides` merged on top.
    pub fn overrides(
        mut self,
        overrides: &IndexMap<String, PartialButtonSpec>,
    ) -> Result<Self, ConfigError> {
        let defaults = default_buttons(&*self.host.translator);
        self.buttons = ButtonSource::Static(configure(&defaults, overrides)?);
        Ok(self)
    }

    pub fn append_return_url(mut self, append: bool) -> Self {
        self.append_return_url = append;
        self
    }

    pub fn button_size_class(mut self, class: &str) -> Self {
        self.button_size_class = class.to_string();
        self
    }

    pub fn append_url_params(mut self, params: IndexMap<String, String>) -> Self {
        self.append_url_params = params;
        self
    }

    /// A copy of this column which takes `returnUrl` from `request`.
    pub fn for_request(&self, request: impl CurrentRequest + 'static) -> Self {
        let mut column = self.clone();
        column.host = column.host.request(request);
        column
    }

    pub fn button_source(&self) -> &ButtonSource {
        &self.buttons
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Builds the URL of one button for one row.
    pub fn build_url(
        &self,
        route: &str,
        ctx: &RowContext<'_>,
        append_return_url: bool,
        extra: &IndexMap<String, String>,
        key_param: Option<&str>,
        attrs: &[String],
    ) -> Result<String, ConfigError> {
        let return_url =
            append_return_url.then(|| self.host.request.current_url());
        let params =
            RouteParams::for_row(route, ctx, return_url, extra, key_param, attrs)?;
        self.host.router.to_route(&params)
    }

    /// Renders this column's buttons for one row.
    pub fn render_row(
        &self,
        ctx: &RowContext<'_>,
    ) -> Result<Vec<RenderedButton>, ConfigError> {
        self.render_buttons(ctx, &self.buttons)
    }

    /// Renders `source` for one row, in declaration order. The first failing
    /// button fails the whole row.
    #[tracing::instrument(skip_all, fields(row = ctx.index, key = %ctx.key))]
    pub fn render_buttons(
        &self,
        ctx: &RowContext<'_>,
        source: &ButtonSource,
    ) -> Result<Vec<RenderedButton>, ConfigError> {
        let buttons = source.resolve(ctx);
        tracing::debug!("Rendering {} buttons", buttons.len());
        buttons
            .iter()
            .map(|(name, button)| self.render_button(ctx, name, button))
            .collect()
    }

    fn render_button(
        &self,
        ctx: &RowContext<'_>,
        name: &str,
        button: &ButtonSpec,
    ) -> Result<RenderedButton, ConfigError> {
        validate_options(name, &button.options)?;

        let mut attributes = if name == DELETE_BUTTON
            && button.options.get("data-action").map(String::as_str)
                == Some("delete")
        {
            let mut confirm = self.confirm_dialog();
            for (attr, value) in &button.options {
                confirm.insert(attr.clone(), value.clone());
            }
            confirm
        } else {
            button.options.clone()
        };

        let append_return_url =
            button.append_return_url.unwrap_or(self.append_return_url);
        let url_append = button
            .url_append
            .as_ref()
            .unwrap_or(&self.append_url_params);

        let mut css_classes = IndexSet::new();
        for class in button
            .class
            .split_whitespace()
            .chain(["btn"])
            .chain(self.button_size_class.split_whitespace())
        {
            css_classes.insert(class.to_string());
        }

        let label = self.compose_label(button);

        let href = self.build_url(
            &button.url,
            ctx,
            append_return_url,
            url_append,
            button.key_param.as_deref(),
            &button.attrs,
        )?;
        tracing::debug!(button = name, href = %href, "Built button url");

        attributes.insert(
            "class".to_string(),
            css_classes.iter().cloned().collect::<Vec<_>>().join(" "),
        );
        attributes.insert("title".to_string(), button.label.clone());

        Ok(RenderedButton {
            name: name.to_string(),
            href,
            label,
            css_classes,
            html_attributes: attributes,
        })
    }

    fn confirm_dialog(&self) -> IndexMap<String, String> {
        let t = |message: &str| self.host.translator.translate(CATEGORY, message);
        IndexMap::from([
            ("data-title".to_string(), t("Delete")),
            ("data-close".to_string(), t("Close")),
            (
                "data-text".to_string(),
                t("Are you sure you want to delete this item?"),
            ),
        ])
    }

    fn compose_label(&self, button: &ButtonSpec) -> String {
        let icon = button
            .icon
            .as_deref()
            .map(|icon| self.host.icons.render(icon))
            .unwrap_or_default();
        let text = button
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| maud! { (text) }.render().into_inner());

        match text {
            Some(text) if icon.is_empty() => text,
            Some(text) => format!("{icon}{LABEL_SEPARATOR}{text}"),
            None => icon,
        }
    }
}

/// The `btn-group` cell holding a row's buttons.
pub struct ButtonGroup<'r> {
    pub buttons: &'r [RenderedButton],
}

impl<'r> Renderable for ButtonGroup<'r> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            div class="btn-group" {
                @for button in self.buttons {
                    (button)
                    " "
                }
            }
        }
        .render_to(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        button::ButtonSet,
        context::RowModel,
        host::{MessageCatalog, StaticRequest},
        route::PathRouter,
    };

    struct Article {
        slug: &'static str,
        protected: bool,
    }

    impl RowModel for Article {
        fn attribute(&self, name: &str) -> Option<String> {
            match name {
                "slug" => Some(self.slug.to_string()),
                "protected" => Some(self.protected.to_string()),
                _ => None,
            }
        }

        fn route_value(&self) -> String {
            self.slug.to_string()
        }
    }

    const ARTICLE: Article = Article {
        slug: "hello",
        protected: false,
    };

    fn column() -> ActionColumn {
        let host = Host::new(PathRouter::new("/admin/articles").unwrap())
            .request(StaticRequest("/admin/articles?page=2".to_string()));
        ActionColumn::new(host)
    }

    #[test]
    fn default_buttons_render() {
        let ctx = RowContext::new(&ARTICLE, "42", 0);
        let buttons = column().render_row(&ctx).unwrap();

        assert_eq!(buttons.len(), 2);
        let edit = &buttons[0];
        assert_eq!(edit.name, "edit");
        assert_eq!(
            edit.href,
            "/admin/articles/edit?id=42&returnUrl=%2Fadmin%2Farticles%3Fpage%3D2"
        );
        assert_eq!(
            edit.css_classes.iter().collect::<Vec<_>>(),
            vec!["btn-primary", "btn", "btn-sm"]
        );
        assert_eq!(edit.html_attributes["class"], "btn-primary btn btn-sm");
        assert_eq!(edit.html_attributes["title"], "Edit");
        assert_eq!(edit.label, r#"<i class="fa fa-pencil"></i>"#);
    }

    #[test]
    fn delete_gets_confirm_dialog() {
        let ctx = RowContext::new(&ARTICLE, "42", 0);
        let buttons = column().render_row(&ctx).unwrap();

        let delete = &buttons[1];
        assert_eq!(
            delete.html_attributes.keys().collect::<Vec<_>>(),
            vec![
                "data-title",
                "data-close",
                "data-text",
                "data-action",
                "class",
                "title"
            ]
        );
        assert_eq!(delete.html_attributes["data-title"], "Delete");
        assert_eq!(delete.html_attributes["data-close"], "Close");
        assert_eq!(
            delete.html_attributes["data-text"],
            "Are you sure you want to delete this item?"
        );
    }

    #[test]
    fn caller_confirm_text_wins() {
        let overrides = IndexMap::from([(
            "delete".to_string(),
            PartialButtonSpec {
                options: IndexMap::from([(
                    "data-text".to_string(),
                    "Delete this article for good?".to_string(),
                )]),
                ..Default::default()
            },
        )]);
        let column = column().overrides(&overrides).unwrap();
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let buttons = column.render_row(&ctx).unwrap();

        let delete = &buttons[1];
        assert_eq!(
            delete.html_attributes["data-text"],
            "Delete this article for good?"
        );
        assert_eq!(delete.html_attributes["data-title"], "Delete");
    }

    #[test]
    fn confirm_dialog_only_for_delete_action() {
        let buttons = ButtonSet::from([(
            "delete".to_string(),
            ButtonSpec::new("delete", "btn-danger", "Delete")
                .option("data-method", "post"),
        )]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let rendered = column().buttons(buttons).render_row(&ctx).unwrap();
        assert!(!rendered[0].html_attributes.contains_key("data-text"));
    }

    #[test]
    fn confirm_dialog_is_translated() {
        let host = Host::new(PathRouter::new("/admin").unwrap()).translator(
            MessageCatalog::new()
                .insert("app", "Close", "Schließen")
                .insert("app", "Delete", "Löschen"),
        );
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let buttons = ActionColumn::new(host).render_row(&ctx).unwrap();
        assert_eq!(buttons[1].html_attributes["data-close"], "Schließen");
        assert_eq!(buttons[1].html_attributes["title"], "Löschen");
    }

    #[test]
    fn label_composition() {
        let buttons = ButtonSet::from([
            (
                "icon".to_string(),
                ButtonSpec::new("a", "btn-default", "Icon").icon("eye"),
            ),
            (
                "text".to_string(),
                ButtonSpec::new("b", "btn-default", "Text").text("View"),
            ),
            (
                "both".to_string(),
                ButtonSpec::new("c", "btn-default", "Both")
                    .icon("eye")
                    .text("View & print"),
            ),
        ]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let rendered = column().buttons(buttons).render_row(&ctx).unwrap();

        assert_eq!(rendered[0].label, r#"<i class="fa fa-eye"></i>"#);
        assert_eq!(rendered[1].label, "View");
        assert_eq!(
            rendered[2].label,
            r#"<i class="fa fa-eye"></i>&nbsp;View &amp; print"#
        );
    }

    #[test]
    fn declaration_order_is_kept() {
        let buttons = ButtonSet::from([
            ("zeta".to_string(), ButtonSpec::new("z", "btn-default", "Z")),
            ("alpha".to_string(), ButtonSpec::new("a", "btn-default", "A")),
            ("mu".to_string(), ButtonSpec::new("m", "btn-default", "M")),
        ]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let rendered = column().buttons(buttons).render_row(&ctx).unwrap();
        assert_eq!(
            rendered.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mu"]
        );
    }

    #[test]
    fn empty_route_fails_the_row() {
        let buttons = ButtonSet::from([
            ("ok".to_string(), ButtonSpec::new("view", "btn-default", "View")),
            ("broken".to_string(), ButtonSpec::new("", "btn-default", "Broken")),
        ]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let result = column().buttons(buttons).render_row(&ctx);
        assert!(matches!(result, Err(ConfigError::EmptyRoute)));
    }

    #[test]
    fn computed_buttons_per_row() {
        let column = column().buttons(ButtonSource::computed(|ctx| {
            let mut buttons = default_buttons(&MessageCatalog::new());
            if ctx.model.attribute("protected").as_deref() == Some("true") {
                buttons.shift_remove("delete");
            }
            buttons
        }));

        let protected = Article {
            slug: "about",
            protected: true,
        };
        let rows = [
            RowContext::new(&ARTICLE, "1", 0),
            RowContext::new(&protected, "2", 1),
        ];
        let counts = rows
            .iter()
            .map(|ctx| column.render_row(ctx).unwrap().len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn column_and_button_url_settings() {
        let buttons = ButtonSet::from([
            (
                "inherit".to_string(),
                ButtonSpec::new("view", "btn-default", "View"),
            ),
            (
                "own".to_string(),
                ButtonSpec::new("preview", "btn-default", "Preview")
                    .append_return_url(true)
                    .url_append(IndexMap::from([(
                        "draft".to_string(),
                        "1".to_string(),
                    )]))
                    .key_param(Some("article"))
                    .attrs(&["slug"]),
            ),
        ]);
        let column = column()
            .buttons(buttons)
            .append_return_url(false)
            .button_size_class("btn-xs")
            .append_url_params(IndexMap::from([(
                "lang".to_string(),
                "en".to_string(),
            )]));
        let ctx = RowContext::new(&ARTICLE, "9", 0);
        let rendered = column.render_row(&ctx).unwrap();

        assert_eq!(rendered[0].href, "/admin/articles/view?id=9&lang=en");
        assert_eq!(
            rendered[1].href,
            "/admin/articles/preview?article=9&slug=hello&draft=1&returnUrl=%2Fadmin%2Farticles%3Fpage%3D2"
        );
        assert!(rendered[0].css_classes.contains("btn-xs"));
    }

    #[test]
    fn empty_static_set_keeps_defaults() {
        let column = column().buttons(ButtonSet::new());
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        assert_eq!(column.render_row(&ctx).unwrap().len(), 2);
    }

    #[test]
    fn button_group_markup() {
        let ctx = RowContext::new(&ARTICLE, "3", 0);
        let column = column().append_return_url(false);
        let buttons = column.render_row(&ctx).unwrap();
        let html = ButtonGroup { buttons: &buttons }.render().into_inner();

        assert!(html.starts_with(r#"<div class="btn-group">"#));
        assert!(html.contains(
            r#"<a href="/admin/articles/edit?id=3" class="btn-primary btn btn-sm" title="Edit"><i class="fa fa-pencil"></i></a>"#
        ));
        assert!(html.contains(r#"data-action="delete""#));
    }

    #[test]
    fn unsafe_option_name_fails_the_row() {
        let buttons = ButtonSet::from([(
            "view".to_string(),
            ButtonSpec::new("view", "btn-default", "View")
                .option(r#"data-x="1"><script>alert(1)</script><b x"#, "1"),
        )]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let result = column().buttons(buttons).render_row(&ctx);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidAttributeName { button, .. }) if button == "view"
        ));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let buttons = ButtonSet::from([(
            "view".to_string(),
            ButtonSpec::new("view", "btn-default", r#""><script>alert(1)</script>"#)
                .option("data-text", "a & b"),
        )]);
        let ctx = RowContext::new(&ARTICLE, "1", 0);
        let rendered = column()
            .buttons(buttons)
            .append_return_url(false)
            .render_row(&ctx)
            .unwrap();
        let html = ButtonGroup { buttons: &rendered }.render().into_inner();

        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"data-text="a &amp; b""#));
        assert!(html.contains(r#"title="&quot;&gt;&lt;script&gt;"#));
    }

    #[test]
    fn hand_built_button_drops_bad_names() {
        let button = RenderedButton {
            name: "x".to_string(),
            href: "/x".to_string(),
            label: "X".to_string(),
            css_classes: IndexSet::new(),
            html_attributes: IndexMap::from([
                ("data-ok".to_string(), "1".to_string()),
                ("on<b>".to_string(), "2".to_string()),
            ]),
        };
        assert_eq!(button.to_html(), r#"<a href="/x" data-ok="1">X</a>"#);
    }
}
