//! Declarative button configuration and the merge applied to it.

use std::{borrow::Cow, sync::Arc};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    context::RowContext,
    error::ConfigError,
    host::{CATEGORY, Translator},
};

/// Key param used when a button does not name one.
pub const DEFAULT_KEY_PARAM: &str = "id";

/// Buttons by name, in declaration (and therefore render) order.
pub type ButtonSet = IndexMap<String, ButtonSpec>;

/// One action button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    /// Route name handed to the router as position 0.
    pub url: String,
    pub icon: Option<String>,
    /// Bootstrap classes, e.g. `btn-primary`.
    pub class: String,
    /// Human label, rendered as the link's `title`.
    pub label: String,
    /// Visible text next to the icon.
    pub text: Option<String>,
    /// Extra HTML attributes for the link.
    pub options: IndexMap<String, String>,
    /// `None` inherits the column setting.
    pub append_return_url: Option<bool>,
    /// `None` inherits the column's `append_url_params`.
    pub url_append: Option<IndexMap<String, String>>,
    /// `None` leaves a scalar row key out of the route.
    pub key_param: Option<String>,
    /// Model attributes copied into the route (`"model"` binds the model).
    pub attrs: Vec<String>,
}

impl ButtonSpec {
    pub fn new(url: &str, class: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            icon: None,
            class: class.to_string(),
            label: label.to_string(),
            text: None,
            options: IndexMap::new(),
            append_return_url: None,
            url_append: None,
            key_param: Some(DEFAULT_KEY_PARAM.to_string()),
            attrs: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), value.to_string());
        self
    }

    pub fn append_return_url(mut self, append: bool) -> Self {
        self.append_return_url = Some(append);
        self
    }

    pub fn url_append(mut self, params: IndexMap<String, String>) -> Self {
        self.url_append = Some(params);
        self
    }

    pub fn key_param(mut self, key_param: Option<&str>) -> Self {
        self.key_param = key_param.map(str::to_string);
        self
    }

    pub fn attrs(mut self, attrs: &[&str]) -> Self {
        self.attrs = attrs.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Applies the fields set in `partial` on top of this button.
    ///
    /// Each field is replaced whole, except `options` which is merged key by
    /// key.
    pub fn merge(mut self, partial: &PartialButtonSpec) -> Self {
        if let Some(url) = &partial.url {
            self.url = url.clone();
        }
        if let Some(icon) = &partial.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(class) = &partial.class {
            self.class = class.clone();
        }
        if let Some(label) = &partial.label {
            self.label = label.clone();
        }
        if let Some(text) = &partial.text {
            self.text = Some(text.clone());
        }
        for (name, value) in &partial.options {
            self.options.insert(name.clone(), value.clone());
        }
        if let Some(append) = partial.append_return_url {
            self.append_return_url = Some(append);
        }
        if let Some(url_append) = &partial.url_append {
            self.url_append = Some(url_append.clone());
        }
        if let Some(key_param) = &partial.key_param {
            self.key_param = non_empty(key_param);
        }
        if let Some(attrs) = &partial.attrs {
            self.attrs = attrs.clone();
        }
        self
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// A button with every field optional, as written in overrides and config
/// files. An empty `key_param` disables key substitution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialButtonSpec {
    pub url: Option<String>,
    pub icon: Option<String>,
    pub class: Option<String>,
    pub label: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub options: IndexMap<String, String>,
    pub append_return_url: Option<bool>,
    pub url_append: Option<IndexMap<String, String>>,
    pub key_param: Option<String>,
    pub attrs: Option<Vec<String>>,
}

impl PartialButtonSpec {
    /// Turns an override for a button that has no default into a full
    /// button, failing when one of the required fields is absent.
    pub fn to_spec(&self, name: &str) -> Result<ButtonSpec, ConfigError> {
        let required = |value: &Option<String>, field: &'static str| {
            value.clone().ok_or_else(|| ConfigError::MissingField {
                button: name.to_string(),
                field,
            })
        };
        let url = required(&self.url, "url")?;
        let class = required(&self.class, "class")?;
        let label = required(&self.label, "label")?;

        Ok(ButtonSpec::new(&url, &class, &label).merge(self))
    }
}

/// Merges `overrides` onto `defaults`.
///
/// Buttons named in both are merged field by field (override wins). Buttons
/// only named in `overrides` are appended after the defaults, in override
/// order, and must be complete.
pub fn configure(
    defaults: &ButtonSet,
    overrides: &IndexMap<String, PartialButtonSpec>,
) -> Result<ButtonSet, ConfigError> {
    let mut buttons = defaults.clone();
    for (name, partial) in overrides {
        let merged = match buttons.get(name) {
            Some(existing) => existing.clone().merge(partial),
            None => partial.to_spec(name)?,
        };
        validate_options(name, &merged.options)?;
        buttons.insert(name.clone(), merged);
    }
    Ok(buttons)
}

/// Whether `name` may be written out as an HTML attribute name.
///
/// Only ASCII letters, digits, `-`, `_` and `:` are accepted.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':'))
}

/// Checks every key of a button's `options` with [`is_valid_attribute_name`].
pub fn validate_options(
    button: &str,
    options: &IndexMap<String, String>,
) -> Result<(), ConfigError> {
    match options.keys().find(|name| !is_valid_attribute_name(name)) {
        Some(attribute) => Err(ConfigError::InvalidAttributeName {
            button: button.to_string(),
            attribute: attribute.clone(),
        }),
        None => Ok(()),
    }
}

/// The edit and delete buttons every column starts out with.
pub fn default_buttons(translator: &dyn Translator) -> ButtonSet {
    IndexMap::from([
        (
            "edit".to_string(),
            ButtonSpec::new(
                "edit",
                "btn-primary",
                &translator.translate(CATEGORY, "Edit"),
            )
            .icon("pencil"),
        ),
        (
            "delete".to_string(),
            ButtonSpec::new(
                "delete",
                "btn-danger",
                &translator.translate(CATEGORY, "Delete"),
            )
            .icon("trash-o")
            .option("data-action", "delete"),
        ),
    ])
}

type ButtonFn = dyn for<'a> Fn(&RowContext<'a>) -> ButtonSet + Send + Sync;

/// Where a column gets its buttons from.
#[derive(Clone)]
pub enum ButtonSource {
    /// The same buttons for every row.
    Static(ButtonSet),
    /// Buttons computed per row (e.g. no delete button for protected rows).
    Computed(Arc<ButtonFn>),
}

impl ButtonSource {
    pub fn computed(
        f: impl for<'a> Fn(&RowContext<'a>) -> ButtonSet + Send + Sync + 'static,
    ) -> Self {
        ButtonSource::Computed(Arc::new(f))
    }

    pub fn resolve<'s>(&'s self, ctx: &RowContext<'_>) -> Cow<'s, ButtonSet> {
        match self {
            ButtonSource::Static(buttons) => Cow::Borrowed(buttons),
            ButtonSource::Computed(f) => Cow::Owned(f(ctx)),
        }
    }
}

impl std::fmt::Debug for ButtonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ButtonSource::Static(buttons) => {
                f.debug_tuple("Static").field(buttons).finish()
            }
            ButtonSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<ButtonSet> for ButtonSource {
    fn from(buttons: ButtonSet) -> Self {
        ButtonSource::Static(buttons)
    }
}
