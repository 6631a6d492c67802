use thiserror::Error;

/// Errors raised while configuring or rendering an action column.
///
/// None of these are recoverable at runtime: they point at a mistake in the
/// button configuration (or in the model handed to the column) and abort the
/// render of the row that hit them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("button route name must not be empty")]
    EmptyRoute,
    #[error("button `{button}` is missing the required `{field}` field")]
    MissingField {
        button: String,
        field: &'static str,
    },
    #[error("button `{button}` has an invalid html attribute name `{attribute}`")]
    InvalidAttributeName { button: String, attribute: String },
    #[error("model has no attribute `{attribute}` (referenced by route attrs)")]
    MissingAttribute { attribute: String },
    #[error("invalid router base url `{base}`: {source}")]
    InvalidBaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("could not resolve route `{route}`: {source}")]
    InvalidRoute {
        route: String,
        #[source]
        source: url::ParseError,
    },
    #[error("could not encode route parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
}
