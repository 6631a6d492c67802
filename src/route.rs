//! Route descriptors and the router which turns them into URLs.

use indexmap::IndexMap;
use url::{Position, Url};

use crate::{
    context::{RowContext, RowKey, RowModel},
    error::ConfigError,
};

/// Route attribute which binds the whole row model instead of one attribute.
pub const MODEL_SENTINEL: &str = "model";

/// Name of the parameter carrying the return URL.
pub const RETURN_URL_PARAM: &str = "returnUrl";

pub enum RouteParam<'a> {
    Value(String),
    Model(&'a dyn RowModel),
}

impl RouteParam<'_> {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            RouteParam::Value(value) => Some(value),
            RouteParam::Model(_) => None,
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, RouteParam::Model(_))
    }

    /// The string placed into the URL for this parameter.
    pub fn to_url_value(&self) -> String {
        match self {
            RouteParam::Value(value) => value.clone(),
            RouteParam::Model(model) => model.route_value(),
        }
    }
}

impl std::fmt::Debug for RouteParam<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteParam::Value(value) => f.debug_tuple("Value").field(value).finish(),
            RouteParam::Model(model) => f
                .debug_tuple("Model")
                .field(&model.route_value())
                .finish(),
        }
    }
}

/// An ordered parameter list whose logical position 0 is the route name.
#[derive(Debug)]
pub struct RouteParams<'a> {
    route: String,
    params: IndexMap<String, RouteParam<'a>>,
}

impl<'a> RouteParams<'a> {
    pub fn new(route: &str) -> Result<Self, ConfigError> {
        if route.is_empty() {
            return Err(ConfigError::EmptyRoute);
        }
        Ok(Self {
            route: route.to_string(),
            params: IndexMap::new(),
        })
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Sets a parameter. Re-setting an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: RouteParam<'a>) {
        self.params.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&RouteParam<'a>> {
        self.params.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteParam<'a>)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Builds the descriptor for one button of one row.
    ///
    /// A composite row key is copied in as-is and wins over `key_param`; a
    /// scalar key is bound under `key_param` (when there is one). Route
    /// attributes come next, then `extra` (which overrides anything set so
    /// far), then the return URL.
    pub fn for_row(
        route: &str,
        ctx: &RowContext<'a>,
        return_url: Option<String>,
        extra: &IndexMap<String, String>,
        key_param: Option<&str>,
        attrs: &[String],
    ) -> Result<Self, ConfigError> {
        let mut params = Self::new(route)?;

        match &ctx.key {
            RowKey::Composite(entries) => {
                for (name, value) in entries {
                    params.insert(name.clone(), RouteParam::Value(value.clone()));
                }
            }
            RowKey::Scalar(key) => {
                if let Some(key_param) = key_param {
                    params.insert(key_param, RouteParam::Value(key.clone()));
                }
            }
        }

        for attr in attrs {
            if attr == MODEL_SENTINEL {
                params.insert(MODEL_SENTINEL, RouteParam::Model(ctx.model));
            } else {
                let value = ctx.model.attribute(attr).ok_or_else(|| {
                    ConfigError::MissingAttribute {
                        attribute: attr.clone(),
                    }
                })?;
                params.insert(attr.clone(), RouteParam::Value(value));
            }
        }

        for (name, value) in extra {
            params.insert(name.clone(), RouteParam::Value(value.clone()));
        }

        if let Some(return_url) = return_url {
            params.insert(RETURN_URL_PARAM, RouteParam::Value(return_url));
        }

        Ok(params)
    }
}

/// Serializes route descriptors into URLs.
pub trait Router: Send + Sync {
    fn to_route(&self, params: &RouteParams<'_>) -> Result<String, ConfigError>;
}

/// Resolves route names relative to a base path and appends the remaining
/// parameters as the query string, in order.
///
/// `PathRouter::new("/admin/articles")` maps route `edit` with `id=4` to
/// `/admin/articles/edit?id=4`. Route names starting with `/` are taken as
/// absolute paths. A base without a scheme yields host-relative URLs.
#[derive(Debug, Clone)]
pub struct PathRouter {
    base: Url,
    relative: bool,
}

impl PathRouter {
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        let invalid = |source: url::ParseError| ConfigError::InvalidBaseUrl {
            base: base.to_string(),
            source,
        };

        let (mut url, relative) = match Url::parse(base) {
            Ok(url) => (url, false),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let root = Url::parse("http://localhost").map_err(invalid)?;
                (root.join(base).map_err(invalid)?, true)
            }
            Err(e) => return Err(invalid(e)),
        };

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base: url,
            relative,
        })
    }
}

impl Router for PathRouter {
    fn to_route(&self, params: &RouteParams<'_>) -> Result<String, ConfigError> {
        let mut url = self.base.join(params.route()).map_err(|source| {
            ConfigError::InvalidRoute {
                route: params.route().to_string(),
                source,
            }
        })?;

        let pairs = params
            .iter()
            .map(|(name, value)| (name, value.to_url_value()))
            .collect::<Vec<_>>();

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            let query = serde_urlencoded::to_string(&pairs)?;
            url.set_query(Some(&query));
        }

        Ok(if self.relative {
            url[Position::BeforePath..].to_string()
        } else {
            url.to_string()
        })
    }
}
