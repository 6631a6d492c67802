use std::{path::Path, sync::Arc};

use axum::routing::get;
use indexmap::IndexMap;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::{
    button::PartialButtonSpec,
    demo::{
        articles_page, delete_article_page, do_delete_article,
        edit_article_page, protect_rows, sample_articles, view_article_page,
    },
    error::ConfigError,
    host::{FontAwesome, Host, MessageCatalog},
    route::PathRouter,
    state::AppState,
    widgets::actions::ActionColumn,
};

/// Column-level settings and button overrides.
///
/// ```toml
/// append_return_url = true
/// button_size_class = "btn-sm"
///
/// [buttons.edit]
/// icon = "edit"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub append_return_url: bool,
    pub button_size_class: String,
    pub append_url_params: IndexMap<String, String>,
    pub buttons: IndexMap<String, PartialButtonSpec>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            append_return_url: true,
            button_size_class: "btn-sm".to_string(),
            append_url_params: IndexMap::new(),
            buttons: IndexMap::new(),
        }
    }
}

impl ColumnConfig {
    /// Builds a column with the default buttons and this config's overrides.
    pub fn build(&self, host: Host) -> Result<ActionColumn, ConfigError> {
        Ok(ActionColumn::new(host)
            .overrides(&self.buttons)?
            .append_return_url(self.append_return_url)
            .button_size_class(&self.button_size_class)
            .append_url_params(self.append_url_params.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub bind: String,
    /// Path the article routes are mounted under.
    pub base_path: String,
    pub column: ColumnConfig,
    /// Translations by category, then source message.
    pub messages: MessageCatalog,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            base_path: "/articles".to_string(),
            column: ColumnConfig::default(),
            messages: MessageCatalog::new(),
        }
    }
}

impl AppConfig {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::parse(&source)?;
        tracing::info!(
            "Loaded configuration with {} button overrides",
            config.column.buttons.len()
        );
        Ok(config)
    }

    pub fn host(&self) -> Result<Host, ConfigError> {
        Ok(Host::new(PathRouter::new(&self.base_path)?)
            .translator(self.messages.clone())
            .icons(FontAwesome::default()))
    }

    /// The column as configured, with the default buttons and overrides.
    pub fn action_column(&self) -> Result<ActionColumn, ConfigError> {
        self.column.build(self.host()?)
    }
}

pub fn create_app(config: &AppConfig) -> Result<axum::Router, ConfigError> {
    let base = config.base_path.trim_end_matches('/');

    let state = AppState {
        column: protect_rows(config.action_column()?),
        base_path: base.to_string(),
        articles: Arc::new(RwLock::new(sample_articles())),
    };

    Ok(axum::Router::new()
        .route(&format!("{base}/"), get(articles_page))
        .route(base, get(articles_page))
        .route(&format!("{base}/view"), get(view_article_page))
        .route(&format!("{base}/edit"), get(edit_article_page))
        .route(
            &format!("{base}/delete"),
            get(delete_article_page).post(do_delete_article),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
