use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{demo::Article, widgets::{actions::ActionColumn, grid::GridRow}};

/// Shared state of the demo admin server.
#[derive(Clone)]
pub struct AppState {
    /// Column as configured. Handlers render with a request-scoped copy.
    pub column: ActionColumn,
    pub base_path: String,
    pub articles: Arc<RwLock<Vec<GridRow<Article>>>>,
}
