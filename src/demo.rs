//! Demo admin pages: an article grid whose rows carry the action column,
//! plus the pages its buttons lead to.

use axum::{
    extract::{OriginalUri, Query, State},
    response::Redirect,
};
use hypertext::prelude::*;
use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::{
    button::ButtonSource,
    context::{RowContext, RowKey, RowModel},
    host::StaticRequest,
    state::AppState,
    template::Page,
    util_resp::{
        StandardResponse, bad_request, err_not_found, see_other_ok,
        server_error, success,
    },
    widgets::{
        actions::ActionColumn,
        alert::ErrorAlert,
        grid::{DataColumn, Grid, GridRow},
    },
};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// Protected articles cannot be deleted.
    pub protected: bool,
}

impl RowModel for Article {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            "slug" => Some(self.slug.clone()),
            "protected" => Some(self.protected.to_string()),
            _ => None,
        }
    }

    fn route_value(&self) -> String {
        self.slug.clone()
    }
}

pub fn sample_articles() -> Vec<GridRow<Article>> {
    [
        (1, "Hello, world", "hello-world", false),
        (2, "About us", "about", true),
        (3, "Release notes", "release-notes", false),
        (4, "Roadmap", "roadmap", false),
    ]
    .into_iter()
    .map(|(id, title, slug, protected)| GridRow {
        key: RowKey::from(id),
        model: Article {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            protected,
        },
    })
    .collect()
}

/// Drops the delete button from protected articles' rows.
pub fn protect_rows(column: ActionColumn) -> ActionColumn {
    let buttons = match column.button_source() {
        ButtonSource::Static(buttons) => buttons.clone(),
        ButtonSource::Computed(_) => return column,
    };
    column.buttons(ButtonSource::computed(move |ctx| {
        let mut buttons = buttons.clone();
        if ctx.model.attribute("protected").as_deref() == Some("true") {
            buttons.shift_remove("delete");
        }
        buttons
    }))
}

fn article_columns() -> Vec<DataColumn<Article>> {
    vec![
        DataColumn::new("ID", |a: &Article| a.id.to_string()),
        DataColumn::new("Title", |a: &Article| a.title.clone()),
        DataColumn::new("Slug", |a: &Article| a.slug.clone()),
    ]
}

#[derive(Deserialize, Debug)]
pub struct ArticleQuery {
    id: Option<i64>,
    slug: Option<String>,
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

impl ArticleQuery {
    fn matches(&self, article: &Article) -> bool {
        match (&self.id, &self.slug) {
            (Some(id), _) => article.id == *id,
            (None, Some(slug)) => &article.slug == slug,
            (None, None) => false,
        }
    }

    /// Only paths on this site are followed back.
    fn return_url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.return_url.as_deref() {
            Some(url) if is_local_path(url) => url,
            _ => fallback,
        }
    }
}

/// Whether a browser would resolve `url` to a path on the current origin.
///
/// Parsed the way a browser parses it: `\` reads as `/`, tabs and newlines
/// are dropped.
fn is_local_path(url: &str) -> bool {
    let Ok(base) = Url::parse("http://localhost/") else {
        return false;
    };
    url.starts_with('/')
        && base
            .join(url)
            .is_ok_and(|joined| joined.origin() == base.origin())
}

pub async fn articles_page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> StandardResponse {
    let current = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let column = state.column.for_request(StaticRequest(current.to_string()));
    let articles = state.articles.read().await;
    let columns = article_columns();

    success(
        Page::new()
            .title("Articles")
            .icon_stylesheet(column.host().icons.stylesheet())
            .body(maud! {
                h1 class="h2 mb-3" { "Articles" }
                (Grid {
                    rows: articles.as_slice(),
                    columns: &columns,
                    actions: &column,
                })
            })
            .render(),
    )
}

pub async fn view_article_page(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> StandardResponse {
    let articles = state.articles.read().await;
    let Some(row) = articles.iter().find(|row| query.matches(&row.model)) else {
        return err_not_found();
    };
    let back = query.return_url_or(&state.base_path);

    success(
        Page::new()
            .title(&row.model.title)
            .body(maud! {
                h1 class="h2" { (row.model.title) }
                p class="text-muted" { code { (row.model.slug) } }
                a class="btn btn-secondary" href=(back) { "Back" }
            })
            .render(),
    )
}

pub async fn edit_article_page(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> StandardResponse {
    let articles = state.articles.read().await;
    let Some(row) = articles.iter().find(|row| query.matches(&row.model)) else {
        return err_not_found();
    };
    let back = query.return_url_or(&state.base_path);

    success(
        Page::new()
            .title("Edit article")
            .body(maud! {
                h1 class="h2" { "Editing " (row.model.title) }
                div class="mb-3" {
                    label class="form-label" for="title" { "Title" }
                    input class="form-control" id="title" name="title" value=(row.model.title);
                }
                a class="btn btn-secondary" href=(back) { "Back" }
            })
            .render(),
    )
}

pub async fn delete_article_page(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> StandardResponse {
    let articles = state.articles.read().await;
    let Some((index, row)) = articles
        .iter()
        .enumerate()
        .find(|(_, row)| query.matches(&row.model))
    else {
        return err_not_found();
    };

    if row.model.protected {
        return bad_request(
            Page::new()
                .body(ErrorAlert {
                    msg: format!("\"{}\" is protected.", row.model.title),
                })
                .render(),
        );
    }

    let back = query.return_url_or(&state.base_path).to_string();
    let column = state.column.for_request(StaticRequest(back.clone()));
    let ctx = RowContext::new(&row.model, row.key.clone(), index);
    let action = match column.build_url(
        "delete",
        &ctx,
        true,
        &IndexMap::new(),
        Some("id"),
        &[],
    ) {
        Ok(action) => action,
        Err(e) => {
            tracing::error!("Could not build delete url: {e}");
            return server_error(
                Page::new().body(ErrorAlert { msg: e }).render(),
            );
        }
    };

    success(
        Page::new()
            .title("Delete article")
            .body(maud! {
                div class="card" {
                    div class="card-body" {
                        h5 class="card-title" { "Delete " (row.model.title) "?" }
                        form method="post" action=(action) {
                            button type="submit" class="btn btn-danger" { "Delete" }
                            " "
                            a class="btn btn-secondary" href=(back) { "Cancel" }
                        }
                    }
                }
            })
            .render(),
    )
}

pub async fn do_delete_article(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> StandardResponse {
    let mut articles = state.articles.write().await;
    let Some(index) = articles.iter().position(|row| query.matches(&row.model))
    else {
        return err_not_found();
    };

    if articles[index].model.protected {
        return bad_request(
            Page::new()
                .body(ErrorAlert {
                    msg: "Protected articles cannot be deleted.",
                })
                .render(),
        );
    }

    let removed = articles.remove(index);
    tracing::info!(id = removed.model.id, "Deleted article");

    see_other_ok(Redirect::to(query.return_url_or(&state.base_path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_attributes() {
        let article = &sample_articles()[1].model;
        assert_eq!(article.attribute("slug").as_deref(), Some("about"));
        assert_eq!(article.attribute("title").as_deref(), Some("About us"));
        assert_eq!(article.attribute("id").as_deref(), Some("2"));
        assert_eq!(article.attribute("protected").as_deref(), Some("true"));
        assert_eq!(article.attribute("author"), None);
    }

    #[test]
    fn return_url_must_stay_on_site() {
        assert!(is_local_path("/articles?page=2"));
        assert!(is_local_path("/articles/view?id=1"));
        assert!(!is_local_path("https://evil.example/"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path("\\/evil.example"));
        assert!(!is_local_path("/\t/evil.example"));
        assert!(!is_local_path("articles"));
    }
}
