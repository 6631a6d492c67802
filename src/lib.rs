//! Action buttons (edit, delete, custom) for the rows of an admin data grid.
//!
//! A column is configured once from a set of [`button::ButtonSpec`]s (the
//! defaults, with overrides merged on top) and then asked to render each row.
//! Rendering a row computes every button's URL from the row's key and model
//! attributes, decorates the delete button with confirmation attributes and
//! composes the icon and text of each link. See
//! [`widgets::actions::ActionColumn`].
//!
//! Routing, translation, icons and the current request URL are supplied by
//! the host through the traits in [`host`] and [`route`].

pub mod button;
pub mod config;
pub mod context;
pub mod demo;
pub mod error;
pub mod host;
pub mod route;
pub mod state;
pub mod template;
pub mod util_resp;
pub mod widgets;
