//! User interface components for admin grids.
//!
//! [`actions`] holds the action column itself; [`grid`] is a minimal table
//! hosting it, and [`alert`] is shown in place of a row's buttons when they
//! cannot be rendered.

pub mod actions;
pub mod alert;
pub mod grid;
