//! Core library surface for the Course Browser TUI.
//!
//! The controller in [`browser`] owns the catalog and every piece of derived
//! view state; [`ui`] is a thin Ratatui layer that binds keys to its commands.
//! Keeping the two apart lets the search, sort and navigation rules be tested
//! without a terminal.
pub mod browser;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;

/// The controller and its command vocabulary.
pub use browser::{ActiveScreen, CourseBrowser, CoursePicker, GridContent, SortDirection, SortOrder};

/// Catalog loading entry points used by `main.rs`.
pub use catalog::{load_catalog, spawn_loader, Catalog, CatalogError};

pub use config::Config;

/// The two primary domain types that other layers manipulate.
pub use models::{Course, MaterialCategory};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
