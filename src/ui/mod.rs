//! Ratatui front-end. `App` maps keys and mouse clicks onto the browser
//! commands and draws whatever the controller exposes.

mod app;
mod grid;
mod helpers;
mod search;
mod terminal;

pub use app::{App, LinkOpener};
pub use terminal::run_app;
