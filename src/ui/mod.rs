//! Ratatui front-end. It collects input, calls into the record store, and
//! redraws from the store's current table after every change.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
