//! Core library surface for the People Manager terminal application.
//!
//! The record store and the table operations are usable on their own; the
//! `ui` module is just one front-end that drives them.
pub mod config;
pub mod logging;
pub mod models;
pub mod ops;
pub mod store;
pub mod ui;
pub mod viewer;

/// Typed rows and the table that holds them.
pub use models::{BirthDate, Record, Table, COLUMNS};

/// Pure operations over a table.
pub use ops::{add_record, delete_by_last_name, filter_by_month, Deletion, ValidationError};

/// Loading, saving, and the owning store used by the UI.
pub use store::{load_table, save_table, Outcome, Persistence, RecordStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
