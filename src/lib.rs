//! # hrdash - HR analytics backend
//!
//! Employee store plus the data layer behind an HR dashboard.
//!
//! hrdash provides:
//! - SQLite-backed employee storage with an idempotent one-time seed
//! - A small tabular dataset type shared by storage and presentation
//! - Dashboard filters with multiselect semantics
//! - Pure aggregation helpers (counts, means, rates, cross-tabs, bins)
//! - Per-tab dashboard panel data, served over a CLI and a JSON API

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod employee;
pub mod filter;
pub mod output;
pub mod report;
pub mod server;
pub mod storage;
pub mod table;
pub mod ui;

// Re-exports for convenient access
pub use employee::EmployeeRecord;
pub use filter::{DashboardFilter, Filter, FilterOptions};
pub use report::DashboardReport;
pub use storage::{EmployeeStore, InitOutcome, StoreConfig};
pub use table::{Table, Value};

use std::path::PathBuf;

/// Result type alias for hrdash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for hrdash operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Connection error ({}): {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema error: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Seed error: {0}")]
    Seed(#[source] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column has no numeric values: {0}")]
    NonNumeric(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure class of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Schema,
    Seed,
    Storage,
    Data,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection { .. } => ErrorKind::Connection,
            Error::Schema(_) => ErrorKind::Schema,
            Error::Seed(_) | Error::InvalidRecord(_) => ErrorKind::Seed,
            Error::Storage(_) => ErrorKind::Storage,
            Error::UnknownColumn(_) | Error::NonNumeric(_) => ErrorKind::Data,
            Error::Config(_) | Error::Io(_) => ErrorKind::Config,
        }
    }
}
