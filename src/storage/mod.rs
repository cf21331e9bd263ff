//! Storage Layer - SQLite-backed employee store
//!
//! System of record is SQLite with one table:
//! - employees(id, age, gender, department, education, location, salary, performance, years_service)
//!
//! Every operation opens its own connection and drops it before returning.

pub mod schema;
pub mod sqlite;

pub use schema::{COLUMN_MAPPING, display_name, internal_name};
pub use sqlite::{EmployeeStore, InitOutcome, StoreConfig};
