//! SQLite storage implementation

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, TransactionBehavior, params};
use serde::Serialize;

use super::schema;
use crate::employee::EmployeeRecord;
use crate::table::{Table, Value};
use crate::{Error, Result};

/// Where the employee store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Result of a successful [`EmployeeStore::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitOutcome {
    /// Rows inserted by this call (0 when the store was already populated)
    pub seeded: usize,
    pub seed_requested: bool,
}

/// SQLite-backed employee store.
///
/// Holds only its configuration; each operation acquires a connection,
/// does one unit of work and drops the connection on every exit path.
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    config: StoreConfig,
}

impl EmployeeStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Open a connection; only `create` may bring a new database file into existence.
    ///
    /// SQLite opens lazily, so the header is read here to surface a missing or
    /// non-database file as a connection failure.
    fn connect(&self, create: bool) -> Result<Connection> {
        tracing::debug!("Opening connection to {}", self.config.path.display());
        let flags = if create {
            OpenFlags::default()
        } else {
            OpenFlags::default().difference(OpenFlags::SQLITE_OPEN_CREATE)
        };
        let connection_error = |source| Error::Connection {
            path: self.config.path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(&self.config.path, flags).map_err(connection_error)?;
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(connection_error)?;
        Ok(conn)
    }

    /// Create the employees table if it does not exist
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect(true)?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, []).map_err(Error::Schema)?;
        }
        tracing::info!("Tables created successfully");
        Ok(())
    }

    /// Insert `records` in one transaction, only if the table is empty.
    ///
    /// Returns the number of rows inserted, 0 when the table already had rows.
    /// The emptiness check runs under the write lock, so concurrent seeders
    /// serialize and at most one of them inserts.
    pub fn seed(&self, records: &[EmployeeRecord]) -> Result<usize> {
        for record in records {
            record.validate()?;
        }

        let mut conn = self.connect(false)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(Error::Seed)?;

        let existing: i64 = tx
            .query_row(schema::COUNT_EMPLOYEES, [], |row| row.get(0))
            .map_err(Error::Seed)?;
        if existing > 0 {
            tracing::info!("Data already exists in employees table ({} records)", existing);
            return Ok(0);
        }

        {
            let mut stmt = tx.prepare(schema::INSERT_EMPLOYEE).map_err(Error::Seed)?;
            for r in records {
                stmt.execute(params![
                    r.age,
                    r.gender,
                    r.department,
                    r.education,
                    r.location,
                    r.salary,
                    r.performance,
                    r.years_service,
                ])
                .map_err(Error::Seed)?;
            }
        }
        tx.commit().map_err(Error::Seed)?;

        tracing::info!("Inserted {} records into employees table", records.len());
        Ok(records.len())
    }

    /// Every stored employee, with display column names, ordered by id
    pub fn fetch_all(&self) -> Result<Table> {
        let conn = self.connect(false)?;
        let mut stmt = conn.prepare(schema::SELECT_ALL_EMPLOYEES)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|c| schema::display_name(c).unwrap_or(c).to_string())
            .collect();
        let width = columns.len();
        let mut table = Table::new(columns);

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let cells = (0..width)
                .map(|i| row.get_ref(i).map(value_from_ref))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            table.push_row(cells)?;
        }

        tracing::debug!("Fetched {} employees", table.len());
        Ok(table)
    }

    /// Number of stored employees
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect(false)?;
        let count: i64 = conn.query_row(schema::COUNT_EMPLOYEES, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Ensure the schema, then seed when records are given.
    ///
    /// Failures are logged and returned with their kind intact.
    pub fn initialize(&self, seed: Option<&[EmployeeRecord]>) -> Result<InitOutcome> {
        let result = self.ensure_schema().and_then(|()| match seed {
            Some(records) => self.seed(records),
            None => Ok(0),
        });

        match result {
            Ok(seeded) => Ok(InitOutcome {
                seeded,
                seed_requested: seed.is_some(),
            }),
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "Database initialization error: {}", e);
                Err(e)
            }
        }
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
