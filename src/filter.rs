//! Dashboard filters
//!
//! A filter maps columns to allowed-value sets. Rows must match every
//! constrained column; an empty set matches nothing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aggregate::distinct;
use crate::dataset::columns;
use crate::table::{Table, Value};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    allowed: BTreeMap<String, BTreeSet<Value>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `column` to `values` (replaces any earlier selection)
    pub fn select<V: Into<Value>>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.allowed
            .insert(column.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Rows matching every selection, columns and order unchanged
    pub fn apply(&self, table: &Table) -> Result<Table> {
        let checks = self
            .allowed
            .iter()
            .map(|(col, set)| table.column_index(col).map(|i| (i, set)))
            .collect::<Result<Vec<_>>>()?;

        Ok(table.retain_rows(|row| checks.iter().all(|(i, set)| set.contains(&row[*i]))))
    }
}

/// The four dashboard selections. `None` means everything is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilter {
    pub departments: Option<Vec<String>>,
    pub job_roles: Option<Vec<String>>,
    pub genders: Option<Vec<String>>,
    pub performance: Option<Vec<i64>>,
}

impl DashboardFilter {
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(v) = &self.departments {
            filter = filter.select(columns::DEPARTMENT, v.iter().map(String::as_str));
        }
        if let Some(v) = &self.job_roles {
            filter = filter.select(columns::JOB_ROLE, v.iter().map(String::as_str));
        }
        if let Some(v) = &self.genders {
            filter = filter.select(columns::GENDER, v.iter().map(String::as_str));
        }
        if let Some(v) = &self.performance {
            filter = filter.select(columns::PERFORMANCE_RATING, v.iter().copied());
        }
        filter
    }

    pub fn apply(&self, table: &Table) -> Result<Table> {
        self.to_filter().apply(table)
    }
}

/// Selectable values per dashboard field, sorted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub departments: Vec<Value>,
    pub job_roles: Vec<Value>,
    pub genders: Vec<Value>,
    pub performance: Vec<Value>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Result<Self> {
        Ok(Self {
            departments: distinct(table, columns::DEPARTMENT)?,
            job_roles: distinct(table, columns::JOB_ROLE)?,
            genders: distinct(table, columns::GENDER)?,
            performance: distinct(table, columns::PERFORMANCE_RATING)?,
        })
    }

    /// Filter with every option selected
    pub fn select_all(&self) -> Filter {
        Filter::new()
            .select(columns::DEPARTMENT, self.departments.clone())
            .select(columns::JOB_ROLE, self.job_roles.clone())
            .select(columns::GENDER, self.genders.clone())
            .select(columns::PERFORMANCE_RATING, self.performance.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn test_all_selected_keeps_every_row() {
        let table = dataset::sample_table(120, 3);
        let options = FilterOptions::from_table(&table).unwrap();
        let filtered = options.select_all().apply(&table).unwrap();
        assert_eq!(filtered.len(), table.len());
    }

    #[test]
    fn test_empty_selection_excludes_all() {
        let table = dataset::sample_table(120, 3);
        let filter = DashboardFilter {
            job_roles: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(filter.apply(&table).unwrap().len(), 0);
    }

    #[test]
    fn test_default_filter_is_unconstrained() {
        let table = dataset::sample_table(50, 3);
        let filter = DashboardFilter::default();
        assert!(filter.to_filter().is_unconstrained());
        assert_eq!(filter.apply(&table).unwrap(), table);
    }

    #[test]
    fn test_intersection_of_fields() {
        let table = dataset::sample_table(200, 42);
        let filter = DashboardFilter {
            departments: Some(vec!["IT".into(), "HR".into()]),
            performance: Some(vec![5]),
            ..Default::default()
        };
        let filtered = filter.apply(&table).unwrap();

        let expected = table
            .rows()
            .iter()
            .filter(|r| {
                let dept = r[3].as_str().unwrap_or_default();
                (dept == "IT" || dept == "HR") && r[8] == Value::Int(5)
            })
            .count();
        assert_eq!(filtered.len(), expected);
        for v in filtered.column(columns::PERFORMANCE_RATING).unwrap() {
            assert_eq!(v, &Value::Int(5));
        }
    }

    #[test]
    fn test_unknown_column_is_error() {
        let table = Table::new(["A"]);
        let filter = Filter::new().select("B", ["x"]);
        assert!(filter.apply(&table).is_err());
    }

    #[test]
    fn test_options_sorted() {
        let table = dataset::sample_table(200, 42);
        let options = FilterOptions::from_table(&table).unwrap();
        let mut sorted = options.departments.clone();
        sorted.sort();
        assert_eq!(options.departments, sorted);
        assert!(options.performance.len() <= 5);
    }
}
