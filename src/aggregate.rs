//! Aggregation helpers
//!
//! Pure functions over a [`Table`]: group by one or more columns and reduce
//! each group to a count, mean or rate. Grouped results come back sorted by
//! metric descending, ties broken by key ascending.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::{Table, Value};
use crate::{Error, Result};

/// One group and its metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub key: Vec<Value>,
    pub value: f64,
    /// Rows in the group
    pub size: usize,
}

impl GroupStat {
    /// Key cells joined for display
    pub fn label(&self) -> String {
        self.key
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// `positive / total`, 0 for an empty group
pub fn rate(positive: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        positive as f64 / total as f64
    }
}

fn group_rows<'a>(table: &'a Table, group_cols: &[&str]) -> Result<BTreeMap<Vec<Value>, Vec<&'a [Value]>>> {
    let idx = group_cols
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>>>()?;

    let mut groups: BTreeMap<Vec<Value>, Vec<&[Value]>> = BTreeMap::new();
    for row in table.rows() {
        let key = idx.iter().map(|&i| row[i].clone()).collect();
        groups.entry(key).or_default().push(row.as_slice());
    }
    Ok(groups)
}

fn metric_desc(mut stats: Vec<GroupStat>) -> Vec<GroupStat> {
    stats.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    stats
}

/// Row count per group
pub fn count_by(table: &Table, group_cols: &[&str]) -> Result<Vec<GroupStat>> {
    let stats = group_rows(table, group_cols)?
        .into_iter()
        .map(|(key, rows)| GroupStat {
            key,
            value: rows.len() as f64,
            size: rows.len(),
        })
        .collect();
    Ok(metric_desc(stats))
}

/// Counts of a single column's values
pub fn value_counts(table: &Table, col: &str) -> Result<Vec<GroupStat>> {
    count_by(table, &[col])
}

/// Mean of `value_col` per group; non-numeric cells are skipped.
///
/// A non-empty table whose `value_col` holds no number at all is `NonNumeric`.
pub fn mean_by(table: &Table, group_cols: &[&str], value_col: &str) -> Result<Vec<GroupStat>> {
    let v = table.column_index(value_col)?;
    if !table.is_empty() && table.rows().iter().all(|r| r[v].as_f64().is_none()) {
        return Err(Error::NonNumeric(value_col.to_string()));
    }
    let stats = group_rows(table, group_cols)?
        .into_iter()
        .map(|(key, rows)| {
            let nums: Vec<f64> = rows.iter().filter_map(|r| r[v].as_f64()).collect();
            let value = if nums.is_empty() {
                0.0
            } else {
                nums.iter().sum::<f64>() / nums.len() as f64
            };
            GroupStat {
                key,
                value,
                size: rows.len(),
            }
        })
        .collect();
    Ok(metric_desc(stats))
}

/// Fraction of each group whose `outcome_col` equals `positive`
pub fn rate_by(
    table: &Table,
    group_cols: &[&str],
    outcome_col: &str,
    positive: &Value,
) -> Result<Vec<GroupStat>> {
    let o = table.column_index(outcome_col)?;
    let stats = group_rows(table, group_cols)?
        .into_iter()
        .map(|(key, rows)| {
            let hits = rows.iter().filter(|r| &r[o] == positive).count();
            GroupStat {
                key,
                value: rate(hits, rows.len()),
                size: rows.len(),
            }
        })
        .collect();
    Ok(metric_desc(stats))
}

/// Re-sort by key ascending, for ordinal axes
pub fn sort_by_key(mut stats: Vec<GroupStat>) -> Vec<GroupStat> {
    stats.sort_by(|a, b| a.key.cmp(&b.key));
    stats
}

/// Order single-key stats by an explicit label list; unlisted keys go last
pub fn order_by_labels(mut stats: Vec<GroupStat>, labels: &[&str]) -> Vec<GroupStat> {
    let pos = |s: &GroupStat| {
        s.key
            .first()
            .and_then(Value::as_str)
            .and_then(|k| labels.iter().position(|l| *l == k))
            .unwrap_or(labels.len())
    };
    stats.sort_by_key(|s| pos(s));
    stats
}

/// Sorted distinct values of a column
pub fn distinct(table: &Table, col: &str) -> Result<Vec<Value>> {
    let mut values: Vec<Value> = table.column(col)?.cloned().collect();
    values.sort();
    values.dedup();
    Ok(values)
}

/// Two-way count table; absent combinations count as 0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<Value>,
    pub columns: Vec<Value>,
    /// `counts[r][c]` for `rows[r]` x `columns[c]`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn get(&self, row: &Value, col: &Value) -> usize {
        let r = self.rows.iter().position(|v| v == row);
        let c = self.columns.iter().position(|v| v == col);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }
}

pub fn crosstab(table: &Table, row_col: &str, col_col: &str) -> Result<CrossTab> {
    let rows = distinct(table, row_col)?
        .into_iter()
        .filter(|v| !v.is_null())
        .collect::<Vec<_>>();
    let columns = distinct(table, col_col)?
        .into_iter()
        .filter(|v| !v.is_null())
        .collect::<Vec<_>>();
    let mut counts = vec![vec![0; columns.len()]; rows.len()];

    let ri = table.column_index(row_col)?;
    let ci = table.column_index(col_col)?;
    for row in table.rows() {
        let r = rows.binary_search(&row[ri]);
        let c = columns.binary_search(&row[ci]);
        if let (Ok(r), Ok(c)) = (r, c) {
            counts[r][c] += 1;
        }
    }

    Ok(CrossTab { rows, columns, counts })
}

/// Append `new_col` holding the label of the left-closed bin `[edges[i], edges[i+1])`
/// each value of `col` falls into, or Null outside every bin.
pub fn bin_column(
    table: Table,
    col: &str,
    edges: &[f64],
    labels: &[&str],
    new_col: &str,
) -> Result<Table> {
    debug_assert_eq!(edges.len(), labels.len() + 1);
    let idx = table.column_index(col)?;
    Ok(table.with_column(new_col, |row| {
        let Some(x) = row[idx].as_f64() else {
            return Value::Null;
        };
        edges
            .windows(2)
            .zip(labels)
            .find(|(w, _)| x >= w[0] && x < w[1])
            .map(|(_, label)| Value::from(*label))
            .unwrap_or(Value::Null)
    }))
}

/// Count, mean, median and range of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// `None` when the column has no numeric values
pub fn describe(table: &Table, col: &str) -> Result<Option<NumericSummary>> {
    let mut nums: Vec<f64> = table.column(col)?.filter_map(Value::as_f64).collect();
    Ok(summarize(&mut nums))
}

/// Per-group [`NumericSummary`] ordered by key, for box-plot style panels
pub fn describe_by(table: &Table, group_col: &str, value_col: &str) -> Result<Vec<(Value, NumericSummary)>> {
    let v = table.column_index(value_col)?;
    let mut out = Vec::new();
    for (mut key, rows) in group_rows(table, &[group_col])? {
        let mut nums: Vec<f64> = rows.iter().filter_map(|r| r[v].as_f64()).collect();
        if let (Some(summary), Some(k)) = (summarize(&mut nums), key.pop()) {
            out.push((k, summary));
        }
    }
    Ok(out)
}

fn summarize(nums: &mut [f64]) -> Option<NumericSummary> {
    if nums.is_empty() {
        return None;
    }
    nums.sort_by(f64::total_cmp);
    let n = nums.len();
    let median = if n % 2 == 1 {
        nums[n / 2]
    } else {
        (nums[n / 2 - 1] + nums[n / 2]) / 2.0
    };
    Some(NumericSummary {
        count: n,
        mean: nums.iter().sum::<f64>() / n as f64,
        median,
        min: nums[0],
        max: nums[n - 1],
    })
}

/// Round to one decimal place, as shown on the dashboard cards
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        let mut t = Table::new(["Dept", "Gender", "Salary", "Left"]);
        for (d, g, s, l) in [
            ("IT", "M", 60000, "Yes"),
            ("IT", "F", 90000, "No"),
            ("HR", "F", 50000, "No"),
            ("Sales", "M", 40000, "Yes"),
            ("Sales", "M", 42000, "Yes"),
        ] {
            t.push_row(vec![d.into(), g.into(), Value::Int(s), l.into()]).unwrap();
        }
        t
    }

    #[test]
    fn test_rate_zero_total() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(1, 4), 0.25);
    }

    #[test]
    fn test_count_by_ties_break_on_key() {
        let stats = count_by(&people(), &["Dept"]).unwrap();
        let labels: Vec<_> = stats.iter().map(GroupStat::label).collect();
        // IT and Sales both have 2; IT sorts first
        assert_eq!(labels, vec!["IT", "Sales", "HR"]);
        assert_eq!(stats[0].value, 2.0);
    }

    #[test]
    fn test_count_by_two_columns() {
        let stats = count_by(&people(), &["Dept", "Gender"]).unwrap();
        assert_eq!(stats[0].key, vec![Value::from("Sales"), Value::from("M")]);
        assert_eq!(stats[0].value, 2.0);
        assert_eq!(stats.len(), 4);
    }

    #[test]
    fn test_mean_by() {
        let stats = mean_by(&people(), &["Dept"], "Salary").unwrap();
        assert_eq!(stats[0].label(), "IT");
        assert_eq!(stats[0].value, 75000.0);
        assert_eq!(stats[2].label(), "Sales");
        assert_eq!(stats[2].value, 41000.0);
    }

    #[test]
    fn test_mean_by_text_column_is_error() {
        let err = mean_by(&people(), &["Gender"], "Dept").unwrap_err();
        assert!(matches!(&err, Error::NonNumeric(c) if c == "Dept"));
        assert_eq!(err.kind(), crate::ErrorKind::Data);

        let empty = Table::new(["Dept", "Salary"]);
        assert!(mean_by(&empty, &["Dept"], "Dept").unwrap().is_empty());
    }

    #[test]
    fn test_rate_by() {
        let stats = rate_by(&people(), &["Dept"], "Left", &Value::from("Yes")).unwrap();
        assert_eq!(stats[0].label(), "Sales");
        assert_eq!(stats[0].value, 1.0);
        assert_eq!(stats[1].value, 0.5);
        assert_eq!(stats[2].label(), "HR");
        assert_eq!(stats[2].value, 0.0);
    }

    #[test]
    fn test_empty_table_aggregates() {
        let t = Table::new(["Dept", "Salary"]);
        assert!(count_by(&t, &["Dept"]).unwrap().is_empty());
        assert!(mean_by(&t, &["Dept"], "Salary").unwrap().is_empty());
        assert_eq!(describe(&t, "Salary").unwrap(), None);
    }

    #[test]
    fn test_unknown_column_errors() {
        assert!(count_by(&people(), &["Nope"]).is_err());
        assert!(mean_by(&people(), &["Dept"], "Nope").is_err());
    }

    #[test]
    fn test_crosstab_fills_zero() {
        let ct = crosstab(&people(), "Dept", "Gender").unwrap();
        assert_eq!(ct.rows, vec![Value::from("HR"), Value::from("IT"), Value::from("Sales")]);
        assert_eq!(ct.get(&"HR".into(), &"M".into()), 0);
        assert_eq!(ct.get(&"Sales".into(), &"M".into()), 2);
        assert_eq!(ct.get(&"IT".into(), &"F".into()), 1);
    }

    #[test]
    fn test_bin_column_left_closed() {
        let mut t = Table::new(["Years"]);
        for y in [0, 1, 2, 5, 15, 40] {
            t.push_row(vec![Value::Int(y)]).unwrap();
        }
        let binned = bin_column(t, "Years", &[0.0, 2.0, 5.0, 30.0], &["0-2", "3-5", "6+"], "Group").unwrap();
        let groups: Vec<_> = binned.column("Group").unwrap().map(ToString::to_string).collect();
        assert_eq!(groups, vec!["0-2", "0-2", "3-5", "6+", "6+", ""]);
    }

    #[test]
    fn test_order_by_labels() {
        let mut t = Table::new(["G"]);
        for g in ["11-15", "3-5", "0-2", "3-5"] {
            t.push_row(vec![g.into()]).unwrap();
        }
        let ordered = order_by_labels(value_counts(&t, "G").unwrap(), &["0-2", "3-5", "6-10", "11-15"]);
        let labels: Vec<_> = ordered.iter().map(GroupStat::label).collect();
        assert_eq!(labels, vec!["0-2", "3-5", "11-15"]);
    }

    #[test]
    fn test_describe_median() {
        let summary = describe(&people(), "Salary").unwrap().unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.median, 50000.0);
        assert_eq!(summary.min, 40000.0);
        assert_eq!(summary.max, 90000.0);
        assert_eq!(summary.mean, 56400.0);
    }

    #[test]
    fn test_describe_by_groups() {
        let by_dept = describe_by(&people(), "Dept", "Salary").unwrap();
        assert_eq!(by_dept.len(), 3);
        assert_eq!(by_dept[1].0, Value::from("IT"));
        assert_eq!(by_dept[1].1.median, 75000.0);
    }
}
