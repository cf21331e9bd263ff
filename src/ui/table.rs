use tabled::{builder::Builder, settings::Style};

use crate::aggregate::{CrossTab, GroupStat, NumericSummary};
use crate::table::{Table, Value};

/// Render a dataset with its header row
pub fn dataset_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().map(ToString::to_string));
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Render grouped stats as `key | metric_name`, formatting each metric with `fmt`
pub fn group_table(
    key_name: &str,
    metric_name: &str,
    stats: &[GroupStat],
    fmt: impl Fn(f64) -> String,
) -> String {
    let mut builder = Builder::default();
    builder.push_record([key_name.to_string(), metric_name.to_string()]);
    for s in stats {
        builder.push_record([s.label(), fmt(s.value)]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Per-group spread: `key | Min | Median | Max | Count`
pub fn summary_table(
    key_name: &str,
    groups: &[(Value, NumericSummary)],
    fmt: impl Fn(f64) -> String,
) -> String {
    let mut builder = Builder::default();
    builder.push_record([key_name, "Min", "Median", "Max", "Count"].map(String::from));
    for (key, s) in groups {
        builder.push_record([
            key.to_string(),
            fmt(s.min),
            fmt(s.median),
            fmt(s.max),
            s.count.to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

pub fn crosstab_table(corner: &str, ct: &CrossTab) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(corner.to_string()).chain(ct.columns.iter().map(ToString::to_string)),
    );
    for (row, counts) in ct.rows.iter().zip(&ct.counts) {
        builder.push_record(
            std::iter::once(row.to_string()).chain(counts.iter().map(ToString::to_string)),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_table_has_header() {
        let mut t = Table::new(["Department", "Salary"]);
        t.push_row(vec![Value::from("IT"), Value::Int(75000)]).unwrap();
        let rendered = dataset_table(&t);
        assert!(rendered.contains("Department"));
        assert!(rendered.contains("75000"));
    }

    #[test]
    fn test_group_table_formats_metric() {
        let stats = vec![GroupStat {
            key: vec![Value::from("HR")],
            value: 12.345,
            size: 4,
        }];
        let rendered = group_table("Department", "Rate", &stats, |v| format!("{:.1}%", v));
        assert!(rendered.contains("12.3%"));
    }

    #[test]
    fn test_summary_table_rows() {
        let groups = vec![(
            Value::from("IT"),
            NumericSummary {
                count: 2,
                mean: 75000.0,
                median: 75000.0,
                min: 60000.0,
                max: 90000.0,
            },
        )];
        let rendered = summary_table("Department", &groups, |v| format!("${}", v));
        let lines: Vec<&str> = rendered.lines().collect();
        for col in ["Department", "Min", "Median", "Max", "Count"] {
            assert!(lines[1].contains(col));
        }
        let row = lines[3];
        assert!(row.contains("IT"));
        assert!(row.contains("$60000") && row.contains("$75000") && row.contains("$90000"));
        assert!(row.contains(" 2 "));
    }
}
