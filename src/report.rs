//! Dashboard panel data
//!
//! Everything the dashboard tabs plot, computed from an already filtered
//! presentation-schema table. Rates are reported in percent.

use serde::Serialize;

use crate::aggregate::{self, CrossTab, GroupStat, NumericSummary, round1};
use crate::dataset::{ATTRITION_NO, ATTRITION_YES, columns};
use crate::table::{Table, Value};
use crate::Result;

pub const AGE_GROUP: &str = "AgeGroup";
pub const SERVICE_GROUP: &str = "ServiceGroup";

pub const AGE_EDGES: &[f64] = &[20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
pub const AGE_LABELS: &[&str] = &["20-29", "30-39", "40-49", "50-59", "60+"];
pub const SERVICE_EDGES: &[f64] = &[0.0, 2.0, 5.0, 10.0, 15.0, 30.0];
pub const SERVICE_LABELS: &[&str] = &["0-2", "3-5", "6-10", "11-15", "16+"];

pub fn performance_label(rating: i64) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Below Average",
        3 => "Average",
        4 => "Good",
        5 => "Excellent",
        _ => "Unrated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub employees: usize,
    pub departments: usize,
    pub job_roles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_employees: usize,
    pub active_employees: usize,
    pub attrition_count: usize,
    pub attrition_rate: f64,
    pub avg_performance: f64,
    pub avg_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub kpis: Kpis,
    pub headcount_by_department: Vec<GroupStat>,
    pub gender_breakdown: Vec<GroupStat>,
    pub performance_by_department: Vec<GroupStat>,
    pub salary_by_department: Vec<(Value, NumericSummary)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub age_by_gender: CrossTab,
    pub tenure_distribution: Vec<GroupStat>,
    pub roles_by_department: CrossTab,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: i64,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub rating_distribution: Vec<RatingCount>,
    pub performance_by_role: Vec<GroupStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attrition {
    pub total_employees: usize,
    pub attrition_count: usize,
    pub attrition_rate: f64,
    pub by_department: Vec<GroupStat>,
    pub by_job_role: Vec<GroupStat>,
    pub by_satisfaction: Vec<GroupStat>,
    pub by_performance: Vec<GroupStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compensation {
    pub salary: Option<NumericSummary>,
    pub by_department: Vec<GroupStat>,
    pub by_job_role: Vec<GroupStat>,
    pub by_department_gender: Vec<GroupStat>,
    pub by_performance: Vec<(Value, NumericSummary)>,
}

/// All dashboard tabs for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: Summary,
    pub overview: Overview,
    pub demographics: Demographics,
    pub performance: Performance,
    pub attrition: Attrition,
    pub compensation: Compensation,
}

impl DashboardReport {
    pub fn build(table: &Table) -> Result<Self> {
        let kpis = kpis(table)?;
        Ok(Self {
            summary: Summary {
                employees: table.len(),
                departments: aggregate::distinct(table, columns::DEPARTMENT)?.len(),
                job_roles: aggregate::distinct(table, columns::JOB_ROLE)?.len(),
            },
            attrition: attrition(table, &kpis)?,
            overview: overview(table, kpis)?,
            demographics: demographics(table)?,
            performance: performance(table)?,
            compensation: compensation(table)?,
        })
    }
}

fn mean(table: &Table, col: &str) -> Result<f64> {
    Ok(aggregate::describe(table, col)?.map(|s| s.mean).unwrap_or(0.0))
}

fn percent(stats: Vec<GroupStat>) -> Vec<GroupStat> {
    stats
        .into_iter()
        .map(|s| GroupStat {
            value: s.value * 100.0,
            ..s
        })
        .collect()
}

fn attrition_rate_by(table: &Table, col: &str) -> Result<Vec<GroupStat>> {
    let yes = Value::from(ATTRITION_YES);
    Ok(percent(aggregate::rate_by(table, &[col], columns::ATTRITION, &yes)?))
}

fn kpis(table: &Table) -> Result<Kpis> {
    let outcomes: Vec<&Value> = table.column(columns::ATTRITION)?.collect();
    let attrition_count = outcomes.iter().filter(|v| v.as_str() == Some(ATTRITION_YES)).count();
    let active_employees = outcomes.iter().filter(|v| v.as_str() == Some(ATTRITION_NO)).count();

    Ok(Kpis {
        total_employees: table.len(),
        active_employees,
        attrition_count,
        attrition_rate: round1(aggregate::rate(attrition_count, table.len()) * 100.0),
        avg_performance: round1(mean(table, columns::PERFORMANCE_RATING)?),
        avg_satisfaction: round1(mean(table, columns::JOB_SATISFACTION)?),
    })
}

fn overview(table: &Table, kpis: Kpis) -> Result<Overview> {
    Ok(Overview {
        kpis,
        headcount_by_department: aggregate::value_counts(table, columns::DEPARTMENT)?,
        gender_breakdown: aggregate::value_counts(table, columns::GENDER)?,
        performance_by_department: aggregate::mean_by(
            table,
            &[columns::DEPARTMENT],
            columns::PERFORMANCE_RATING,
        )?,
        salary_by_department: aggregate::describe_by(table, columns::DEPARTMENT, columns::SALARY)?,
    })
}

fn demographics(table: &Table) -> Result<Demographics> {
    let binned = aggregate::bin_column(table.clone(), columns::AGE, AGE_EDGES, AGE_LABELS, AGE_GROUP)?;
    let binned = aggregate::bin_column(
        binned,
        columns::YEARS_AT_COMPANY,
        SERVICE_EDGES,
        SERVICE_LABELS,
        SERVICE_GROUP,
    )?;

    let tenure = aggregate::value_counts(&binned, SERVICE_GROUP)?
        .into_iter()
        .filter(|s| s.key.iter().all(|k| !k.is_null()))
        .collect();

    Ok(Demographics {
        age_by_gender: aggregate::crosstab(&binned, AGE_GROUP, columns::GENDER)?,
        tenure_distribution: aggregate::order_by_labels(tenure, SERVICE_LABELS),
        roles_by_department: aggregate::crosstab(table, columns::DEPARTMENT, columns::JOB_ROLE)?,
    })
}

fn performance(table: &Table) -> Result<Performance> {
    let counts = aggregate::sort_by_key(aggregate::value_counts(table, columns::PERFORMANCE_RATING)?);
    let rating_distribution = counts
        .iter()
        .filter_map(|s| {
            let rating = s.key.first()?.as_i64()?;
            Some(RatingCount {
                rating,
                label: performance_label(rating),
                count: s.size,
            })
        })
        .collect();

    Ok(Performance {
        rating_distribution,
        performance_by_role: aggregate::mean_by(
            table,
            &[columns::JOB_ROLE],
            columns::PERFORMANCE_RATING,
        )?,
    })
}

fn attrition(table: &Table, kpis: &Kpis) -> Result<Attrition> {
    Ok(Attrition {
        total_employees: kpis.total_employees,
        attrition_count: kpis.attrition_count,
        attrition_rate: kpis.attrition_rate,
        by_department: attrition_rate_by(table, columns::DEPARTMENT)?,
        by_job_role: attrition_rate_by(table, columns::JOB_ROLE)?,
        by_satisfaction: aggregate::sort_by_key(attrition_rate_by(table, columns::JOB_SATISFACTION)?),
        by_performance: aggregate::sort_by_key(attrition_rate_by(table, columns::PERFORMANCE_RATING)?),
    })
}

fn compensation(table: &Table) -> Result<Compensation> {
    Ok(Compensation {
        salary: aggregate::describe(table, columns::SALARY)?,
        by_department: aggregate::mean_by(table, &[columns::DEPARTMENT], columns::SALARY)?,
        by_job_role: aggregate::mean_by(table, &[columns::JOB_ROLE], columns::SALARY)?,
        by_department_gender: aggregate::sort_by_key(aggregate::mean_by(
            table,
            &[columns::DEPARTMENT, columns::GENDER],
            columns::SALARY,
        )?),
        by_performance: aggregate::describe_by(table, columns::PERFORMANCE_RATING, columns::SALARY)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{self, HrRecord};
    use crate::filter::DashboardFilter;

    fn record(id: i64, dept: &str, role: &str, salary: i64, years: i64, perf: i64, left: bool) -> HrRecord {
        HrRecord {
            employee_id: id,
            age: 25 + id * 7,
            gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
            department: dept.to_string(),
            job_role: role.to_string(),
            salary,
            years_at_company: years,
            job_satisfaction: 3,
            performance_rating: perf,
            work_life_balance: 2,
            attrition: left,
        }
    }

    fn small_table() -> Table {
        dataset::to_table(&[
            record(1, "IT", "Senior", 80000, 1, 4, true),
            record(2, "IT", "Junior", 40000, 3, 2, false),
            record(3, "HR", "Manager", 70000, 12, 5, false),
            record(4, "Sales", "Junior", 45000, 0, 3, true),
        ])
    }

    #[test]
    fn test_kpis() {
        let report = DashboardReport::build(&small_table()).unwrap();
        let kpis = &report.overview.kpis;
        assert_eq!(kpis.total_employees, 4);
        assert_eq!(kpis.active_employees, 2);
        assert_eq!(kpis.attrition_count, 2);
        assert_eq!(kpis.attrition_rate, 50.0);
        assert_eq!(kpis.avg_performance, 3.5);
        assert_eq!(kpis.avg_satisfaction, 3.0);
        assert_eq!(report.summary.departments, 3);
        assert_eq!(report.summary.job_roles, 3);
    }

    #[test]
    fn test_attrition_rates_percent() {
        let report = DashboardReport::build(&small_table()).unwrap();
        let by_dept = &report.attrition.by_department;
        assert_eq!(by_dept[0].label(), "Sales");
        assert_eq!(by_dept[0].value, 100.0);
        assert_eq!(by_dept[1].label(), "IT");
        assert_eq!(by_dept[1].value, 50.0);
        assert_eq!(by_dept[2].label(), "HR");
        assert_eq!(by_dept[2].value, 0.0);

        let by_perf: Vec<_> = report.attrition.by_performance.iter().map(GroupStat::label).collect();
        assert_eq!(by_perf, vec!["2", "3", "4", "5"]);
    }

    #[test]
    fn test_tenure_in_label_order() {
        let report = DashboardReport::build(&small_table()).unwrap();
        let tenure: Vec<_> = report
            .demographics
            .tenure_distribution
            .iter()
            .map(|s| (s.label(), s.size))
            .collect();
        assert_eq!(
            tenure,
            vec![("0-2".to_string(), 2), ("3-5".to_string(), 1), ("11-15".to_string(), 1)]
        );
    }

    #[test]
    fn test_rating_distribution_labels() {
        let report = DashboardReport::build(&small_table()).unwrap();
        let ratings: Vec<_> = report
            .performance
            .rating_distribution
            .iter()
            .map(|r| (r.rating, r.label))
            .collect();
        assert_eq!(ratings, vec![(2, "Below Average"), (3, "Average"), (4, "Good"), (5, "Excellent")]);
    }

    #[test]
    fn test_compensation() {
        let report = DashboardReport::build(&small_table()).unwrap();
        let salary = report.compensation.salary.as_ref().unwrap();
        assert_eq!(salary.mean, 58750.0);
        assert_eq!(salary.median, 57500.0);
        assert_eq!(salary.min, 40000.0);
        assert_eq!(salary.max, 80000.0);
        assert_eq!(report.compensation.by_department[0].label(), "HR");
        assert_eq!(report.compensation.by_department[1].value, 60000.0);
    }

    #[test]
    fn test_empty_selection_report() {
        let table = dataset::sample_table(100, 42);
        let filter = DashboardFilter {
            departments: Some(vec![]),
            ..Default::default()
        };
        let report = DashboardReport::build(&filter.apply(&table).unwrap()).unwrap();
        assert_eq!(report.summary.employees, 0);
        assert_eq!(report.overview.kpis.attrition_rate, 0.0);
        assert!(report.attrition.by_department.is_empty());
        assert!(report.compensation.salary.is_none());
        assert!(report.demographics.age_by_gender.rows.is_empty());
    }

    #[test]
    fn test_full_sample_consistency() {
        let table = dataset::sample_table(200, 42);
        let report = DashboardReport::build(&table).unwrap();
        let headcount: f64 = report.overview.headcount_by_department.iter().map(|s| s.value).sum();
        assert_eq!(headcount as usize, 200);
        assert_eq!(
            report.overview.kpis.active_employees + report.overview.kpis.attrition_count,
            200
        );
        let crossed: usize = report.demographics.roles_by_department.counts.iter().flatten().sum();
        assert_eq!(crossed, 200);
    }
}
