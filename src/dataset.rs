//! Presentation-schema HR dataset
//!
//! The dashboard works on its own generated sample rather than the stored
//! employees; the two schemas are not reconciled here.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::table::{Table, Value};

pub const DEPARTMENTS: &[&str] = &[
    "Sales",
    "IT",
    "R&D",
    "HR",
    "Finance",
    "Marketing",
    "Operations",
    "Customer Service",
];

pub const JOB_ROLES: &[&str] = &["Manager", "Senior", "Junior", "Intern"];
pub const GENDERS: &[&str] = &["Male", "Female"];

pub const DEFAULT_SAMPLE_SIZE: usize = 200;
pub const DEFAULT_SEED: u64 = 42;

/// Column names of the presentation schema
pub mod columns {
    pub const EMPLOYEE_ID: &str = "EmployeeID";
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const DEPARTMENT: &str = "Department";
    pub const JOB_ROLE: &str = "JobRole";
    pub const SALARY: &str = "Salary";
    pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";
    pub const JOB_SATISFACTION: &str = "JobSatisfaction";
    pub const PERFORMANCE_RATING: &str = "PerformanceRating";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
    pub const ATTRITION: &str = "Attrition";

    pub const ALL: [&str; 11] = [
        EMPLOYEE_ID,
        AGE,
        GENDER,
        DEPARTMENT,
        JOB_ROLE,
        SALARY,
        YEARS_AT_COMPANY,
        JOB_SATISFACTION,
        PERFORMANCE_RATING,
        WORK_LIFE_BALANCE,
        ATTRITION,
    ];
}

pub const ATTRITION_YES: &str = "Yes";
pub const ATTRITION_NO: &str = "No";

/// One employee in the dashboard's dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HrRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    pub age: i64,
    pub gender: String,
    pub department: String,
    pub job_role: String,
    pub salary: i64,
    pub years_at_company: i64,
    pub job_satisfaction: i64,
    pub performance_rating: i64,
    pub work_life_balance: i64,
    pub attrition: bool,
}

impl HrRecord {
    fn to_row(&self) -> [Value; columns::ALL.len()] {
        [
            Value::Int(self.employee_id),
            Value::Int(self.age),
            Value::from(self.gender.as_str()),
            Value::from(self.department.as_str()),
            Value::from(self.job_role.as_str()),
            Value::Int(self.salary),
            Value::Int(self.years_at_company),
            Value::Int(self.job_satisfaction),
            Value::Int(self.performance_rating),
            Value::Int(self.work_life_balance),
            Value::from(if self.attrition { ATTRITION_YES } else { ATTRITION_NO }),
        ]
    }
}

/// Probability that an employee has left, from satisfaction, salary and tenure
pub fn attrition_probability(job_satisfaction: i64, salary: i64, years_at_company: i64) -> f64 {
    let mut p = 0.15 + (5 - job_satisfaction) as f64 * 0.05;
    if salary < 50_000 {
        p += 0.1;
    }
    if years_at_company < 2 {
        p += 0.1;
    }
    p.clamp(0.05, 0.8)
}

/// Generate `n` employees, deterministic per `seed`
pub fn generate(n: usize, seed: u64) -> Vec<HrRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n as i64)
        .map(|employee_id| {
            let age = rng.gen_range(22..60);
            let gender = pick(&mut rng, GENDERS);
            let department = pick(&mut rng, DEPARTMENTS);
            let job_role = pick(&mut rng, JOB_ROLES);
            let salary = rng.gen_range(30_000..120_000);
            let years_at_company = rng.gen_range(0..20);
            let job_satisfaction = rng.gen_range(1..5);
            let performance_rating = rng.gen_range(1..6);
            let work_life_balance = rng.gen_range(1..5);
            let p = attrition_probability(job_satisfaction, salary, years_at_company);

            HrRecord {
                employee_id,
                age,
                gender,
                department,
                job_role,
                salary,
                years_at_company,
                job_satisfaction,
                performance_rating,
                work_life_balance,
                attrition: rng.gen_bool(p),
            }
        })
        .collect()
}

fn pick(rng: &mut StdRng, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

/// Build the presentation table from records
pub fn to_table(records: &[HrRecord]) -> Table {
    Table::from_rows(columns::ALL, records.iter().map(HrRecord::to_row))
}

/// The default dashboard dataset
pub fn sample_table(n: usize, seed: u64) -> Table {
    to_table(&generate(n, seed))
}
