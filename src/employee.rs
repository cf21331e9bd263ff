//! Stored employee record

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dataset::DEPARTMENTS;
use crate::{Error, Result};

pub const EDUCATION_LEVELS: &[&str] = &["High School", "Bachelor's", "Master's", "PhD"];
pub const LOCATIONS: &[&str] = &["New York", "San Francisco", "Chicago", "Austin", "Remote"];

/// One employee as inserted into the store (id is assigned on insert)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub age: i64,
    pub gender: String,
    pub department: String,
    pub education: String,
    pub location: String,
    pub salary: i64,
    pub performance: i64,
    pub years_service: i64,
}

impl EmployeeRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: i64,
        gender: &str,
        department: &str,
        education: &str,
        location: &str,
        salary: i64,
        performance: i64,
        years_service: i64,
    ) -> Self {
        Self {
            age,
            gender: gender.to_string(),
            department: department.to_string(),
            education: education.to_string(),
            location: location.to_string(),
            salary,
            performance,
            years_service,
        }
    }

    /// Check the column constraints of the employees table
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.performance) {
            return Err(Error::InvalidRecord(format!(
                "performance {} outside 1-5",
                self.performance
            )));
        }
        if self.years_service < 0 {
            return Err(Error::InvalidRecord(format!(
                "negative years_service {}",
                self.years_service
            )));
        }
        let widths = [
            ("gender", &self.gender, 10),
            ("department", &self.department, 100),
            ("education", &self.education, 100),
            ("location", &self.location, 100),
        ];
        for (field, value, max) in widths {
            if value.chars().count() > max {
                return Err(Error::InvalidRecord(format!(
                    "{} longer than {} characters",
                    field, max
                )));
            }
        }
        Ok(())
    }
}

impl From<(i64, &str, &str, &str, &str, i64, i64, i64)> for EmployeeRecord {
    fn from(t: (i64, &str, &str, &str, &str, i64, i64, i64)) -> Self {
        Self::new(t.0, t.1, t.2, t.3, t.4, t.5, t.6, t.7)
    }
}

/// Generate `n` storage-schema employees for seeding, deterministic per `seed`
pub fn sample_records(n: usize, seed: u64) -> Vec<EmployeeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| EmployeeRecord {
            age: rng.gen_range(22..60),
            gender: pick(&mut rng, &["Male", "Female"]),
            department: pick(&mut rng, DEPARTMENTS),
            education: pick(&mut rng, EDUCATION_LEVELS),
            location: pick(&mut rng, LOCATIONS),
            salary: rng.gen_range(30_000..120_000),
            performance: rng.gen_range(1..6),
            years_service: rng.gen_range(0..20),
        })
        .collect()
}

fn pick(rng: &mut StdRng, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_performance_domain() {
        let mut record = EmployeeRecord::from((30, "Male", "IT", "BSc", "NY", 60000, 4, 2));
        assert!(record.validate().is_ok());

        record.performance = 6;
        assert!(matches!(record.validate(), Err(Error::InvalidRecord(_))));

        record.performance = 0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_years_and_widths() {
        let mut record = EmployeeRecord::from((30, "Male", "IT", "BSc", "NY", 60000, 4, 0));
        assert!(record.validate().is_ok());

        record.years_service = -1;
        assert!(record.validate().is_err());

        record.years_service = 1;
        record.gender = "x".repeat(11);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_sample_records_deterministic_and_valid() {
        let a = sample_records(50, 7);
        let b = sample_records(50, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        for record in &a {
            record.validate().unwrap();
            assert!((22..60).contains(&record.age));
            assert!((30_000..120_000).contains(&record.salary));
        }
    }
}
