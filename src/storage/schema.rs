//! Database schema definitions

/// SQL to create the employees table
pub const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    age INTEGER,
    gender VARCHAR(10),
    department VARCHAR(100),
    education VARCHAR(100),
    location VARCHAR(100),
    salary INTEGER,
    performance INTEGER,
    years_service INTEGER
)
"#;

pub const INSERT_EMPLOYEE: &str = r#"
INSERT INTO employees (age, gender, department, education, location, salary, performance, years_service)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_ALL_EMPLOYEES: &str = r#"
SELECT id, age, gender, department, education, location, salary, performance, years_service
FROM employees
ORDER BY id
"#;

pub const COUNT_EMPLOYEES: &str = "SELECT COUNT(*) FROM employees";

/// Store column name -> display column name
pub const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("id", "ID"),
    ("age", "Age"),
    ("gender", "Gender"),
    ("department", "Department"),
    ("education", "Education"),
    ("location", "Location"),
    ("salary", "Salary"),
    ("performance", "Performance"),
    ("years_service", "YearsService"),
];

pub fn display_name(internal: &str) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(i, _)| *i == internal)
        .map(|(_, d)| *d)
}

pub fn internal_name(display: &str) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(_, d)| *d == display)
        .map(|(i, _)| *i)
}

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_EMPLOYEES_TABLE]
}
