//! Row types for the salary star schema.

/// Employer dimension row; `(name, sector)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: i32,
    pub name: String,
    pub sector: String,
}

/// Individual dimension row; `(last_name, first_name, job_title)` is the
/// natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub job_title: String,
}

/// Salary fact row keyed by `(employer_id, individual_id, year)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryFact {
    pub employer_id: i32,
    pub individual_id: i32,
    pub year: i32,
    pub salary: f64,
    pub benefits: f64,
}

/// Raw CSV column order, matched by position.
pub const RAW_COLUMNS: [&str; 8] = [
    "sector",
    "last_name",
    "first_name",
    "salary",
    "benefits",
    "employer_name",
    "job_title",
    "year",
];
