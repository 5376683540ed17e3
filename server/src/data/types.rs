//! Row types shared between repositories and the API layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row from the companies table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: i64,
    pub logo_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A row from the jobs table.
///
/// Jobs have no surrogate id; `(title, company_handle)` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRow {
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub created_at: i64,
    pub updated_at: i64,
}
