//! Dynamic SQL construction
//!
//! Builds parameterized WHERE and SET fragments for the company and job
//! collections. Fragments carry SQL text only; every user-supplied value
//! flows out through the positional parameter list and is bound separately,
//! never interpolated into the text.
//!
//! All builders here are pure and synchronous. Validation errors
//! ([`QueryError`]) are raised before anything reaches the database.

pub mod error;
pub mod filter;
pub mod update;
pub mod value;

pub use error::QueryError;
pub use filter::{CompanyFilters, JobFilters, WhereClause};
pub use update::{COMPANY_UPDATE_COLUMNS, JOB_UPDATE_COLUMNS, PartialUpdate};
pub use value::{SqlType, SqlValue};
