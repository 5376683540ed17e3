//! JobDesk server library
//!
//! A job-board REST API over PostgreSQL: companies and the jobs they post,
//! with whitelisted filtering and partial updates built as parameterized
//! SQL fragments.

pub mod api;
mod app;
pub mod core;
pub mod data;
