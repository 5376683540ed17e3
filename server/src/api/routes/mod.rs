//! API route modules

pub mod companies;
pub mod health;
pub mod jobs;
