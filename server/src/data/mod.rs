//! Data access layer
//!
//! `sql` holds the pure query-construction pieces, `postgres` the pool
//! management and per-entity repositories, `types` the row shapes shared
//! between them.

pub mod postgres;
pub mod sql;
pub mod types;
