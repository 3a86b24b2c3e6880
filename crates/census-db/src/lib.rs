//! PostGIS data layer for the livestock census API.
//!
//! This crate owns everything between the HTTP handlers and
//! `PostgreSQL`:
//!
//! - **Connection pool** ([`PostgresPool`]) with an explicit
//!   startup/shutdown lifecycle, injected into the API state rather
//!   than held as a global.
//! - **Table descriptors** ([`table::CensusTable`]) capturing the
//!   column-name differences between the two census tables so a single
//!   query layer serves both route groups.
//! - **Filter builder** ([`filter::FilterBuilder`]) turning raw
//!   comma-separated query parameters into parameterized ILIKE groups.
//! - **Query layer** ([`CensusQueries`]) where every endpoint is one
//!   parameterized SELECT; ratios, category sums, GeoJSON encoding, and
//!   dot-density point generation are all delegated to the database.
//!
//! All operations are single-statement reads. The pool bounds in-flight
//! queries; an exhausted pool queues acquires, which is the only
//! backpressure in the system.

pub mod error;
pub mod filter;
pub mod postgres;
pub mod store;
pub mod table;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::{CensusQueries, DotPoint};
pub use table::{CensusTable, DOT_DENSITY_CATEGORIES, DUMANIMAL, SEC_ANIMAL};
