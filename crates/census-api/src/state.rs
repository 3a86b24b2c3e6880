//! Shared application state for the census API server.
//!
//! Each route group carries a [`TableState`]: the injected connection
//! pool plus the static descriptor of the table it serves. Handlers are
//! written once and the router instantiates them per table, so the two
//! near-identical route groups share one implementation.

use census_db::table::CensusTable;
use census_db::{CensusQueries, PostgresPool};

/// Per-route-group state: pool handle plus table descriptor.
///
/// Cloning is cheap; the pool is shared across all clones. There is no
/// other shared state -- every request is an independent read.
#[derive(Clone)]
pub struct TableState {
    /// The injected `PostgreSQL` connection pool.
    pub pool: PostgresPool,
    /// Descriptor of the census table this route group serves.
    pub table: &'static CensusTable,
}

impl TableState {
    /// Create state for one route group.
    #[must_use]
    pub const fn new(pool: PostgresPool, table: &'static CensusTable) -> Self {
        Self { pool, table }
    }

    /// Query handle bound to this group's table.
    pub const fn queries(&self) -> CensusQueries<'_> {
        CensusQueries::new(self.pool.pool(), self.table)
    }
}
