//! HTTP API server for the livestock census data layer.
//!
//! This crate provides an axum HTTP server exposing read-only census
//! endpoints over two PostGIS-backed tables:
//!
//! - **Raw records** with geometry pre-serialized to GeoJSON
//! - **Filtered retrieval** from comma-separated partial-name filters
//! - **Ratio and aggregate views** (guarded heads-per-breeder division,
//!   grouped species sums) computed inside the database
//! - **Dot-density synthesis** wrapping `ST_GeneratePoints` output into
//!   a GeoJSON `FeatureCollection`
//!
//! # Architecture
//!
//! Handlers are written once and instantiated per route group with a
//! [`state::TableState`] carrying the table's column-mapping descriptor,
//! so the two near-identical groups share one implementation. Every
//! failure surfaces as HTTP 500 with a fixed localized message; details
//! stay in the server log.

pub mod error;
pub mod geojson;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::TableState;
