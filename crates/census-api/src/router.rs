//! Axum router construction for the census API.
//!
//! Two route groups share one set of handlers, parameterized by the
//! table descriptor in their state. The governorate table exposes the
//! full surface; the section table omits filtering, name listing, and
//! dot density, mirroring the public dataset's original surface.
//!
//! CORS is deliberately permissive: the dataset is public and the map
//! frontends are served from arbitrary origins.

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use census_db::{DUMANIMAL, PostgresPool, SEC_ANIMAL};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::TableState;

/// Build the complete axum router for the census API.
///
/// The router includes:
/// - `GET /api/dumanimal/*` -- full route group over the governorate table
/// - `GET /api/animals_sec/*` -- reduced route group over the section table
pub fn build_router(pool: &PostgresPool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api/dumanimal", governorate_routes(pool))
        .nest("/api/animals_sec", section_routes(pool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Full route group over `dumanimal`.
fn governorate_routes(pool: &PostgresPool) -> Router {
    Router::new()
        .route("/all-data", get(handlers::all_data))
        .route("/filter", get(handlers::filter))
        .route("/sec-names", get(handlers::sec_names))
        .route("/total-vs-breeders", get(handlers::total_vs_breeders))
        .route("/heads-per-breeder", get(handlers::heads_per_breeder))
        .route(
            "/animal-types-distribution",
            get(handlers::animal_types_distribution),
        )
        .route("/fattening-vs-dairy", get(handlers::fattening_vs_dairy))
        .route(
            "/dot-density-categorized",
            get(handlers::dot_density_categorized),
        )
        .with_state(TableState::new(pool.clone(), &DUMANIMAL))
}

/// Reduced route group over `sec_animal`: no filter, sec-names, or
/// dot-density endpoints.
fn section_routes(pool: &PostgresPool) -> Router {
    Router::new()
        .route("/all-data", get(handlers::all_data))
        .route("/total-vs-breeders", get(handlers::total_vs_breeders))
        .route("/heads-per-breeder", get(handlers::heads_per_breeder))
        .route(
            "/animal-types-distribution",
            get(handlers::animal_types_distribution),
        )
        .route("/fattening-vs-dairy", get(handlers::fattening_vs_dairy))
        .with_state(TableState::new(pool.clone(), &SEC_ANIMAL))
}
