//! REST endpoint handlers for the census API.
//!
//! Handlers are table-agnostic: each reads the [`TableState`] injected by
//! its route group and runs the corresponding query against that group's
//! table. All computation happens in the database; handlers only attach
//! the localized error message and reshape the dot-density rows into a
//! `FeatureCollection`.
//!
//! # Endpoints (per route group)
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/all-data` | Full rows, `geom` as GeoJSON |
//! | `GET` | `/filter` | Rows matching comma-list filters |
//! | `GET` | `/sec-names` | Distinct section names |
//! | `GET` | `/total-vs-breeders` | Totals against breeder counts |
//! | `GET` | `/heads-per-breeder` | Guarded-division ratio |
//! | `GET` | `/animal-types-distribution` | Grouped species sums |
//! | `GET` | `/fattening-vs-dairy` | Fattening vs dairy herds |
//! | `GET` | `/dot-density-categorized` | GeoJSON `FeatureCollection` |

use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::error::{ApiError, messages};
use crate::geojson;
use crate::state::TableState;

/// Query parameters for the `GET /filter` endpoint.
///
/// Both values are comma-separated lists of partial names; either may be
/// omitted.
#[derive(Debug, serde::Deserialize)]
pub struct FilterParams {
    /// Comma-separated section-name fragments.
    pub sec_name: Option<String>,
    /// Comma-separated subsection-name fragments.
    pub ssec_name: Option<String>,
}

/// Return every record with geometry as GeoJSON and coordinates aliased
/// to `latitude`/`longitude`.
pub async fn all_data(State(state): State<TableState>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .all_data()
        .await
        .map_err(|e| ApiError::query(messages::FETCH, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return records matching the comma-list filters; no filters means the
/// full set.
pub async fn filter(
    State(state): State<TableState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .filtered(params.sec_name.as_deref(), params.ssec_name.as_deref())
        .await
        .map_err(|e| ApiError::query(messages::FILTER, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return the distinct, trimmed, non-empty section names, sorted.
pub async fn sec_names(State(state): State<TableState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state
        .queries()
        .sec_names()
        .await
        .map_err(|e| ApiError::query(messages::SEC_NAMES, e))?;
    Ok(Json(names))
}

/// Return totals against breeder counts for records where both exist.
pub async fn total_vs_breeders(State(state): State<TableState>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .total_vs_breeders()
        .await
        .map_err(|e| ApiError::query(messages::FETCH, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return the guarded heads-per-breeder ratio per record.
pub async fn heads_per_breeder(State(state): State<TableState>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .heads_per_breeder()
        .await
        .map_err(|e| ApiError::query(messages::RATIO, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return per-record species sums grouped into cows/buffalo,
/// sheep/goats, and work animals.
pub async fn animal_types_distribution(
    State(state): State<TableState>,
) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .animal_types_distribution()
        .await
        .map_err(|e| ApiError::query(messages::CLASSIFICATION, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return per-record fattening and dairy herd sums.
pub async fn fattening_vs_dairy(State(state): State<TableState>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .queries()
        .fattening_vs_dairy()
        .await
        .map_err(|e| ApiError::query(messages::DISTRIBUTION, e))?;
    Ok(Json(Value::Array(rows)))
}

/// Return the categorized dot-density scatter as a GeoJSON
/// `FeatureCollection`.
pub async fn dot_density_categorized(
    State(state): State<TableState>,
) -> Result<Json<Value>, ApiError> {
    let points = state
        .queries()
        .dot_density_categorized()
        .await
        .map_err(|e| ApiError::query(messages::DOT_DENSITY, e))?;
    Ok(Json(geojson::feature_collection(points)))
}
