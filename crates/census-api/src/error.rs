//! Error type for the census API layer.
//!
//! Every database failure maps to the same outward shape: HTTP 500 with
//! a JSON body `{"error": "<localized message>"}`. The caller-facing
//! message is a fixed per-endpoint string (Arabic, matching the public
//! dataset's frontend); the underlying cause is logged server-side only
//! and never leaks into the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use census_db::DbError;

/// Localized caller-facing messages, one per endpoint family.
pub mod messages {
    /// Data retrieval failed (`all-data`, `total-vs-breeders`).
    pub const FETCH: &str = "خطأ في استرجاع البيانات";
    /// Filtering failed.
    pub const FILTER: &str = "حدث خطأ أثناء التصفية";
    /// Fetching section names failed.
    pub const SEC_NAMES: &str = "حدث خطأ أثناء جلب أسماء الأقسام";
    /// Ratio computation failed.
    pub const RATIO: &str = "خطأ في الحساب";
    /// Animal-type classification failed.
    pub const CLASSIFICATION: &str = "خطأ في التصنيف";
    /// Fattening/dairy distribution failed.
    pub const DISTRIBUTION: &str = "خطأ في التوزيع";
    /// Dot-density point generation failed.
    pub const DOT_DENSITY: &str = "فشل في توليد النقاط المصنفة";
}

/// A failed request: a per-endpoint localized message plus the
/// database-level cause.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Fixed localized message returned to the caller.
    message: &'static str,
    /// The underlying data-layer failure, logged but never returned.
    #[source]
    source: DbError,
}

impl ApiError {
    /// Wrap a data-layer failure with the endpoint's localized message.
    pub const fn query(message: &'static str, source: DbError) -> Self {
        Self { message, source }
    }

    /// The caller-facing message.
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.source, "census query failed");

        let body = serde_json::json!({ "error": self.message });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
