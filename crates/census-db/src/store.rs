//! Parameterized read queries over one census table.
//!
//! Every endpoint is a single SELECT; ratios, category sums, and point
//! generation are all computed inside `PostgreSQL`/PostGIS. Row-shaped
//! results are projected to a single `jsonb` column in the database
//! (`to_jsonb`/`jsonb_build_object`) and decoded as [`serde_json::Value`],
//! so the application never interprets geometry or column types itself.

use std::collections::BTreeSet;

use serde_json::Value;
use sqlx::PgPool;

use crate::error::DbError;
use crate::filter::FilterBuilder;
use crate::table::{CensusTable, DOT_DENSITY_CATEGORIES};

/// One synthesized dot-density point, pre-serialized by PostGIS.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DotPoint {
    /// Section name of the source record.
    pub sec_name: Option<String>,
    /// Dot-density category label.
    pub category: String,
    /// GeoJSON point geometry.
    pub geom: Value,
}

/// Read queries bound to a connection pool and a table descriptor.
pub struct CensusQueries<'a> {
    pool: &'a PgPool,
    table: &'static CensusTable,
}

impl<'a> CensusQueries<'a> {
    /// Create a query handle for one census table.
    pub const fn new(pool: &'a PgPool, table: &'static CensusTable) -> Self {
        Self { pool, table }
    }

    /// Fetch every record in the table.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn all_data(&self) -> Result<Vec<Value>, DbError> {
        let sql = format!(
            "SELECT {projection} FROM {table} t",
            projection = record_projection(self.table),
            table = self.table.name,
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch records matching the given comma-separated filters.
    ///
    /// Each filter is an OR group of case-insensitive substring matches;
    /// groups are conjoined with AND. A missing filter leaves that field
    /// unconstrained, so no filters at all returns the full set.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn filtered(
        &self,
        sec_name: Option<&str>,
        ssec_name: Option<&str>,
    ) -> Result<Vec<Value>, DbError> {
        let filter = FilterBuilder::new()
            .ilike_any("sec_name", sec_name)
            .ilike_any("ssec_name", ssec_name);

        let sql = format!(
            "SELECT {projection} FROM {table} t{where_clause}",
            projection = record_projection(self.table),
            table = self.table.name,
            where_clause = filter.where_clause(),
        );

        let mut query = sqlx::query_scalar::<_, Value>(&sql);
        for pattern in filter.patterns() {
            query = query.bind(pattern.as_str());
        }
        let rows = query.fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Distinct non-null section names: trimmed, empties dropped,
    /// deduplicated after trimming, sorted lexicographically.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn sec_names(&self) -> Result<Vec<String>, DbError> {
        let sql = format!(
            "SELECT DISTINCT sec_name FROM {table} WHERE sec_name IS NOT NULL",
            table = self.table.name,
        );
        let raw = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(self.pool)
            .await?;

        // Distinct-scan order is unspecified; a BTreeSet both dedupes
        // post-trim collisions and yields a deterministic order.
        let names: BTreeSet<String> = raw
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Totals against breeder counts, for records where both are present.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn total_vs_breeders(&self) -> Result<Vec<Value>, DbError> {
        let sql = format!(
            "SELECT jsonb_build_object(\
             'sec_name', sec_name, \
             'total', total, \
             'breeders', {breeders}, \
             'latitude', {lat}, \
             'longitude', {lon}, \
             'geom', ST_AsGeoJSON(geom)::jsonb) \
             FROM {table} \
             WHERE total IS NOT NULL AND {breeders} IS NOT NULL",
            breeders = self.table.breeders_col,
            lat = self.table.latitude_col,
            lon = self.table.longitude_col,
            table = self.table.name,
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Heads-per-breeder ratio with guarded division: 0 when the breeder
    /// count is NULL or zero, otherwise rounded to 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn heads_per_breeder(&self) -> Result<Vec<Value>, DbError> {
        let sql = format!(
            "SELECT jsonb_build_object(\
             'sec_name', sec_name, \
             'total', total, \
             'breeders', {breeders}, \
             'latitude', {lat}, \
             'longitude', {lon}, \
             'heads_per_breeder', {ratio}, \
             'geom', ST_AsGeoJSON(geom)::jsonb) \
             FROM {table} \
             WHERE total IS NOT NULL AND {breeders} IS NOT NULL",
            breeders = self.table.breeders_col,
            lat = self.table.latitude_col,
            lon = self.table.longitude_col,
            ratio = self.table.heads_per_breeder_expr(),
            table = self.table.name,
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Species counts grouped into cows/buffalo, sheep/goats, and work
    /// animals. NULL counts propagate through the sums per SQL
    /// arithmetic; they are not clamped to zero.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn animal_types_distribution(&self) -> Result<Vec<Value>, DbError> {
        let sql = format!(
            "SELECT jsonb_build_object(\
             'sec_name', sec_name, \
             'latitude', {lat}, \
             'longitude', {lon}, \
             'cows_buffalo', (local_cow_females + imported_cow_females + buffalo_females), \
             'sheep_goats', (sheep + goats), \
             'work_animals', (camels + pack_animals), \
             'geom', ST_AsGeoJSON(geom)::jsonb) \
             FROM {table}",
            lat = self.table.latitude_col,
            lon = self.table.longitude_col,
            table = self.table.name,
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Fattening herd size against the dairy herd, per record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fattening_vs_dairy(&self) -> Result<Vec<Value>, DbError> {
        let sql = format!(
            "SELECT jsonb_build_object(\
             'sec_name', sec_name, \
             'latitude', {lat}, \
             'longitude', {lon}, \
             'fattening', (local_cow_fattening + imported_cow_fattening + buffalo_fattening), \
             'dairy', (local_cow_females + imported_cow_females + buffalo_females), \
             'geom', ST_AsGeoJSON(geom)::jsonb) \
             FROM {table}",
            lat = self.table.latitude_col,
            lon = self.table.longitude_col,
            table = self.table.name,
        );
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Synthesize categorized dot-density points inside each record's
    /// polygon.
    ///
    /// For each category, each record contributes
    /// `LEAST(500, GREATEST(1, count / 20))` pseudo-random points via
    /// `ST_GeneratePoints`, and is excluded entirely when its count is
    /// zero or less. All category branches are concatenated with
    /// `UNION ALL`, preserving category order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn dot_density_categorized(&self) -> Result<Vec<DotPoint>, DbError> {
        let branches: Vec<String> = DOT_DENSITY_CATEGORIES
            .iter()
            .map(|category| {
                format!(
                    "SELECT sec_name, '{name}' AS category, \
                     ST_AsGeoJSON((ST_Dump(ST_GeneratePoints(\
                     geom, LEAST(500, GREATEST(1, {count} / 20)))))\
                     .geom)::jsonb AS geom \
                     FROM {table} WHERE {count} > 0",
                    name = category.name,
                    count = category.count_expr,
                    table = self.table.name,
                )
            })
            .collect();
        let sql = branches.join(" UNION ALL ");

        let points = sqlx::query_as::<_, DotPoint>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(points)
    }
}

/// Full-record projection: every column, `geom` replaced by its GeoJSON
/// form, coordinates aliased to `latitude`/`longitude`. For `sec_animal`
/// the coordinate columns already carry those names and the merge is a
/// no-op.
fn record_projection(table: &CensusTable) -> String {
    format!(
        "(to_jsonb(t) - 'geom') || jsonb_build_object(\
         'geom', ST_AsGeoJSON(t.geom)::jsonb, \
         'latitude', t.{lat}, \
         'longitude', t.{lon})",
        lat = table.latitude_col,
        lon = table.longitude_col,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DUMANIMAL, SEC_ANIMAL};

    // SQL text assertions only; execution is covered by the live-database
    // integration tests.

    #[test]
    fn record_projection_aliases_coordinates() {
        let projection = record_projection(&DUMANIMAL);
        assert!(projection.contains("'latitude', t.y_coord"));
        assert!(projection.contains("'longitude', t.x_coord"));
        assert!(projection.contains("ST_AsGeoJSON(t.geom)::jsonb"));
        assert!(projection.contains("- 'geom'"));
    }

    #[test]
    fn sec_animal_projection_uses_native_coordinate_columns() {
        let projection = record_projection(&SEC_ANIMAL);
        assert!(projection.contains("'latitude', t.latitude"));
        assert!(projection.contains("'longitude', t.longitude"));
    }
}
