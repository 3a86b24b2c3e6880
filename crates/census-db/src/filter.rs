//! WHERE-clause construction for the filtered retrieval endpoint.
//!
//! Callers pass raw comma-separated filter strings straight from the
//! query string. Each recognized field becomes an OR group of
//! case-insensitive substring matches, and groups are conjoined with
//! AND. Values are never interpolated into the SQL text; the builder
//! emits `$n` placeholders and collects the bind patterns separately.

/// Accumulates ILIKE filter groups and their bind parameters.
///
/// ```
/// use census_db::filter::FilterBuilder;
///
/// let filter = FilterBuilder::new()
///     .ilike_any("sec_name", Some("Giza, Cairo"))
///     .ilike_any("ssec_name", None);
/// assert_eq!(
///     filter.where_clause(),
///     " WHERE 1=1 AND (COALESCE(sec_name, '') ILIKE $1 OR COALESCE(sec_name, '') ILIKE $2)"
/// );
/// assert_eq!(filter.patterns(), ["%Giza%", "%Cairo%"]);
/// ```
#[derive(Debug, Default)]
pub struct FilterBuilder {
    groups: Vec<String>,
    patterns: Vec<String>,
}

impl FilterBuilder {
    /// Create an empty builder (no constraints).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Add a case-insensitive substring OR group for `column`.
    ///
    /// `raw` is split on commas, each value trimmed, and empty values
    /// dropped. When no values remain (or `raw` is `None`) the column is
    /// left unconstrained. NULL column values are treated as the empty
    /// string so they never match.
    #[must_use]
    pub fn ilike_any(mut self, column: &str, raw: Option<&str>) -> Self {
        let Some(raw) = raw else { return self };

        let values: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            return self;
        }

        let conditions: Vec<String> = values
            .iter()
            .zip(self.patterns.len().saturating_add(1)..)
            .map(|(_, placeholder)| format!("COALESCE({column}, '') ILIKE ${placeholder}"))
            .collect();
        self.groups.push(format!("({})", conditions.join(" OR ")));
        self.patterns
            .extend(values.iter().map(|v| format!("%{v}%")));
        self
    }

    /// Render the WHERE clause, or an empty string when unconstrained.
    ///
    /// Starts from `WHERE 1=1` so groups always attach with `AND`.
    pub fn where_clause(&self) -> String {
        if self.groups.is_empty() {
            return String::new();
        }
        let mut clause = String::from(" WHERE 1=1");
        for group in &self.groups {
            clause.push_str(" AND ");
            clause.push_str(group);
        }
        clause
    }

    /// The bind patterns, in placeholder order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_means_no_where_clause() {
        let filter = FilterBuilder::new()
            .ilike_any("sec_name", None)
            .ilike_any("ssec_name", None);
        assert_eq!(filter.where_clause(), "");
        assert!(filter.patterns().is_empty());
    }

    #[test]
    fn comma_list_becomes_or_group() {
        let filter = FilterBuilder::new().ilike_any("sec_name", Some("A,B"));
        assert_eq!(
            filter.where_clause(),
            " WHERE 1=1 AND (COALESCE(sec_name, '') ILIKE $1 OR COALESCE(sec_name, '') ILIKE $2)"
        );
        assert_eq!(filter.patterns(), ["%A%", "%B%"]);
    }

    #[test]
    fn values_are_trimmed_and_empties_dropped() {
        let filter = FilterBuilder::new().ilike_any("sec_name", Some(" Giza , , ,Cairo "));
        assert_eq!(filter.patterns(), ["%Giza%", "%Cairo%"]);
    }

    #[test]
    fn all_empty_values_leave_column_unconstrained() {
        let filter = FilterBuilder::new().ilike_any("sec_name", Some(" , ,"));
        assert_eq!(filter.where_clause(), "");
    }

    #[test]
    fn placeholder_numbering_threads_across_fields() {
        let filter = FilterBuilder::new()
            .ilike_any("sec_name", Some("A,B"))
            .ilike_any("ssec_name", Some("C"));
        assert_eq!(
            filter.where_clause(),
            " WHERE 1=1 \
             AND (COALESCE(sec_name, '') ILIKE $1 OR COALESCE(sec_name, '') ILIKE $2) \
             AND (COALESCE(ssec_name, '') ILIKE $3)"
        );
        assert_eq!(filter.patterns(), ["%A%", "%B%", "%C%"]);
    }
}
