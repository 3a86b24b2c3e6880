//! Per-table column-mapping descriptors.
//!
//! The two census tables (`dumanimal`, `sec_animal`) carry the same
//! logical record under slightly different column names. Rather than
//! duplicating the query layer per table, a static [`CensusTable`]
//! descriptor captures the differences and the query layer interpolates
//! them. Descriptor fields are compile-time constants, never request
//! input, so interpolating them into SQL text is safe; all request
//! values are bound as parameters.

/// Column mapping and query flavor for one census table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CensusTable {
    /// The table name.
    pub name: &'static str,
    /// Column holding the record's latitude.
    pub latitude_col: &'static str,
    /// Column holding the record's longitude.
    pub longitude_col: &'static str,
    /// Column holding the breeder count.
    pub breeders_col: &'static str,
    /// Whether the heads-per-breeder ratio casts `total` to decimal
    /// before dividing.
    ///
    /// `sec_animal` divides integer by integer, which truncates before
    /// rounding. The source system shipped with that behavior and
    /// downstream consumers see it, so it is preserved per table rather
    /// than unified.
    pub decimal_ratio: bool,
}

impl CensusTable {
    /// SQL expression for the guarded heads-per-breeder ratio.
    ///
    /// Yields 0 when the breeder count is NULL or zero, otherwise the
    /// ratio rounded to 2 decimal places.
    pub fn heads_per_breeder_expr(&self) -> String {
        let breeders = self.breeders_col;
        let division = if self.decimal_ratio {
            format!("total::decimal / {breeders}")
        } else {
            format!("total / {breeders}")
        };
        format!(
            "CASE WHEN {breeders} IS NULL OR {breeders} = 0 THEN 0 \
             ELSE ROUND(({division})::numeric, 2) END"
        )
    }
}

/// The governorate-level census table.
pub const DUMANIMAL: CensusTable = CensusTable {
    name: "dumanimal",
    latitude_col: "y_coord",
    longitude_col: "x_coord",
    breeders_col: "breeders_count",
    decimal_ratio: true,
};

/// The section-level census table.
pub const SEC_ANIMAL: CensusTable = CensusTable {
    name: "sec_animal",
    latitude_col: "latitude",
    longitude_col: "longitude",
    breeders_col: "breeders",
    decimal_ratio: false,
};

/// One dot-density category: a label and the SQL expression for the
/// species count that drives its point density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotDensityCategory {
    /// Category label emitted in feature properties.
    pub name: &'static str,
    /// SQL expression summing the species columns for this category.
    pub count_expr: &'static str,
}

/// The fixed dot-density categories, in output order.
pub const DOT_DENSITY_CATEGORIES: [DotDensityCategory; 7] = [
    DotDensityCategory {
        name: "cow_dairy",
        count_expr: "(local_cow_females + imported_cow_females)",
    },
    DotDensityCategory {
        name: "cow_fattening",
        count_expr: "(local_cow_fattening + imported_cow_fattening)",
    },
    DotDensityCategory {
        name: "buffalo_females",
        count_expr: "buffalo_females",
    },
    DotDensityCategory {
        name: "buffalo_fattening",
        count_expr: "buffalo_fattening",
    },
    DotDensityCategory {
        name: "sheep",
        count_expr: "sheep",
    },
    DotDensityCategory {
        name: "goats",
        count_expr: "goats",
    },
    DotDensityCategory {
        name: "pack_animals",
        count_expr: "pack_animals",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumanimal_ratio_casts_to_decimal() {
        let expr = DUMANIMAL.heads_per_breeder_expr();
        assert!(expr.contains("total::decimal / breeders_count"));
        assert!(expr.contains("WHEN breeders_count IS NULL OR breeders_count = 0 THEN 0"));
        assert!(expr.contains("ROUND"));
    }

    #[test]
    fn sec_animal_ratio_keeps_integer_division() {
        let expr = SEC_ANIMAL.heads_per_breeder_expr();
        assert!(expr.contains("total / breeders"));
        assert!(!expr.contains("::decimal"));
    }

    #[test]
    fn tables_map_coordinate_columns() {
        assert_eq!(DUMANIMAL.latitude_col, "y_coord");
        assert_eq!(DUMANIMAL.longitude_col, "x_coord");
        assert_eq!(SEC_ANIMAL.latitude_col, "latitude");
        assert_eq!(SEC_ANIMAL.longitude_col, "longitude");
    }

    #[test]
    fn seven_dot_density_categories_in_order() {
        let names: Vec<&str> = DOT_DENSITY_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "cow_dairy",
                "cow_fattening",
                "buffalo_females",
                "buffalo_fattening",
                "sheep",
                "goats",
                "pack_animals",
            ]
        );
    }
}
