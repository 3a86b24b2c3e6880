//! GeoJSON response shaping for the dot-density endpoint.
//!
//! The database returns one pre-serialized point geometry per row; this
//! module wraps them into a `FeatureCollection` with sequential feature
//! ids. Point geometries are treated as opaque JSON -- the application
//! never parses coordinates.

use census_db::DotPoint;
use serde_json::{Value, json};

/// Wrap synthesized dot-density points into a GeoJSON
/// `FeatureCollection`.
///
/// Each point becomes one Feature whose `properties` carry a sequential
/// `id` (the point's index in the concatenated category output), the
/// source record's `sec_name`, and the `category` label.
pub fn feature_collection(points: Vec<DotPoint>) -> Value {
    let features: Vec<Value> = points
        .into_iter()
        .enumerate()
        .map(|(id, point)| {
            json!({
                "type": "Feature",
                "geometry": point.geom,
                "properties": {
                    "id": id,
                    "sec_name": point.sec_name,
                    "category": point.category,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    fn point(name: &str, category: &str, x: f64) -> DotPoint {
        DotPoint {
            sec_name: Some(name.to_owned()),
            category: category.to_owned(),
            geom: json!({"type": "Point", "coordinates": [x, 30.0]}),
        }
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let collection = feature_collection(Vec::new());
        assert_eq!(collection["type"], "FeatureCollection");
        assert_eq!(collection["features"], json!([]));
    }

    #[test]
    fn features_carry_sequential_ids_and_properties() {
        let collection = feature_collection(vec![
            point("Giza", "sheep", 31.0),
            point("Giza", "goats", 31.1),
            point("Cairo", "sheep", 31.2),
        ]);

        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        for (index, feature) in features.iter().enumerate() {
            assert_eq!(feature["type"], "Feature");
            assert_eq!(feature["properties"]["id"].as_u64(), Some(index as u64));
        }
        assert_eq!(features[1]["properties"]["category"], "goats");
        assert_eq!(features[2]["properties"]["sec_name"], "Cairo");
        assert_eq!(features[0]["geometry"]["type"], "Point");
    }

    #[test]
    fn null_section_names_pass_through() {
        let collection = feature_collection(vec![DotPoint {
            sec_name: None,
            category: "sheep".to_owned(),
            geom: json!({"type": "Point", "coordinates": [31.0, 30.0]}),
        }]);
        let features = collection["features"].as_array().unwrap();
        assert!(features[0]["properties"]["sec_name"].is_null());
    }
}
