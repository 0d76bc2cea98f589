//! Serde models for the GeoJSON interchange files handed to the pipeline.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// A single longitude/latitude pair, in GeoJSON axis order.
pub type Position = [f64; 2];

/// One closed or open coordinate sequence.
pub type Ring = Vec<Position>;

/// The geometry kinds the exporter knows how to map.
///
/// GeoJSON nests coordinates one level deeper per aggregation level, so
/// each variant carries its own nesting depth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position.
    Point {
        /// The position itself.
        coordinates: Position,
    },
    /// An open sequence of positions.
    LineString {
        /// The vertices of the line.
        coordinates: Ring,
    },
    /// An outer ring plus zero or more hole rings.
    Polygon {
        /// Ring 0 is the outer boundary, later rings are holes.
        coordinates: Vec<Ring>,
    },
    /// A collection of line strings.
    MultiLineString {
        /// One ring per line string.
        coordinates: Vec<Ring>,
    },
    /// A collection of polygons.
    MultiPolygon {
        /// One ring list per polygon.
        coordinates: Vec<Vec<Ring>>,
    },
    /// Any geometry type the exporter has no mapping for.
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// The GeoJSON type name, for log messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::LineString { .. } => "LineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::MultiPolygon { .. } => "MultiPolygon",
            Self::Unsupported => "unsupported",
        }
    }

    /// Whether the top-level coordinate structure holds no data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point { .. } | Self::Unsupported => false,
            Self::LineString { coordinates } => coordinates.is_empty(),
            Self::Polygon { coordinates } | Self::MultiLineString { coordinates } => {
                coordinates.is_empty()
            }
            Self::MultiPolygon { coordinates } => coordinates.is_empty(),
        }
    }
}

/// The property set attached to a feature.
///
/// QGIS sometimes capitalizes property keys, so keys are lowercased on
/// read before the known attributes are extracted. JSON `null` values and
/// absent keys both map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// ICAO code of the airport the feature belongs to (`apt`).
    pub airport: Option<String>,
    /// Category tag driving rule resolution (`cat`).
    pub category: Option<String>,
    /// Optional color override (`clr`).
    pub color: Option<String>,
    /// Optional label text for freetext features (`lbl`).
    pub label: Option<String>,
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Value>::deserialize(deserializer)?;
        let mut lowered = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            lowered.insert(key.to_lowercase(), value);
        }

        let get = |key: &str| lowered.get(key).and_then(value_to_string);

        Ok(Self {
            airport: get("apt"),
            category: get("cat"),
            color: get("clr"),
            label: get("lbl"),
        })
    }
}

/// Accepts string and numeric property values; labels are occasionally
/// exported as bare numbers.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// One geometry record from an input file.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// `null` geometries deserialize to `None` and are skipped silently.
    pub geometry: Option<Geometry>,
    /// The feature's property set.
    #[serde(default)]
    pub properties: Properties,
}

/// One logical feature collection per input file.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    /// The features in file order.
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_case_insensitive() {
        let json = r#"{"APT": "LSZH", "Cat": "twy_cl", "clr": null, "LBL": "A1"}"#;
        let props: Properties = serde_json::from_str(json).unwrap();
        assert_eq!(props.airport.as_deref(), Some("LSZH"));
        assert_eq!(props.category.as_deref(), Some("twy_cl"));
        assert_eq!(props.color, None);
        assert_eq!(props.label.as_deref(), Some("A1"));
    }

    #[test]
    fn test_properties_numeric_label() {
        let json = r#"{"apt": "LSGG", "lbl": 27}"#;
        let props: Properties = serde_json::from_str(json).unwrap();
        assert_eq!(props.label.as_deref(), Some("27"));
        assert_eq!(props.category, None);
    }

    #[test]
    fn test_geometry_variants() {
        let point: Geometry = serde_json::from_str(
            r#"{"type": "Point", "coordinates": [8.55, 47.45]}"#,
        )
        .unwrap();
        assert_eq!(point.kind(), "Point");
        assert!(!point.is_empty());

        let multi: Geometry = serde_json::from_str(
            r#"{"type": "MultiPolygon", "coordinates": [[[[8.0, 47.0], [8.1, 47.0], [8.1, 47.1], [8.0, 47.0]]]]}"#,
        )
        .unwrap();
        assert_eq!(multi.kind(), "MultiPolygon");

        let unknown: Geometry = serde_json::from_str(
            r#"{"type": "GeometryCollection", "geometries": []}"#,
        )
        .unwrap();
        assert_eq!(unknown, Geometry::Unsupported);
    }

    #[test]
    fn test_empty_geometry() {
        let empty: Geometry =
            serde_json::from_str(r#"{"type": "MultiLineString", "coordinates": []}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_null_geometry_feature() {
        let feature: Feature = serde_json::from_str(
            r#"{"geometry": null, "properties": {"apt": "LSZH", "cat": "abc"}}"#,
        )
        .unwrap();
        assert!(feature.geometry.is_none());
    }
}
