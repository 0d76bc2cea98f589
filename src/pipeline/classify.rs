//! Bucket/geometry compatibility: extracts the coordinate nesting level a
//! resolved feature's bucket requires from its native geometry.

use crate::models::feature::{BucketData, ClassifiedFeature, ResolvedFeature};
use crate::models::geojson::Geometry;
use crate::pipeline::SkipReason;

/// A classified feature plus an optional lossy-degrade warning for the run
/// log.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// The feature with coordinates extracted to bucket depth.
    pub feature: ClassifiedFeature,
    /// Set when the native geometry was degraded to fit the bucket.
    pub warning: Option<String>,
}

impl Classified {
    fn clean(feature: ClassifiedFeature) -> Self {
        Self {
            feature,
            warning: None,
        }
    }

    fn degraded(feature: ClassifiedFeature, warning: String) -> Self {
        Self {
            feature,
            warning: Some(warning),
        }
    }
}

/// Classifies a resolved feature against its native geometry.
///
/// Compatibility rules:
/// - AREA takes polygon geometry only (a MultiPolygon contributes its
///   first polygon).
/// - LINE takes line geometry directly and degrades polygons to their
///   outer ring, losing holes (warning).
/// - LABEL takes points directly and degrades polygons and lines to their
///   first vertex (warning).
///
/// # Errors
///
/// Returns a [`SkipReason`] for empty coordinate structures (checked
/// first) and for any other bucket/geometry combination.
pub fn classify(resolved: ResolvedFeature, geometry: Geometry) -> Result<Classified, SkipReason> {
    if geometry.is_empty() {
        return Err(SkipReason::EmptyGeometry {
            group: resolved.group,
        });
    }

    let kind = geometry.kind();
    let ResolvedFeature { group, color, data } = resolved;

    match data {
        BucketData::Area { priority } => {
            let rings = match geometry {
                Geometry::Polygon { coordinates } => coordinates,
                Geometry::MultiPolygon { mut coordinates } => coordinates.swap_remove(0),
                _ => return Err(mismatch(group, kind, "a Euroscope region")),
            };
            Ok(Classified::clean(ClassifiedFeature::Area {
                group,
                color,
                priority,
                rings,
            }))
        }
        BucketData::Line => {
            let (lines, degraded_from) = match geometry {
                Geometry::MultiLineString { coordinates } => (coordinates, None),
                Geometry::LineString { coordinates } => (vec![coordinates], None),
                Geometry::Polygon { mut coordinates } => {
                    (vec![coordinates.swap_remove(0)], Some(kind))
                }
                Geometry::MultiPolygon { mut coordinates } => {
                    let mut polygon = coordinates.swap_remove(0);
                    if polygon.is_empty() {
                        return Err(SkipReason::EmptyGeometry { group });
                    }
                    (vec![polygon.swap_remove(0)], Some(kind))
                }
                _ => return Err(mismatch(group, kind, "a Euroscope geo line")),
            };
            let warning = degraded_from.map(|_| {
                format!(
                    "Mapping a polygon feature of group {group} to a Euroscope geo line, holes may be lost in the process."
                )
            });
            let feature = ClassifiedFeature::Line {
                group,
                color,
                lines,
            };
            Ok(match warning {
                Some(warning) => Classified::degraded(feature, warning),
                None => Classified::clean(feature),
            })
        }
        BucketData::Label { text } => {
            let (position, degraded) = match geometry {
                Geometry::Point { coordinates } => (Some(coordinates), None),
                Geometry::Polygon { coordinates } => (
                    coordinates.first().and_then(|ring| ring.first()).copied(),
                    Some("polygon"),
                ),
                Geometry::MultiPolygon { coordinates } => (
                    coordinates
                        .first()
                        .and_then(|polygon| polygon.first())
                        .and_then(|ring| ring.first())
                        .copied(),
                    Some("polygon"),
                ),
                Geometry::LineString { coordinates } => {
                    (coordinates.first().copied(), Some("line"))
                }
                Geometry::MultiLineString { coordinates } => (
                    coordinates.first().and_then(|line| line.first()).copied(),
                    Some("line"),
                ),
                Geometry::Unsupported => {
                    return Err(mismatch(group, kind, "a Euroscope freetext point"))
                }
            };
            let Some(position) = position else {
                return Err(SkipReason::EmptyGeometry { group });
            };
            let warning = degraded.map(|source| {
                format!(
                    "Mapping a {source} feature of group {group} to a Euroscope freetext point, only the first coordinate will be considered."
                )
            });
            let feature = ClassifiedFeature::Label {
                group,
                color,
                text,
                position,
            };
            Ok(match warning {
                Some(warning) => Classified::degraded(feature, warning),
                None => Classified::clean(feature),
            })
        }
    }
}

fn mismatch(group: String, kind: &'static str, target: &str) -> SkipReason {
    SkipReason::BucketMismatch {
        group,
        kind,
        target: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::SectorColor;

    fn resolved(data: BucketData) -> ResolvedFeature {
        ResolvedFeature {
            group: "LSZH APRON".to_string(),
            color: SectorColor::Named("grass".to_string()),
            data,
        }
    }

    fn polygon_with_hole() -> Geometry {
        Geometry::Polygon {
            coordinates: vec![
                vec![[8.0, 47.0], [8.2, 47.0], [8.2, 47.2], [8.0, 47.0]],
                vec![[8.05, 47.05], [8.1, 47.05], [8.1, 47.1], [8.05, 47.05]],
            ],
        }
    }

    #[test]
    fn test_area_accepts_polygon_and_multipolygon() {
        let classified = classify(resolved(BucketData::Area { priority: 2 }), polygon_with_hole())
            .unwrap();
        assert!(classified.warning.is_none());
        let ClassifiedFeature::Area { rings, .. } = classified.feature else {
            panic!("expected an area feature");
        };
        assert_eq!(rings.len(), 2);

        let multi = Geometry::MultiPolygon {
            coordinates: vec![vec![vec![[8.0, 47.0], [8.1, 47.0], [8.1, 47.1]]]],
        };
        let classified = classify(resolved(BucketData::Area { priority: 2 }), multi).unwrap();
        let ClassifiedFeature::Area { rings, .. } = classified.feature else {
            panic!("expected an area feature");
        };
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_area_rejects_lines_and_points() {
        let line = Geometry::LineString {
            coordinates: vec![[8.0, 47.0], [8.1, 47.1]],
        };
        let error = classify(resolved(BucketData::Area { priority: 1 }), line).unwrap_err();
        assert!(matches!(error, SkipReason::BucketMismatch { .. }));

        let point = Geometry::Point {
            coordinates: [8.0, 47.0],
        };
        let error = classify(resolved(BucketData::Area { priority: 1 }), point).unwrap_err();
        assert!(matches!(error, SkipReason::BucketMismatch { .. }));
    }

    #[test]
    fn test_line_wraps_single_linestring() {
        let line = Geometry::LineString {
            coordinates: vec![[8.0, 47.0], [8.1, 47.1]],
        };
        let classified = classify(resolved(BucketData::Line), line).unwrap();
        let ClassifiedFeature::Line { lines, .. } = classified.feature else {
            panic!("expected a line feature");
        };
        assert_eq!(lines.len(), 1);
        assert!(classified.warning.is_none());
    }

    #[test]
    fn test_line_degrades_polygon_to_outer_ring() {
        let classified = classify(resolved(BucketData::Line), polygon_with_hole()).unwrap();
        let warning = classified.warning.expect("degrade must warn");
        assert!(warning.contains("holes may be lost"));
        let ClassifiedFeature::Line { lines, .. } = classified.feature else {
            panic!("expected a line feature");
        };
        // Only the outer ring survives.
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
    }

    #[test]
    fn test_line_rejects_point() {
        let point = Geometry::Point {
            coordinates: [8.0, 47.0],
        };
        let error = classify(resolved(BucketData::Line), point).unwrap_err();
        assert!(matches!(error, SkipReason::BucketMismatch { .. }));
    }

    #[test]
    fn test_label_takes_point_directly() {
        let point = Geometry::Point {
            coordinates: [8.55, 47.45],
        };
        let feature = resolved(BucketData::Label {
            text: "RWY".to_string(),
        });
        let classified = classify(feature, point).unwrap();
        assert!(classified.warning.is_none());
        let ClassifiedFeature::Label { position, .. } = classified.feature else {
            panic!("expected a label feature");
        };
        assert_eq!(position, [8.55, 47.45]);
    }

    #[test]
    fn test_label_degrades_polygon_and_line_to_first_vertex() {
        let feature = resolved(BucketData::Label {
            text: "A".to_string(),
        });
        let classified = classify(feature, polygon_with_hole()).unwrap();
        assert!(classified.warning.unwrap().contains("first coordinate"));
        let ClassifiedFeature::Label { position, .. } = classified.feature else {
            panic!("expected a label feature");
        };
        assert_eq!(position, [8.0, 47.0]);

        let feature = resolved(BucketData::Label {
            text: "A".to_string(),
        });
        let line = Geometry::MultiLineString {
            coordinates: vec![vec![[8.3, 47.3], [8.4, 47.4]]],
        };
        let classified = classify(feature, line).unwrap();
        let ClassifiedFeature::Label { position, .. } = classified.feature else {
            panic!("expected a label feature");
        };
        assert_eq!(position, [8.3, 47.3]);
    }

    #[test]
    fn test_empty_geometry_is_checked_first() {
        let empty = Geometry::MultiPolygon {
            coordinates: vec![],
        };
        let error = classify(resolved(BucketData::Line), empty).unwrap_err();
        assert!(matches!(error, SkipReason::EmptyGeometry { .. }));
    }
}
