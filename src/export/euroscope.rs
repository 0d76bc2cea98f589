//! Primary-target rendering: the EuroScope sector-file text conventions.
//!
//! The three bucket layouts differ considerably. Regions hold their last
//! vertex back because EuroScope closes the ring implicitly; geo lines are
//! open polylines and render every segment.

use crate::constants::{GEO_GROUP_WIDTH, GEO_SEGMENT_WIDTH, HOLE_COLOR, REGION_COLOR_WIDTH, REGION_COORD_WIDTH};
use crate::export::coord::to_es_notation;
use crate::models::color::SectorColor;
use crate::models::feature::ClassifiedFeature;
use crate::models::geojson::Ring;
use std::fmt::Write as _;

/// One formatted record for the primary target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EsRecord {
    /// A region body plus the priority that orders it.
    Region {
        /// Draw priority for the aggregator.
        priority: i64,
        /// Multi-line region text, one `REGIONNAME` block per ring.
        body: String,
    },
    /// A geo line fragment, appended to the geo body in arrival order.
    Geo(String),
    /// A single freetext line.
    Freetext(String),
}

/// Renders a classified feature for the primary target.
///
/// Pure function of its input; accumulation happens in the run context.
#[must_use]
pub fn format_feature(feature: &ClassifiedFeature) -> EsRecord {
    match feature {
        ClassifiedFeature::Area {
            group,
            color,
            priority,
            rings,
        } => EsRecord::Region {
            priority: *priority,
            body: region_body(group, color, rings),
        },
        ClassifiedFeature::Line {
            group,
            color,
            lines,
        } => EsRecord::Geo(geo_body(group, color, lines)),
        ClassifiedFeature::Label {
            group,
            text,
            position,
            ..
        } => EsRecord::Freetext(format!(
            "{}:{}:{}\n",
            to_es_notation(*position).replace(' ', ":"),
            group,
            text
        )),
    }
}

/// One `REGIONNAME` block per ring. Ring 0 keeps the resolved color; hole
/// rings are forced to the ground color. The final vertex is never
/// emitted; the closing segment is implied.
fn region_body(group: &str, color: &SectorColor, rings: &[Ring]) -> String {
    let mut body = String::new();
    for (index, ring) in rings.iter().enumerate() {
        let Some(first) = ring.first() else {
            continue;
        };
        let ring_color = if index == 0 {
            color.to_string()
        } else {
            HOLE_COLOR.to_string()
        };
        let _ = writeln!(body, "REGIONNAME {group}");
        let _ = writeln!(
            body,
            "{:<width$}{}",
            ring_color,
            to_es_notation(*first),
            width = REGION_COLOR_WIDTH
        );
        for position in ring.iter().skip(1).take(ring.len().saturating_sub(2)) {
            let _ = writeln!(
                body,
                "{:>width$}",
                to_es_notation(*position),
                width = REGION_COORD_WIDTH
            );
        }
    }
    body
}

/// Per line: a header row carrying the group name and the first segment,
/// then one right-justified row per further segment. EuroScope draws geo
/// lines as independent two-point segments.
fn geo_body(group: &str, color: &SectorColor, lines: &[Ring]) -> String {
    let color = color.to_string();
    let mut body = String::new();
    for line in lines {
        if line.len() < 2 {
            continue;
        }
        let _ = writeln!(
            body,
            "{:<width$}{} {} {}",
            group,
            to_es_notation(line[0]),
            to_es_notation(line[1]),
            color,
            width = GEO_GROUP_WIDTH
        );
        for pair in line[1..].windows(2) {
            let segment = format!("{} {}", to_es_notation(pair[0]), to_es_notation(pair[1]));
            let _ = writeln!(body, "{:>width$} {}", segment, color, width = GEO_SEGMENT_WIDTH);
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(priority: i64, rings: Vec<Ring>) -> ClassifiedFeature {
        ClassifiedFeature::Area {
            group: "LSZH APRON".to_string(),
            color: SectorColor::Named("grass".to_string()),
            priority,
            rings,
        }
    }

    #[test]
    fn test_region_block_layout() {
        let feature = area(
            2,
            vec![vec![[8.0, 47.0], [8.25, 47.0], [8.25, 47.25], [8.0, 47.0]]],
        );
        let EsRecord::Region { priority, body } = format_feature(&feature) else {
            panic!("expected a region record");
        };
        assert_eq!(priority, 2);

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "REGIONNAME LSZH APRON");
        assert!(lines[1].starts_with("COLOR_grass"));
        assert_eq!(&lines[1][27..], "N047.00.00.000 E008.00.00.000");
        // Two middle vertices, right-justified; closing vertex held back.
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].len(), 56);
        assert!(lines[2].ends_with("N047.00.00.000 E008.15.00.000"));
    }

    #[test]
    fn test_hole_ring_forced_to_ground_color() {
        let feature = area(
            1,
            vec![
                vec![[8.0, 47.0], [8.2, 47.0], [8.2, 47.2], [8.0, 47.0]],
                vec![[8.05, 47.05], [8.1, 47.05], [8.1, 47.1], [8.05, 47.05]],
            ],
        );
        let EsRecord::Region { body, .. } = format_feature(&feature) else {
            panic!("expected a region record");
        };

        let blocks: Vec<&str> = body.match_indices("REGIONNAME").map(|(_, m)| m).collect();
        assert_eq!(blocks.len(), 2, "one block per ring");
        // The second block's color line carries the hole color regardless
        // of the resolved color.
        let second_block = &body[body.rfind("REGIONNAME").unwrap()..];
        assert!(second_block.contains("COLOR_AoRground1"));
        assert!(!second_block.contains("COLOR_grass"));
    }

    #[test]
    fn test_geo_line_layout() {
        let feature = ClassifiedFeature::Line {
            group: "LSZH TWY MAIN".to_string(),
            color: SectorColor::Decimal(33023),
            lines: vec![vec![[8.0, 47.0], [8.1, 47.1], [8.2, 47.2]]],
        };
        let EsRecord::Geo(body) = format_feature(&feature) else {
            panic!("expected a geo record");
        };

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2, "header segment plus one follow-up");
        assert!(lines[0].starts_with("LSZH TWY MAIN"));
        // Group padded to column 41, then the first segment and color.
        assert_eq!(&lines[0][41..42], "N");
        assert!(lines[0].ends_with(" 33023"));
        // Follow-up segments are right-justified to 100 characters.
        assert_eq!(lines[1].len(), 100 + 1 + 5);
        assert!(lines[1].trim_start().starts_with("N047.06.00.000"));
    }

    #[test]
    fn test_geo_single_vertex_line_is_dropped() {
        let feature = ClassifiedFeature::Line {
            group: "LSZH TWY".to_string(),
            color: SectorColor::Decimal(1),
            lines: vec![vec![[8.0, 47.0]]],
        };
        let EsRecord::Geo(body) = format_feature(&feature) else {
            panic!("expected a geo record");
        };
        assert!(body.is_empty());
    }

    #[test]
    fn test_freetext_line() {
        let feature = ClassifiedFeature::Label {
            group: "LSZH_abc".to_string(),
            color: SectorColor::Named("white".to_string()),
            text: "RWY".to_string(),
            position: [8.55, 47.45],
        };
        let EsRecord::Freetext(line) = format_feature(&feature) else {
            panic!("expected a freetext record");
        };
        assert_eq!(line, "N047.27.00.000:E008.33.00.000:LSZH_abc:RWY\n");
    }
}
