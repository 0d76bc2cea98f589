//! Secondary-target rendering: the GNG import text conventions.
//!
//! GNG groups records by layer at assembly time, so the per-feature
//! rendering is simpler than the sector-file layout: no name headers, no
//! column justification, and regions keep their closing vertex.

use crate::constants::HOLE_COLOR;
use crate::export::coord::to_es_notation;
use crate::models::color::SectorColor;
use crate::models::feature::ClassifiedFeature;
use crate::models::geojson::Ring;
use std::fmt::Write as _;

/// One formatted record for the secondary target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GngRecord {
    /// A region body plus its layer name and ordering priority.
    Region {
        /// Draw priority within the layer group.
        priority: i64,
        /// Layer name the region is grouped under.
        name: String,
        /// Color line followed by every vertex, per ring.
        body: String,
    },
    /// Geo segments with the metadata split out of the group name.
    Geo {
        /// Full group name, the grouping key.
        group: String,
        /// Airport code prefix of the group name.
        airport: String,
        /// Category token following the airport code.
        category: String,
        /// Remainder of the group name.
        name: String,
        /// One line per consecutive vertex pair.
        code: String,
    },
    /// A freetext label with its airport and label-group tags.
    Freetext {
        /// Full group name, the grouping key.
        group: String,
        /// Airport code prefix of the group name.
        airport: String,
        /// Label group following the airport code.
        labelgroup: String,
        /// The encoded label line, without a trailing newline.
        code: String,
    },
}

/// Renders a classified feature for the secondary target.
///
/// Pure function of its input; grouping happens in the run context.
#[must_use]
pub fn format_feature(feature: &ClassifiedFeature) -> GngRecord {
    match feature {
        ClassifiedFeature::Area {
            group,
            color,
            priority,
            rings,
        } => GngRecord::Region {
            priority: *priority,
            name: group.clone(),
            body: region_body(color, rings),
        },
        ClassifiedFeature::Line {
            group,
            color,
            lines,
        } => {
            let (airport, category, name) = split_group(group);
            GngRecord::Geo {
                group: group.clone(),
                airport,
                category,
                name,
                code: geo_code(color, lines),
            }
        }
        ClassifiedFeature::Label {
            group,
            text,
            position,
            ..
        } => {
            let airport = prefix(group);
            let labelgroup = suffix(group);
            GngRecord::Freetext {
                group: group.clone(),
                airport,
                labelgroup,
                code: format!("{}::{}", to_es_notation(*position).replace(' ', ":"), text),
            }
        }
    }
}

/// Per ring: one color line, then every vertex including the closing one.
fn region_body(color: &SectorColor, rings: &[Ring]) -> String {
    let mut body = String::new();
    for (index, ring) in rings.iter().enumerate() {
        if index == 0 {
            let _ = writeln!(body, "{color}");
        } else {
            let _ = writeln!(body, "{HOLE_COLOR}");
        }
        for position in ring {
            let _ = writeln!(body, "{}", to_es_notation(*position));
        }
    }
    body
}

/// Every consecutive vertex pair of every line, unpadded. Unlike the
/// region body, the first pair is included here as well.
fn geo_code(color: &SectorColor, lines: &[Ring]) -> String {
    let color = color.to_string();
    let mut code = String::new();
    for line in lines {
        for pair in line.windows(2) {
            let _ = writeln!(
                code,
                "{} {} {}",
                to_es_notation(pair[0]),
                to_es_notation(pair[1]),
                color
            );
        }
    }
    code
}

/// The four-character airport code opening a group name.
fn prefix(group: &str) -> String {
    group.get(..4).unwrap_or(group).to_string()
}

/// Everything after the airport code and its separator.
fn suffix(group: &str) -> String {
    group.get(5..).unwrap_or("").to_string()
}

/// Splits `<APT> <category> <name...>` group names into their parts.
fn split_group(group: &str) -> (String, String, String) {
    let airport = prefix(group);
    let rest = group.get(5..).unwrap_or("");
    let mut parts = rest.split(' ');
    let category = parts.next().unwrap_or("").to_string();
    let name = parts.collect::<Vec<_>>().join(" ");
    (airport, category, name)
}
