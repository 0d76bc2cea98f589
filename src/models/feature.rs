//! Resolved and classified feature types: the typed stages a raw geometry
//! record passes through between rule resolution and formatting.

use crate::models::color::SectorColor;
use crate::models::geojson::{Position, Ring};
use serde::Deserialize;
use std::fmt;

/// The three output categories a resolved feature is classified into.
///
/// Parsed from the rule table's `ES Category` field, which uses the
/// sector-file section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Bucket {
    /// Region fill (`regions` section of the .sct file).
    #[serde(rename = "regions")]
    Area,
    /// Geo line drawing (`geo` section of the .sct file).
    #[serde(rename = "geo")]
    Line,
    /// Freetext label (`freetext` section of the .ese file).
    #[serde(rename = "freetext")]
    Label,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Area => "regions",
            Self::Line => "geo",
            Self::Label => "freetext",
        };
        f.pad(name)
    }
}

/// Bucket-specific attributes, validated at resolution time: an AREA
/// feature always carries its priority and a LABEL feature its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketData {
    /// Region fill with its draw priority.
    Area {
        /// Lower priorities paint first and are covered by higher ones.
        priority: i64,
    },
    /// Geo line drawing.
    Line,
    /// Freetext label.
    Label {
        /// The label text rendered next to the position.
        text: String,
    },
}

/// A feature after category resolution: group, color, and the validated
/// bucket attributes. Coordinates are still the raw geometry at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFeature {
    /// Logical group name with all placeholders substituted.
    pub group: String,
    /// Normalized color entering the formatters.
    pub color: SectorColor,
    /// Bucket routing plus bucket-specific attributes.
    pub data: BucketData,
}

impl ResolvedFeature {
    /// The output bucket this feature is routed to.
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        match self.data {
            BucketData::Area { .. } => Bucket::Area,
            BucketData::Line => Bucket::Line,
            BucketData::Label { .. } => Bucket::Label,
        }
    }
}

/// A resolved feature with its coordinate nesting extracted to the depth
/// its bucket requires. This is the input both target formatters share.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedFeature {
    /// Region fill: ring 0 is the outer boundary, later rings are holes.
    Area {
        /// Group name used for the region header and layer grouping.
        group: String,
        /// Fill color of the outer ring; holes use the fixed ground color.
        color: SectorColor,
        /// Draw priority for paint ordering.
        priority: i64,
        /// Outer ring plus hole rings.
        rings: Vec<Ring>,
    },
    /// Geo line drawing: one entry per line string.
    Line {
        /// Group name opening each line block.
        group: String,
        /// Line color.
        color: SectorColor,
        /// The line strings to draw segment by segment.
        lines: Vec<Ring>,
    },
    /// Freetext label at a single position.
    Label {
        /// Group name joined into the label line.
        group: String,
        /// Carried for the common attribute base; freetext lines do not
        /// render a color.
        color: SectorColor,
        /// The label text.
        text: String,
        /// Anchor position of the label.
        position: Position,
    },
}

impl ClassifiedFeature {
    /// The group name, independent of bucket.
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::Area { group, .. } | Self::Line { group, .. } | Self::Label { group, .. } => {
                group
            }
        }
    }
}
