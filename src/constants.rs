//! Fixed layout constants shared by the output formats.

/// Color forced onto hole rings so cut-outs render as ground.
pub const HOLE_COLOR: &str = "COLOR_AoRground1";

/// First field of every GNG group header.
pub const GNG_HEADER_PREFIX: &str = "AERONAV";

/// Provenance tag stamped into every GNG group header.
pub const GNG_PROVENANCE: &str = "QGIS 2205";

/// Column the first coordinate of a region block starts at.
pub const REGION_COLOR_WIDTH: usize = 27;

/// Right-justification width for follow-up region coordinates.
pub const REGION_COORD_WIDTH: usize = 56;

/// Column width for the group name opening a geo line.
pub const GEO_GROUP_WIDTH: usize = 41;

/// Right-justification width for geo line segments.
pub const GEO_SEGMENT_WIDTH: usize = 100;
