//! Converts GeoJSON ground layout data into EuroScope sector-file
//! sections (`.sct` regions, geo, colors and `.ese` freetext) and GNG
//! import text, driven by a JSON rule table that maps feature category
//! tags to groups, colors, and output buckets.

pub mod constants;
pub mod export;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod runlog;
pub mod scan;
