//! Loading of input files: GeoJSON feature collections and the exporter
//! definitions (rule table).

pub mod geojson;
pub mod rules;

pub use geojson::read_feature_collection;
pub use rules::load_rule_table;
