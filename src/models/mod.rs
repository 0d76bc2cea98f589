//! Data models: GeoJSON input records, the rule table, colors, and the
//! resolved/classified feature types flowing through the pipeline.

pub mod color;
pub mod feature;
pub mod geojson;
pub mod rules;

pub use color::{resolve_color, RgbColor, SectorColor};
pub use feature::{Bucket, BucketData, ClassifiedFeature, ResolvedFeature};
pub use geojson::{Feature, FeatureCollection, Geometry, Position, Ring};
pub use rules::{AttributeSet, ColorDefs, RuleTable};
