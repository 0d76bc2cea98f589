//! The conversion pipeline: rule resolution, geometry classification, and
//! the per-file driver that folds formatted records into the run context.

pub mod classify;
pub mod context;
pub mod resolve;

pub use classify::{classify, Classified};
pub use context::{OutputBundle, RunContext};
pub use resolve::{resolve_category, Resolution};

use crate::export::{euroscope, gng};
use crate::models::color::resolve_color;
use crate::models::feature::{Bucket, BucketData, ResolvedFeature};
use crate::models::geojson::Feature;
use crate::models::rules::RuleTable;
use crate::parser::read_feature_collection;
use anyhow::Result;
use std::path::Path;

/// Why a feature was dropped instead of exported.
///
/// Every variant maps to exactly one run-log line; features with a `null`
/// geometry or an `Ignore` rule are dropped without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The feature carries no `apt` attribute.
    MissingAirport,
    /// The feature carries no `cat` attribute.
    MissingCategory,
    /// The category tag contains the `_dis` disable marker.
    Disabled,
    /// The main category is not present in the rule table.
    UnknownCategory(String),
    /// The first suffix is not declared under its main category.
    UnknownSuffix {
        /// The unrecognized suffix token.
        suffix: String,
        /// The main category it was looked up under.
        category: String,
    },
    /// A feature resolved to the region bucket without a priority.
    MissingPriority {
        /// The resolved group name.
        group: String,
    },
    /// A feature resolved to the freetext bucket without a `lbl` attribute.
    MissingLabel {
        /// The resolved group name.
        group: String,
    },
    /// The geometry's top-level coordinate structure holds no data.
    EmptyGeometry {
        /// The resolved group name.
        group: String,
    },
    /// The geometry kind cannot be mapped to the resolved bucket.
    BucketMismatch {
        /// The resolved group name.
        group: String,
        /// The GeoJSON type name of the offending geometry.
        kind: &'static str,
        /// Human-readable name of the output shape that was expected.
        target: String,
    },
}

impl SkipReason {
    /// The run-log line for this skip, naming the input file.
    #[must_use]
    pub fn log_line(&self, file: &Path) -> String {
        let file = file.display();
        match self {
            Self::MissingAirport => {
                format!("Skipping feature because of missing \"apt\" attribute in file {file}")
            }
            Self::MissingCategory => {
                format!("Skipping feature because of missing \"cat\" attribute in file {file}")
            }
            Self::Disabled => format!("Skipping disabled feature in file {file}"),
            Self::UnknownCategory(category) => {
                format!("Unknown category {category} found in file {file}")
            }
            Self::UnknownSuffix { suffix, category } => {
                format!("Unknown suffix {suffix} to category {category} found in file {file}")
            }
            Self::MissingPriority { group } => format!(
                "Missing priority for a region feature of group {group}, skipping feature. ({file})"
            ),
            Self::MissingLabel { group } => format!(
                "Missing label attribute for a freetext feature of group {group}, skipping feature. ({file})"
            ),
            Self::EmptyGeometry { group } => {
                format!("Found an empty feature of group {group} in file {file}, skipping.")
            }
            Self::BucketMismatch {
                group,
                kind,
                target,
            } => format!(
                "Tried mapping a {kind} feature of group {group} to {target}, skipping feature. ({file})"
            ),
        }
    }
}

/// Converts one input file, folding its features into the run context.
///
/// Per-feature problems are logged and skipped; only a file that cannot be
/// read or parsed fails the run.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid GeoJSON.
pub fn process_file(path: &Path, table: &RuleTable, ctx: &mut RunContext) -> Result<()> {
    let collection = read_feature_collection(path)?;
    for feature in collection.features {
        process_feature(path, feature, table, ctx);
    }
    Ok(())
}

/// Runs one feature through resolution, classification, and both target
/// formatters. Skips log a line; null geometries and ignore rules are
/// silent.
fn process_feature(file: &Path, feature: Feature, table: &RuleTable, ctx: &mut RunContext) {
    let skip = |reason: SkipReason, ctx: &mut RunContext| {
        ctx.log.entry(&reason.log_line(file));
    };

    let Some(geometry) = feature.geometry else {
        return;
    };
    let props = feature.properties;
    let Some(airport) = props.airport else {
        return skip(SkipReason::MissingAirport, ctx);
    };
    let Some(category) = props.category else {
        return skip(SkipReason::MissingCategory, ctx);
    };
    if category.contains("_dis") {
        return skip(SkipReason::Disabled, ctx);
    }

    let resolution = match resolve_category(table, &category, &airport) {
        Ok(resolution) => resolution,
        Err(reason) => return skip(reason, ctx),
    };
    for warning in &resolution.warnings {
        ctx.log.entry(&format!("{warning} ({})", file.display()));
    }
    let attributes = resolution.attributes;
    if attributes.ignore {
        return;
    }

    let color = resolve_color(props.color.as_deref(), &attributes.color, &table.colors);
    ctx.register_color(&color);

    let data = match attributes.bucket {
        Bucket::Area => match attributes.priority {
            Some(priority) => BucketData::Area { priority },
            None => {
                return skip(
                    SkipReason::MissingPriority {
                        group: attributes.group,
                    },
                    ctx,
                )
            }
        },
        Bucket::Line => BucketData::Line,
        Bucket::Label => match props.label {
            Some(text) => BucketData::Label { text },
            None => {
                return skip(
                    SkipReason::MissingLabel {
                        group: attributes.group,
                    },
                    ctx,
                )
            }
        },
    };

    let resolved = ResolvedFeature {
        group: attributes.group,
        color,
        data,
    };
    let classified = match classify(resolved, geometry) {
        Ok(classified) => classified,
        Err(reason) => return skip(reason, ctx),
    };
    if let Some(warning) = &classified.warning {
        ctx.log.entry(&format!("{warning} ({})", file.display()));
    }

    ctx.bundle
        .accumulate_es(euroscope::format_feature(&classified.feature));
    ctx.bundle
        .accumulate_gng(gng::format_feature(&classified.feature));
}
