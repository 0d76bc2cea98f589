//! Mutable run state: per-bucket, per-target accumulators, the colors-used
//! registry, and the run log. Created per run and returned by value, so no
//! run observes state left behind by a previous one.

use crate::export::euroscope::EsRecord;
use crate::export::gng::GngRecord;
use crate::models::color::SectorColor;
use crate::models::rules::ColorDefs;
use crate::runlog::RunLog;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A formatted region body with its ordering keys.
///
/// `seq` is the arrival index within its list; sorting on
/// `(priority, seq)` gives ascending priority with arrival order breaking
/// ties, without relying on sort stability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedRegion {
    /// Draw priority; lower paints first.
    pub priority: i64,
    /// Arrival index, the tie-break key.
    pub seq: usize,
    /// The formatted region text.
    pub body: String,
}

/// Accumulated GNG geo lines for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoGroup {
    /// Airport code split off the group name.
    pub airport: String,
    /// Category token following the airport code.
    pub category: String,
    /// Remainder of the group name.
    pub name: String,
    /// Concatenated segment lines, same-group records joined by a blank
    /// line.
    pub code: String,
}

/// Accumulated GNG freetext lines for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreetextGroup {
    /// Airport code split off the group name.
    pub airport: String,
    /// Label group following the airport code.
    pub labelgroup: String,
    /// Concatenated label lines, newline-separated.
    pub code: String,
}

/// All output accumulated across the input files: three buckets times two
/// targets.
#[derive(Debug, Clone, Default)]
pub struct OutputBundle {
    /// AREA records for the primary target, in arrival order; sorted into
    /// one global paint order at assembly.
    pub es_regions: Vec<OrderedRegion>,
    /// LINE body for the primary target, appended in arrival order.
    pub es_geo: String,
    /// LABEL body for the primary target, appended in arrival order.
    pub es_freetext: String,
    /// AREA records for the secondary target, one ordered list per layer
    /// group.
    pub gng_regions: BTreeMap<String, Vec<OrderedRegion>>,
    /// LINE groups for the secondary target, keyed by group name.
    pub gng_geo: BTreeMap<String, GeoGroup>,
    /// LABEL groups for the secondary target, keyed by group name.
    pub gng_freetext: BTreeMap<String, FreetextGroup>,
}

impl OutputBundle {
    /// Folds a primary-target record into the bundle.
    pub fn accumulate_es(&mut self, record: EsRecord) {
        match record {
            EsRecord::Region { priority, body } => {
                let seq = self.es_regions.len();
                self.es_regions.push(OrderedRegion {
                    priority,
                    seq,
                    body,
                });
            }
            EsRecord::Geo(body) => self.es_geo.push_str(&body),
            EsRecord::Freetext(line) => self.es_freetext.push_str(&line),
        }
    }

    /// Folds a secondary-target record into the bundle.
    pub fn accumulate_gng(&mut self, record: GngRecord) {
        match record {
            GngRecord::Region {
                priority,
                name,
                body,
            } => {
                let group = self.gng_regions.entry(name).or_default();
                let seq = group.len();
                group.push(OrderedRegion {
                    priority,
                    seq,
                    body,
                });
            }
            GngRecord::Geo {
                group,
                airport,
                category,
                name,
                code,
            } => match self.gng_geo.entry(group) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    existing.code.push('\n');
                    existing.code.push_str(&code);
                }
                Entry::Vacant(entry) => {
                    entry.insert(GeoGroup {
                        airport,
                        category,
                        name,
                        code,
                    });
                }
            },
            GngRecord::Freetext {
                group,
                airport,
                labelgroup,
                code,
            } => match self.gng_freetext.entry(group) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    existing.code.push('\n');
                    existing.code.push_str(&code);
                }
                Entry::Vacant(entry) => {
                    entry.insert(FreetextGroup {
                        airport,
                        labelgroup,
                        code,
                    });
                }
            },
        }
    }
}

/// Everything mutable during a run.
#[derive(Debug, Default)]
pub struct RunContext {
    /// The accumulated output.
    pub bundle: OutputBundle,
    /// Every distinct resolved color, in first-use order.
    pub colors_used: Vec<SectorColor>,
    /// The run log buffer.
    pub log: RunLog,
}

impl RunContext {
    /// Creates a fresh context for one run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolved color in the deduplicated registry.
    pub fn register_color(&mut self, color: &SectorColor) {
        if !self.colors_used.contains(color) {
            self.colors_used.push(color.clone());
        }
    }

    /// Bare names of used colors that the declared palette does not
    /// contain. Decimal colors can never match a palette name and are
    /// reported as well, mirroring the end-of-run report this check
    /// replaces.
    #[must_use]
    pub fn undeclared_colors(&self, defs: &ColorDefs) -> Vec<String> {
        self.colors_used
            .iter()
            .map(SectorColor::bare)
            .filter(|name| !name.is_empty() && !defs.declares(name))
            .collect()
    }
}

/// Sorts region records into their final paint order.
#[must_use]
pub fn paint_order(regions: &[OrderedRegion]) -> Vec<&OrderedRegion> {
    let mut ordered: Vec<&OrderedRegion> = regions.iter().collect();
    ordered.sort_by_key(|region| (region.priority, region.seq));
    ordered
}
