//! Serde models for the exporter definitions file (the rule table).
//!
//! Key names mirror the definitions JSON so existing rule files load
//! unchanged. The table is read once at startup and never modified.

use crate::models::feature::Bucket;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The full rule table: category mapping plus color declarations.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleTable {
    /// Main category -> resolution rule.
    #[serde(rename = "Category Mapping")]
    pub categories: BTreeMap<String, CategoryRule>,
    /// Declared palette and alias colors.
    #[serde(rename = "Colors")]
    pub colors: ColorDefs,
}

/// One row of the rule table, keyed by main category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    /// Attribute set a bare main category resolves to.
    pub default: AttributeSet,
    /// Overrides applied when the first suffix token matches.
    #[serde(default)]
    pub suffixes: BTreeMap<String, SuffixRule>,
}

/// A fully populated attribute set, as carried by a rule's `default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeSet {
    /// Group name template; may contain `$airport` and `$1` placeholders.
    #[serde(rename = "Group")]
    pub group: String,
    /// Output bucket the feature is routed to.
    #[serde(rename = "ES Category")]
    pub bucket: Bucket,
    /// Default color (name, hex code, or decimal string).
    #[serde(rename = "Color")]
    pub color: String,
    /// Draw priority; required for features resolving to the AREA bucket.
    #[serde(rename = "Priority", default)]
    pub priority: Option<i64>,
    /// Features marked ignore are dropped without logging.
    #[serde(rename = "Ignore", default)]
    pub ignore: bool,
}

impl AttributeSet {
    /// Merges an override into this set, field by field.
    pub fn apply(&mut self, overrides: &AttributeOverride) {
        if let Some(group) = &overrides.group {
            self.group.clone_from(group);
        }
        if let Some(bucket) = overrides.bucket {
            self.bucket = bucket;
        }
        if let Some(color) = &overrides.color {
            self.color.clone_from(color);
        }
        if let Some(priority) = overrides.priority {
            self.priority = Some(priority);
        }
        if let Some(ignore) = overrides.ignore {
            self.ignore = ignore;
        }
    }
}

/// A partial attribute set; unset fields keep the value being overridden.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeOverride {
    /// Replacement group name template.
    #[serde(rename = "Group")]
    pub group: Option<String>,
    /// Replacement output bucket.
    #[serde(rename = "ES Category")]
    pub bucket: Option<Bucket>,
    /// Replacement color.
    #[serde(rename = "Color")]
    pub color: Option<String>,
    /// Replacement draw priority.
    #[serde(rename = "Priority")]
    pub priority: Option<i64>,
    /// Replacement ignore flag.
    #[serde(rename = "Ignore")]
    pub ignore: Option<bool>,
}

/// A suffix rule: the override itself plus conditional overrides keyed by
/// further suffix tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct SuffixRule {
    /// The override merged when the suffix matches.
    #[serde(flatten)]
    pub overrides: AttributeOverride,
    /// Overrides applied when their key appears among the remaining tokens.
    #[serde(rename = "Additional Suffixes", default)]
    pub additional: BTreeMap<String, AttributeOverride>,
}

/// The colors section: the declared sector-file palette plus two-letter
/// alias shortcuts.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorDefs {
    /// Colors the sector file declares via `#define COLOR_<Name>`.
    #[serde(rename = "Sector File Colors", default)]
    pub palette: Vec<PaletteEntry>,
    /// Two-letter shortcuts for colors not yet in the sector file.
    #[serde(rename = "Additional Colors", default)]
    pub aliases: Vec<ColorAlias>,
}

impl ColorDefs {
    /// Looks up a two-letter alias, returning its declared value.
    #[must_use]
    pub fn alias(&self, tag: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|alias| alias.tag == tag)
            .map(|alias| alias.value.as_str())
    }

    /// Whether a bare color name is part of the declared palette.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.palette.iter().any(|entry| entry.name == name)
    }
}

/// One declared palette color.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteEntry {
    /// Name as used in `COLOR_<Name>` tokens.
    #[serde(rename = "Name")]
    pub name: String,
    /// Hex value the name resolves to.
    #[serde(rename = "Hex")]
    pub hex: String,
}

/// One two-letter alias entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorAlias {
    /// The two-letter tag used in feature color attributes.
    #[serde(rename = "Tag")]
    pub tag: String,
    /// The hex code or color name the tag resolves to.
    #[serde(rename = "Color")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r##"{
        "Category Mapping": {
            "apron": {
                "default": {
                    "Group": "$airport APRON",
                    "ES Category": "regions",
                    "Color": "grass",
                    "Priority": 2
                },
                "suffixes": {
                    "hi": {"Priority": 1},
                    "svc": {"Additional Suffixes": {"deice": {"Color": "blue"}}}
                }
            },
            "hold": {
                "default": {
                    "Group": "$airport HOLD",
                    "ES Category": "geo",
                    "Color": "#FF8000",
                    "Ignore": true
                }
            }
        },
        "Colors": {
            "Sector File Colors": [{"Name": "grass", "Hex": "#4C7300"}],
            "Additional Colors": [{"Tag": "gr", "Color": "#4C7300"}]
        }
    }"##;

    #[test]
    fn test_parse_rule_table() {
        let table: RuleTable = serde_json::from_str(RULES).unwrap();
        let apron = &table.categories["apron"];
        assert_eq!(apron.default.group, "$airport APRON");
        assert_eq!(apron.default.bucket, Bucket::Area);
        assert_eq!(apron.default.priority, Some(2));
        assert!(!apron.default.ignore);

        let hold = &table.categories["hold"];
        assert!(hold.default.ignore);
        assert!(hold.suffixes.is_empty());
        assert_eq!(hold.default.priority, None);
    }

    #[test]
    fn test_suffix_overrides() {
        let table: RuleTable = serde_json::from_str(RULES).unwrap();
        let apron = &table.categories["apron"];

        let hi = &apron.suffixes["hi"];
        assert_eq!(hi.overrides.priority, Some(1));
        assert!(hi.overrides.group.is_none());

        let svc = &apron.suffixes["svc"];
        assert_eq!(
            svc.additional["deice"].color.as_deref(),
            Some("blue")
        );
    }

    #[test]
    fn test_apply_override() {
        let table: RuleTable = serde_json::from_str(RULES).unwrap();
        let mut attributes = table.categories["apron"].default.clone();
        attributes.apply(&table.categories["apron"].suffixes["hi"].overrides);
        assert_eq!(attributes.priority, Some(1));
        // Untouched fields keep the defaults.
        assert_eq!(attributes.group, "$airport APRON");
        assert_eq!(attributes.color, "grass");
    }

    #[test]
    fn test_color_defs_lookup() {
        let table: RuleTable = serde_json::from_str(RULES).unwrap();
        assert_eq!(table.colors.alias("gr"), Some("#4C7300"));
        assert_eq!(table.colors.alias("zz"), None);
        assert!(table.colors.declares("grass"));
        assert!(!table.colors.declares("lava"));
    }
}
