//! Category resolution: maps a `_`-delimited category tag through the rule
//! table into a fully substituted attribute set.

use crate::models::rules::{AttributeSet, RuleTable};
use crate::pipeline::SkipReason;
use regex::Regex;
use std::sync::LazyLock;

/// Runway designators: two digits 00-39, optionally followed by L/C/R.
/// Search semantics, matching anywhere inside a token.
static RUNWAY_DESIGNATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-3][0-9][LCR]?").expect("runway pattern is valid"));

/// A successful resolution: the merged attribute set plus any non-fatal
/// warnings collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The merged, placeholder-substituted attribute set.
    pub attributes: AttributeSet,
    /// Warnings to forward to the run log.
    pub warnings: Vec<String>,
}

/// Resolves a category tag against the rule table.
///
/// The tag splits on `_` into a main category and suffix tokens. The main
/// category selects the rule and its default attributes; the first suffix
/// merges its overrides on top. A remaining token matching the runway
/// designator pattern fills a `$1` placeholder in the group template;
/// otherwise any declared additional-suffix override whose key appears
/// among the remaining tokens is merged in. `$airport` is substituted
/// last.
///
/// Resolution is a pure function of `(table, tag, airport)`.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the main category or the first suffix is
/// not present in the rule table.
pub fn resolve_category(
    table: &RuleTable,
    tag: &str,
    airport: &str,
) -> Result<Resolution, SkipReason> {
    let tokens: Vec<&str> = tag.split('_').collect();
    let main_category = tokens[0];

    let rule = table
        .categories
        .get(main_category)
        .ok_or_else(|| SkipReason::UnknownCategory(main_category.to_string()))?;

    let mut attributes = rule.default.clone();
    let mut warnings = Vec::new();

    if let Some(&suffix) = tokens.get(1) {
        let suffix_rule = rule.suffixes.get(suffix).ok_or_else(|| {
            SkipReason::UnknownSuffix {
                suffix: suffix.to_string(),
                category: main_category.to_string(),
            }
        })?;
        attributes.apply(&suffix_rule.overrides);

        let remaining = &tokens[2..];
        if attributes.group.contains("$1") {
            if let Some(designator) = remaining
                .iter()
                .find(|token| RUNWAY_DESIGNATOR.is_match(token))
            {
                attributes.group = attributes.group.replace("$1", designator);
            } else if let Some(extra) = remaining.first() {
                warnings.push(format!(
                    "Unmappable additional suffix {extra} found in {tag}"
                ));
            }
        } else {
            for (key, overrides) in &suffix_rule.additional {
                if remaining.contains(&key.as_str()) {
                    attributes.apply(overrides);
                }
            }
        }
    }

    attributes.group = attributes.group.replace("$airport", airport);

    Ok(Resolution {
        attributes,
        warnings,
    })
}
