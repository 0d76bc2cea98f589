//! Final assembly: turns the accumulated bundle into the text bodies that
//! are written to disk, fills the sector-file header templates, and
//! renders the `#define` color block.

use crate::constants::{GNG_HEADER_PREFIX, GNG_PROVENANCE};
use crate::models::color::RgbColor;
use crate::models::rules::ColorDefs;
use crate::pipeline::context::{paint_order, OutputBundle};
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// The three assembled bodies for the primary target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsBodies {
    /// All region blocks in global paint order.
    pub regions: String,
    /// The geo body, in arrival order.
    pub geo: String,
    /// The freetext body, in arrival order.
    pub freetext: String,
}

/// The three assembled bodies for the secondary target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GngBodies {
    /// Region import text, one header per layer group.
    pub regions: String,
    /// Geo import text, one header per group.
    pub geo: String,
    /// Freetext import text, one header per group.
    pub freetext: String,
}

/// Assembles the primary-target bodies from the bundle.
///
/// Regions from all input files are sorted into one global paint order;
/// geo and freetext keep arrival order.
#[must_use]
pub fn assemble_es(bundle: &OutputBundle) -> EsBodies {
    let mut regions = String::new();
    for region in paint_order(&bundle.es_regions) {
        regions.push_str(&region.body);
    }
    EsBodies {
        regions,
        geo: bundle.es_geo.clone(),
        freetext: bundle.es_freetext.clone(),
    }
}

/// Assembles the secondary-target bodies from the bundle.
///
/// Each group gets its own import header; regions are paint-ordered per
/// group rather than globally.
#[must_use]
pub fn assemble_gng(bundle: &OutputBundle) -> GngBodies {
    let mut regions = String::new();
    for (name, group) in &bundle.gng_regions {
        let airport = name.get(..4).unwrap_or(name);
        let _ = writeln!(
            regions,
            "{GNG_HEADER_PREFIX}:{airport}:{name}:ES,VRC:{GNG_PROVENANCE}"
        );
        for region in paint_order(group) {
            regions.push_str(&region.body);
            regions.push('\n');
        }
        regions.push('\n');
    }

    let mut geo = String::new();
    for group in bundle.gng_geo.values() {
        let _ = writeln!(
            geo,
            "{GNG_HEADER_PREFIX}:{}:{}:{}::GEO::{GNG_PROVENANCE}",
            group.airport, group.category, group.name
        );
        geo.push_str(&group.code);
        geo.push('\n');
    }

    let mut freetext = String::new();
    for group in bundle.gng_freetext.values() {
        let _ = writeln!(
            freetext,
            "{GNG_HEADER_PREFIX}:{}:{}:ES-ESE:{GNG_PROVENANCE}",
            group.airport, group.labelgroup
        );
        freetext.push_str(&group.code);
        freetext.push_str("\n\n");
    }

    GngBodies {
        regions,
        geo,
        freetext,
    }
}

/// Renders the `#define COLOR_<Name>` block from the declared palette.
///
/// The define is left-justified to 30 characters and the decimal value
/// right-justified to 9, matching the column layout sector files use.
///
/// # Errors
///
/// Fails when a palette entry carries a malformed hex value.
pub fn color_definitions(defs: &ColorDefs) -> Result<String> {
    let mut block = String::new();
    for entry in &defs.palette {
        let rgb = RgbColor::from_hex(&entry.hex)
            .with_context(|| format!("Invalid hex value for palette color {}", entry.name))?;
        let _ = writeln!(
            block,
            "{:<30}{:>9}",
            format!("#define COLOR_{}", entry.name),
            rgb.to_es_decimal()
        );
    }
    Ok(block)
}

/// Fills the `.sct` header template.
///
/// The padded `$date     ` placeholder is replaced first so that headers
/// aligning trailing text stay intact for ten-character dates.
#[must_use]
pub fn fill_sct_template(
    template: &str,
    date: &str,
    regions: &str,
    geo: &str,
    colors: &str,
) -> String {
    template
        .replace("$date     ", date)
        .replace("$date", date)
        .replace("$regions", regions)
        .replace("$geo", geo)
        .replace("$colors", colors)
}

/// Fills the `.ese` header template.
#[must_use]
pub fn fill_ese_template(template: &str, date: &str, freetext: &str) -> String {
    template
        .replace("$date     ", date)
        .replace("$date", date)
        .replace("$freetext", freetext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::euroscope::EsRecord;
    use crate::export::gng::GngRecord;

    fn bundle_with_regions() -> OutputBundle {
        let mut bundle = OutputBundle::default();
        bundle.accumulate_es(EsRecord::Region {
            priority: 3,
            body: "late\n".to_string(),
        });
        bundle.accumulate_es(EsRecord::Region {
            priority: 1,
            body: "early\n".to_string(),
        });
        bundle
    }

    #[test]
    fn test_es_regions_follow_paint_order() {
        let bodies = assemble_es(&bundle_with_regions());
        assert_eq!(bodies.regions, "early\nlate\n");
    }

    #[test]
    fn test_gng_region_headers_and_order() {
        let mut bundle = OutputBundle::default();
        for (priority, body) in [(2, "second\n"), (1, "first\n")] {
            bundle.accumulate_gng(GngRecord::Region {
                priority,
                name: "LSZH Apron".to_string(),
                body: body.to_string(),
            });
        }
        let bodies = assemble_gng(&bundle);
        assert_eq!(
            bodies.regions,
            "AERONAV:LSZH:LSZH Apron:ES,VRC:QGIS 2205\nfirst\n\nsecond\n\n\n"
        );
    }

    #[test]
    fn test_gng_geo_and_freetext_headers() {
        let mut bundle = OutputBundle::default();
        bundle.accumulate_gng(GngRecord::Geo {
            group: "LSZH TWY A NORTH".to_string(),
            airport: "LSZH".to_string(),
            category: "TWY".to_string(),
            name: "A NORTH".to_string(),
            code: "segment\n".to_string(),
        });
        bundle.accumulate_gng(GngRecord::Freetext {
            group: "LSZH_abc".to_string(),
            airport: "LSZH".to_string(),
            labelgroup: "abc".to_string(),
            code: "N047.27.00.000:E008.33.00.000::RWY".to_string(),
        });

        let bodies = assemble_gng(&bundle);
        assert_eq!(
            bodies.geo,
            "AERONAV:LSZH:TWY:A NORTH::GEO::QGIS 2205\nsegment\n\n"
        );
        assert_eq!(
            bodies.freetext,
            "AERONAV:LSZH:abc:ES-ESE:QGIS 2205\nN047.27.00.000:E008.33.00.000::RWY\n\n"
        );
    }

    #[test]
    fn test_color_definitions_block() {
        let defs: ColorDefs = serde_json::from_str(
            r##"{"Sector File Colors": [
                {"Name": "white", "Hex": "#FFFFFF"},
                {"Name": "taxiway", "Hex": "#FF8000"}
            ], "Additional Colors": []}"##,
        )
        .unwrap();
        let block = color_definitions(&defs).unwrap();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "#define COLOR_white            16777215");
        assert_eq!(lines[1], "#define COLOR_taxiway             33023");
    }

    #[test]
    fn test_color_definitions_rejects_bad_hex() {
        let defs: ColorDefs = serde_json::from_str(
            r##"{"Sector File Colors": [{"Name": "odd", "Hex": "#XYZ"}], "Additional Colors": []}"##,
        )
        .unwrap();
        let error = color_definitions(&defs).unwrap_err();
        assert!(error.to_string().contains("odd"));
    }

    #[test]
    fn test_template_fill() {
        let sct = fill_sct_template(
            "; built $date     |\n$colors\n$regions\n$geo\n",
            "2026-08-23",
            "R",
            "G",
            "C",
        );
        assert_eq!(sct, "; built 2026-08-23|\nC\nR\nG\n");

        let ese = fill_ese_template("; $date\n$freetext", "2026-08-23", "F");
        assert_eq!(ese, "; 2026-08-23\nF");
    }
}
