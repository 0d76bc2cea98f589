//! Sectorgen - GeoJSON to EuroScope sector-file converter
//!
//! Reads GeoJSON ground layouts exported from QGIS, resolves each feature
//! through the rule table, and writes sector-file sections plus GNG
//! import text and a run log into the output directory.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sectorgen::export::{assemble_es, assemble_gng, color_definitions, fill_ese_template, fill_sct_template};
use sectorgen::parser::load_rule_table;
use sectorgen::pipeline::{process_file, RunContext};
use sectorgen::scan::find_geojson_files;
use std::fs;
use std::path::PathBuf;

/// Sectorgen - GeoJSON to EuroScope sector-file converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the .geojson input files
    #[arg(short, long, value_name = "DIR")]
    input: PathBuf,

    /// Path to the exporter definitions JSON (rule table)
    #[arg(short, long, value_name = "FILE")]
    definitions: PathBuf,

    /// Header template for the generated .sct file
    #[arg(long, value_name = "FILE")]
    sct_header: PathBuf,

    /// Header template for the generated .ese file
    #[arg(long, value_name = "FILE")]
    ese_header: PathBuf,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR", default_value = "out")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("sectorgen v{}", env!("CARGO_PKG_VERSION"));

    let table = load_rule_table(&cli.definitions)?;
    let sct_template = fs::read_to_string(&cli.sct_header)
        .with_context(|| format!("Failed to read sct header template {}", cli.sct_header.display()))?;
    let ese_template = fs::read_to_string(&cli.ese_header)
        .with_context(|| format!("Failed to read ese header template {}", cli.ese_header.display()))?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory {}", cli.out_dir.display()))?;

    let files = find_geojson_files(&cli.input)?;
    if files.is_empty() {
        anyhow::bail!("No .geojson files found in {}", cli.input.display());
    }
    println!("Converting {} input files...", files.len());

    let mut ctx = RunContext::new();
    for file in &files {
        process_file(file, &table, &mut ctx)?;
    }
    let undeclared = ctx.undeclared_colors(&table.colors);
    let RunContext {
        bundle,
        colors_used,
        log,
    } = ctx;

    let now = Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let stamp = now.format("%Y%m%d-%H%M%S").to_string();

    let es = assemble_es(&bundle);
    let colors = color_definitions(&table.colors)?;
    let sct = fill_sct_template(&sct_template, &date, &es.regions, &es.geo, &colors);
    let ese = fill_ese_template(&ese_template, &date, &es.freetext);
    let gng = assemble_gng(&bundle);

    let write = |name: String, contents: &str| -> Result<PathBuf> {
        let path = cli.out_dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    };

    write(format!("sector-{stamp}.sct"), &sct)?;
    write(format!("sector-{stamp}.ese"), &ese)?;
    write(format!("gng_regions-{stamp}.txt"), &gng.regions)?;
    write(format!("gng_geo-{stamp}.txt"), &gng.geo)?;
    write(format!("gng_freetext-{stamp}.txt"), &gng.freetext)?;

    for name in &undeclared {
        println!("Color {name} either misspelled or not defined!");
    }

    let log_path = write(format!("log-{stamp}.txt"), &log.finish(&colors_used))?;

    println!("✓ Wrote sector files and GNG import text to {}", cli.out_dir.display());
    println!("✓ Run log at {}", log_path.display());

    Ok(())
}
