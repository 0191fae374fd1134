//! Facet summary output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::pad_str;
use crate::commands::facets::FacetSummary;
use crate::commands::{CommandContext, Result};

const NAME_COLUMN_WIDTH: usize = 24;

/// JSON output structure for the facets command.
#[derive(Serialize)]
pub struct FacetsOutput<'a> {
    pub facets: Vec<FacetOutput<'a>>,
    pub scanned: usize,
}

/// JSON output structure for one facet summary.
#[derive(Serialize)]
pub struct FacetOutput<'a> {
    pub name: &'a str,
    pub listings: usize,
    pub sample: &'a str,
}

/// Prints the facet summary as a table or JSON.
pub fn print_facets(ctx: &CommandContext, facets: &[&FacetSummary], scanned: usize) -> Result<()> {
    if ctx.json_output {
        let output = FacetsOutput {
            facets: facets
                .iter()
                .map(|f| FacetOutput {
                    name: &f.display_name,
                    listings: f.listing_count,
                    sample: &f.sample_value,
                })
                .collect(),
            scanned,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    if facets.is_empty() {
        println!("No filterable options found ({scanned} listings scanned).");
        return Ok(());
    }

    let header = format!(
        "{}  {}  {}",
        pad_str("OPTION", NAME_COLUMN_WIDTH),
        pad_str("LISTINGS", 8),
        "SAMPLE"
    );
    if ctx.use_colors {
        println!("{}", header.bold());
    } else {
        println!("{header}");
    }

    for facet in facets {
        println!(
            "{}  {}  {}",
            pad_str(&facet.display_name, NAME_COLUMN_WIDTH),
            pad_str(&facet.listing_count.to_string(), 8),
            facet.sample_value
        );
    }

    println!("\n{scanned} listings scanned.");
    Ok(())
}
