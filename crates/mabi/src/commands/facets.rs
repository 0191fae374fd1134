//! Facets command implementation.
//!
//! Shows which option types the listings in a category actually carry,
//! so the user knows what `--range`/`--select` names will bite.

use std::collections::BTreeMap;

use mabi_auction_api::AuctionClient;
use mabi_auction_filter::{extract_facets, OptionRegistry};

use super::{CommandContext, Result};
use crate::output;

/// Options for the facets command.
pub struct FacetsOptions {
    pub category: String,
    pub keyword: Option<String>,
    pub limit: usize,
}

/// A facet summary row: option type, how many listings carry it, and a
/// sample value.
pub struct FacetSummary {
    pub display_name: String,
    pub listing_count: usize,
    pub sample_value: String,
}

/// Executes the facets command.
pub async fn execute(ctx: &CommandContext, client: &AuctionClient, opts: &FacetsOptions) -> Result<()> {
    let response = client
        .search(&opts.category, opts.keyword.as_deref(), None)
        .await?;
    let mut items = response.items;
    items.truncate(opts.limit);

    let registry = OptionRegistry::standard();
    let mut seen: BTreeMap<&str, FacetSummary> = BTreeMap::new();

    for item in &items {
        // Count each option type once per listing.
        let mut counted: Vec<&str> = Vec::new();
        for facet in extract_facets(item, registry) {
            let entry = seen.entry(facet.spec.type_name).or_insert_with(|| FacetSummary {
                display_name: facet.display_name().to_string(),
                listing_count: 0,
                sample_value: facet.display_value(),
            });
            if !counted.contains(&facet.spec.type_name) {
                entry.listing_count += 1;
                counted.push(facet.spec.type_name);
            }
        }
    }

    let summaries: Vec<&FacetSummary> = seen.values().collect();
    output::facets::print_facets(ctx, &summaries, items.len())?;
    Ok(())
}
