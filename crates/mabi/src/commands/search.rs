//! Search command implementation.
//!
//! Fetches listings for a category, applies the filters compiled from the
//! command line, and prints the survivors.

use mabi_auction_api::{AuctionClient, AuctionItem};
use mabi_auction_filter::{FilterEngine, FilterKind, MetadataCache, MetadataStore};

use super::{CommandContext, Result};
use crate::cli::FilterArgs;
use crate::output;

/// Options for the search command.
pub struct SearchOptions {
    pub category: String,
    pub keyword: Option<String>,
    pub limit: usize,
    pub filters: FilterArgs,
}

/// Executes the search command.
pub async fn execute(ctx: &CommandContext, client: &AuctionClient, opts: &SearchOptions) -> Result<()> {
    let descriptors = opts.filters.to_descriptors()?;

    let items = fetch_items(ctx, client, opts).await?;
    let scanned = items.len();

    let mut engine = FilterEngine::new();
    engine.set_category(opts.category.clone());
    engine.set_items(items);
    for descriptor in descriptors {
        engine.set_filter(descriptor);
    }

    let matching = engine.apply();

    if matching.is_empty() && !ctx.quiet && !ctx.json_output {
        print_reforge_hints(&engine, &opts.category).await;
    }

    output::items::print_items(ctx, &matching, scanned)?;
    Ok(())
}

/// Follows pagination cursors until the limit is reached or the category
/// is exhausted.
async fn fetch_items(
    ctx: &CommandContext,
    client: &AuctionClient,
    opts: &SearchOptions,
) -> Result<Vec<AuctionItem>> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let response = client
            .search(&opts.category, opts.keyword.as_deref(), cursor.as_deref())
            .await?;
        items.extend(response.items);

        if ctx.verbose {
            eprintln!("fetched {} listings so far", items.len());
        }

        cursor = response.next_cursor;
        if cursor.is_none() || items.len() >= opts.limit {
            break;
        }
    }

    items.truncate(opts.limit);
    Ok(items)
}

/// Prints "did you mean" hints for reforge slot queries that matched
/// nothing. Vocabulary problems are not worth failing the search over.
async fn print_reforge_hints(engine: &FilterEngine, category: &str) {
    let Some(reforge) = engine
        .filters()
        .iter()
        .find(|f| matches!(f.kind, FilterKind::ReforgeOption { .. }))
    else {
        return;
    };
    let Some(slots) = reforge.kind.slots() else {
        return;
    };
    let Ok(store) = MetadataStore::new() else {
        return;
    };

    let mut cache = MetadataCache::new(store);
    for slot in slots {
        if slot.name_query.trim().is_empty() {
            continue;
        }
        if let Ok(Some(suggestion)) = cache
            .suggest_reforge_option(category, &slot.name_query)
            .await
        {
            eprintln!("No matches for '{}'. Did you mean '{suggestion}'?", slot.name_query);
        }
    }
}
