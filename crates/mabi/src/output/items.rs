//! Listing output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use mabi_auction_api::AuctionItem;

use super::helpers::{format_price, pad_str, truncate_str};
use crate::commands::{CommandContext, Result};

const NAME_COLUMN_WIDTH: usize = 28;

/// JSON output structure for the search command.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub items: Vec<ItemOutput<'a>>,
    pub matched: usize,
    pub scanned: usize,
}

/// JSON output structure for a single listing.
#[derive(Serialize)]
pub struct ItemOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: i64,
    pub options: Vec<OptionOutput<'a>>,
}

/// JSON output structure for one item option.
#[derive(Serialize)]
pub struct OptionOutput<'a> {
    #[serde(rename = "type")]
    pub option_type: &'a str,
    pub value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<&'a str>,
}

/// Prints search results as a table or JSON.
pub fn print_items(ctx: &CommandContext, items: &[&AuctionItem], scanned: usize) -> Result<()> {
    if ctx.json_output {
        let output = SearchOutput {
            items: items.iter().map(|item| item_output(item)).collect(),
            matched: items.len(),
            scanned,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    if items.is_empty() {
        println!("No listings matched ({scanned} scanned).");
        return Ok(());
    }

    for item in items {
        let name = pad_str(&truncate_str(&item.display_name, NAME_COLUMN_WIDTH), NAME_COLUMN_WIDTH);
        let price = format!("{} Gold", format_price(item.price));

        if ctx.use_colors {
            println!("{}  {}", name.bold(), price.yellow());
        } else {
            println!("{name}  {price}");
        }

        if ctx.verbose {
            for option in &item.options {
                let mut line = format!("    {}: {}", option.option_type, option.value);
                if let Some(value2) = &option.value2 {
                    line.push_str(&format!(" ~ {value2}"));
                }
                if let Some(sub_type) = &option.sub_type {
                    line.push_str(&format!(" [{sub_type}]"));
                }
                if ctx.use_colors {
                    println!("{}", line.dimmed());
                } else {
                    println!("{line}");
                }
            }
        }
    }

    println!("\n{} of {} listings matched.", items.len(), scanned);
    Ok(())
}

fn item_output(item: &AuctionItem) -> ItemOutput<'_> {
    ItemOutput {
        id: &item.id,
        name: &item.display_name,
        price: item.price,
        options: item
            .options
            .iter()
            .map(|o| OptionOutput {
                option_type: &o.option_type,
                value: &o.value,
                value2: o.value2.as_deref(),
                sub_type: o.sub_type.as_deref(),
            })
            .collect(),
    }
}
