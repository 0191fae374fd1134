//! Facet extraction.
//!
//! A facet is a filterable view over one item option: the option joined
//! with the registry entry that describes how to read it. Extraction is
//! ordered and never deduplicates, so an item carrying three reforge
//! lines yields three reforge facets.

use mabi_auction_api::{AuctionItem, ItemOption};

use crate::evaluator::parse_numeric;
use crate::registry::{DerivedValue, OptionRegistry, OptionTypeSpec, ValueField};

/// One filterable aspect of an item.
///
/// Borrows both the registry entry and the source option; `option_index`
/// points back into the item's option list.
#[derive(Debug, Clone, Copy)]
pub struct Facet<'a> {
    pub spec: &'a OptionTypeSpec,
    pub option: &'a ItemOption,
    pub option_index: usize,
}

impl Facet<'_> {
    /// The display name of the option type this facet reads.
    pub fn display_name(&self) -> &str {
        self.spec.display_name
    }

    /// Renders the value a filter on this facet would compare against.
    pub fn display_value(&self) -> String {
        match self.spec.derived {
            Some(DerivedValue::PierceLevel) => {
                let level = parse_numeric(&self.option.value)
                    + parse_numeric(self.option.value2.as_deref().unwrap_or(""));
                format!("{level}")
            }
            None => {
                let text = match self.spec.field {
                    ValueField::Value => self.option.value.as_str(),
                    ValueField::Value2 => self.option.value2.as_deref().unwrap_or(""),
                };
                if self.spec.is_percent && !text.ends_with('%') {
                    format!("{text}%")
                } else {
                    text.to_string()
                }
            }
        }
    }
}

/// Extracts the filterable facets of an item, in option order.
///
/// Options whose type is not in the registry yield no facet and cannot
/// be filtered on.
pub fn extract_facets<'a>(
    item: &'a AuctionItem,
    registry: &'a OptionRegistry,
) -> Vec<Facet<'a>> {
    item.options
        .iter()
        .enumerate()
        .filter_map(|(option_index, option)| {
            registry.get(&option.option_type).map(|spec| Facet {
                spec,
                option,
                option_index,
            })
        })
        .collect()
}
