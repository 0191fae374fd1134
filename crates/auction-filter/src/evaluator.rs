//! Predicate evaluation against auction items.
//!
//! The [`Evaluator`] decides, per filter kind, whether a given item
//! satisfies a given [`FilterDescriptor`]. Matching is a pure function
//! of (item, filter) and never returns an error: malformed numeric
//! payloads degrade to 0 and a
//! descriptor of unknown kind passes every item (fail-open).
//!
//! # Example
//!
//! ```
//! use mabi_auction_api::{AuctionItem, ItemOption};
//! use mabi_auction_filter::{Evaluator, FilterDescriptor, OptionRegistry};
//!
//! let evaluator = Evaluator::new(OptionRegistry::standard());
//!
//! let item = AuctionItem {
//!     id: "a-1".to_string(),
//!     display_name: "롱 소드".to_string(),
//!     price: 10_000,
//!     options: vec![ItemOption {
//!         option_type: "공격".to_string(),
//!         value: "30".to_string(),
//!         value2: Some("150".to_string()),
//!         sub_type: None,
//!         desc: None,
//!     }],
//!     expires_at: None,
//! };
//!
//! let filter = FilterDescriptor::range("공격", Some(100.0), Some(200.0));
//! assert!(evaluator.matches(&item, &filter));
//! ```

use mabi_auction_api::{AuctionItem, ItemOption};

use crate::descriptor::{FilterDescriptor, FilterKind, SlotQuery, MAX_SLOTS};
use crate::registry::{option_types, DerivedValue, EnchantSlot, OptionRegistry, ValueField};

/// Evaluates filter descriptors against items.
///
/// The evaluator borrows the same [`OptionRegistry`] the facet extractor
/// uses, so derived-value rules and default field selectors can never
/// drift between the two.
#[derive(Debug)]
pub struct Evaluator<'a> {
    registry: &'a OptionRegistry,
}

/// Which payload a multi-slot bound check reads.
enum SlotPayload {
    /// Level embedded in the option text, "(N레벨:…".
    EmbeddedLevel,
    /// The secondary payload field.
    Value2,
}

impl<'a> Evaluator<'a> {
    /// Creates a new evaluator over the given registry.
    pub fn new(registry: &'a OptionRegistry) -> Self {
        Self { registry }
    }

    /// Returns true if the item satisfies the filter.
    pub fn matches(&self, item: &AuctionItem, filter: &FilterDescriptor) -> bool {
        match &filter.kind {
            FilterKind::Range {
                field, min, max, ..
            } => self.range_matches(item, &filter.name, *field, *min, *max),

            FilterKind::Selection { field, value } => {
                self.selection_matches(item, &filter.name, *field, value)
            }

            FilterKind::Enchant {
                prefix_query,
                suffix_query,
            } => {
                enchant_side_matches(item, EnchantSlot::Prefix, prefix_query.as_deref())
                    && enchant_side_matches(item, EnchantSlot::Suffix, suffix_query.as_deref())
            }

            FilterKind::ReforgeStatus { rank, line_count } => {
                reforge_status_matches(item, *rank, *line_count)
            }

            FilterKind::ReforgeOption { slots } => slots_match(
                item,
                slots,
                option_types::REFORGE_OPTION,
                SlotPayload::EmbeddedLevel,
            ),

            FilterKind::Erg {
                grade,
                min_level,
                max_level,
            } => erg_matches(item, grade.as_deref(), *min_level, *max_level),

            FilterKind::SpecialModType { mod_type } => item
                .options_of_type(option_types::SPECIAL_MOD)
                .any(|o| o.sub_type.as_deref() == Some(mod_type.as_str())),

            FilterKind::SpecialModRange {
                mod_type,
                min,
                max,
            } => special_mod_range_matches(item, mod_type.as_deref(), *min, *max),

            FilterKind::SpecialModNone => {
                item.first_option(option_types::SPECIAL_MOD).is_none()
            }

            FilterKind::SetEffect { slots } => slots_match(
                item,
                slots,
                option_types::SET_EFFECT,
                SlotPayload::Value2,
            ),

            // Fail-open: a kind this version does not recognize never
            // rejects an item.
            FilterKind::Unknown => true,
        }
    }

    /// Inclusive numeric range over the first option of the filter's type.
    ///
    /// An absent option reads as 0, so only a configured positive floor can
    /// fail it.
    fn range_matches(
        &self,
        item: &AuctionItem,
        name: &str,
        field: Option<ValueField>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> bool {
        let Some(option) = item.first_option(name) else {
            return !min.is_some_and(|m| m > 0.0);
        };

        let spec = self.registry.get(name);
        let value = match spec.and_then(|s| s.derived) {
            Some(DerivedValue::PierceLevel) => {
                parse_numeric(&option.value)
                    + parse_numeric(option.value2.as_deref().unwrap_or(""))
            }
            None => {
                let field = field.or_else(|| spec.map(|s| s.field)).unwrap_or_default();
                parse_numeric(field_text(option, field))
            }
        };

        within(value, min, max)
    }

    /// Exact string equality; an absent option fails (no zero-default).
    fn selection_matches(
        &self,
        item: &AuctionItem,
        name: &str,
        field: Option<ValueField>,
        value: &str,
    ) -> bool {
        let Some(option) = item.first_option(name) else {
            return false;
        };
        let field = field
            .or_else(|| self.registry.get(name).map(|s| s.field))
            .unwrap_or_default();
        field_text(option, field) == value
    }
}

/// Matches one enchant position against an optional substring query.
///
/// An empty query always passes. Otherwise the item must carry at least one
/// enchant in that position, and at least one of them must contain the
/// query case-insensitively.
fn enchant_side_matches(item: &AuctionItem, slot: EnchantSlot, query: Option<&str>) -> bool {
    let Some(query) = normalized_query(query.unwrap_or("")) else {
        return true;
    };

    let mut any_in_position = false;
    let mut any_matched = false;
    for option in item.options_of_type(option_types::ENCHANT) {
        if option.sub_type.as_deref() != Some(slot.as_sub_type()) {
            continue;
        }
        any_in_position = true;
        if option.value.to_lowercase().contains(&query) {
            any_matched = true;
        }
    }

    any_in_position && any_matched
}

/// Reforge rank equality and/or exact reforge line count.
fn reforge_status_matches(
    item: &AuctionItem,
    rank: Option<u32>,
    line_count: Option<usize>,
) -> bool {
    let Some(rank_option) = item.first_option(option_types::REFORGE_RANK) else {
        return false;
    };

    if let Some(rank) = rank {
        if parse_numeric(&rank_option.value) != f64::from(rank) {
            return false;
        }
    }

    if let Some(line_count) = line_count {
        if item.options_of_type(option_types::REFORGE_OPTION).count() != line_count {
            return false;
        }
    }

    true
}

/// Erg grade equality and inclusive level bounds.
fn erg_matches(
    item: &AuctionItem,
    grade: Option<&str>,
    min_level: Option<u32>,
    max_level: Option<u32>,
) -> bool {
    let Some(option) = item.first_option(option_types::ERG) else {
        return false;
    };

    if let Some(grade) = grade {
        if option.sub_type.as_deref() != Some(grade) {
            return false;
        }
    }

    let level = parse_numeric(&option.value);
    within(level, min_level.map(f64::from), max_level.map(f64::from))
}

/// Special remodel level range, optionally restricted to one mod type.
fn special_mod_range_matches(
    item: &AuctionItem,
    mod_type: Option<&str>,
    min: Option<f64>,
    max: Option<f64>,
) -> bool {
    let mods: Vec<&ItemOption> = item
        .options_of_type(option_types::SPECIAL_MOD)
        .filter(|o| mod_type.is_none_or(|t| o.sub_type.as_deref() == Some(t)))
        .collect();

    if mods.is_empty() {
        return false;
    }
    if min.is_none() && max.is_none() {
        return true;
    }

    mods.iter()
        .any(|o| within(parse_numeric(&o.value), min, max))
}

/// The shared multi-slot algorithm for reforge options and set effects.
///
/// Each non-empty slot must find at least one option whose value contains
/// its name query (AND across slots). When a slot carries bounds, at least
/// one of the matching options must satisfy them (OR within the slot); a
/// reforge entry without a parseable level passes the bound check.
fn slots_match(
    item: &AuctionItem,
    slots: &[SlotQuery],
    option_type: &str,
    payload: SlotPayload,
) -> bool {
    for slot in slots.iter().take(MAX_SLOTS) {
        let Some(query) = normalized_query(&slot.name_query) else {
            continue;
        };

        let matches: Vec<&ItemOption> = item
            .options_of_type(option_type)
            .filter(|o| o.value.to_lowercase().contains(&query))
            .collect();
        if matches.is_empty() {
            return false;
        }

        if slot.min.is_none() && slot.max.is_none() {
            continue;
        }

        let in_bounds = matches.iter().any(|o| match payload {
            SlotPayload::EmbeddedLevel => match embedded_level(&o.value) {
                Some(level) => within(level, slot.min, slot.max),
                None => true,
            },
            SlotPayload::Value2 => within(
                parse_numeric(o.value2.as_deref().unwrap_or("")),
                slot.min,
                slot.max,
            ),
        });
        if !in_bounds {
            return false;
        }
    }

    true
}

/// Reads the requested payload field of an option.
fn field_text(option: &ItemOption, field: ValueField) -> &str {
    match field {
        ValueField::Value => &option.value,
        ValueField::Value2 => option.value2.as_deref().unwrap_or(""),
    }
}

/// Parses a loosely formatted numeric payload.
///
/// Strips every character except digits, `.` and `-` before parsing;
/// anything unparseable after that degrades to 0.
pub(crate) fn parse_numeric(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Extracts the level token embedded in a reforge line, e.g.
/// "스매시 대미지(18레벨:180 % 증가)" yields 18.
pub(crate) fn embedded_level(text: &str) -> Option<f64> {
    let marker = text.find("레벨")?;
    let digits: Vec<char> = text[..marker]
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.into_iter().rev().collect::<String>().parse().ok()
}

/// Inclusive bound check; an unset bound is unconstrained on that side.
fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

/// Trims and lowercases a query; empty or whitespace-only queries are
/// treated as absent.
fn normalized_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
