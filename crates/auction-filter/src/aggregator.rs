//! Active filter aggregation.
//!
//! [`ActiveFilters`] is the ordered set of filters currently in force.
//! Filters are keyed by option-type name: setting a filter for a name
//! that already has one replaces it in place, so insertion order never
//! accumulates duplicates. The multi-slot kinds (reforge options and
//! set effects) additionally support per-slot replacement.
//!
//! Evaluation is a strict AND across the set; an empty set passes every
//! item.

use mabi_auction_api::AuctionItem;

use crate::descriptor::{FilterDescriptor, FilterKind, SlotQuery, MAX_SLOTS};
use crate::evaluator::Evaluator;
use crate::registry::option_types;

/// The ordered collection of active filters.
#[derive(Debug, Clone, Default)]
pub struct ActiveFilters {
    filters: Vec<FilterDescriptor>,
}

/// Presentation grouping of active filters.
///
/// Grouping is derived from the filter kind alone and never affects
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Basic,
    Reforge,
    SetEffect,
    Special,
}

/// Active filters grouped for display.
#[derive(Debug, Default)]
pub struct CategorizedFilters<'a> {
    pub basic: Vec<&'a FilterDescriptor>,
    pub reforge: Vec<&'a FilterDescriptor>,
    pub set_effect: Vec<&'a FilterDescriptor>,
    pub special: Vec<&'a FilterDescriptor>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.iter()
    }

    /// Returns the active filter for an option-type name, if any.
    pub fn get(&self, name: &str) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.name == name)
    }

    /// Inserts a filter, replacing any existing filter with the same name.
    pub fn upsert(&mut self, filter: FilterDescriptor) {
        match self.filters.iter_mut().find(|f| f.name == filter.name) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    /// Removes the filter for a name, returning it if it was active.
    pub fn remove(&mut self, name: &str) -> Option<FilterDescriptor> {
        let index = self.filters.iter().position(|f| f.name == name)?;
        Some(self.filters.remove(index))
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Replaces one reforge-option slot, creating the filter if absent.
    ///
    /// `slot_index` beyond `MAX_SLOTS - 1` is ignored.
    pub fn upsert_reforge_slot(&mut self, slot_index: usize, slot: SlotQuery) {
        self.upsert_slot(
            option_types::REFORGE_OPTION,
            FilterKind::ReforgeOption { slots: Vec::new() },
            slot_index,
            slot,
        );
    }

    /// Replaces one set-effect slot, creating the filter if absent.
    pub fn upsert_set_effect_slot(&mut self, slot_index: usize, slot: SlotQuery) {
        self.upsert_slot(
            option_types::SET_EFFECT,
            FilterKind::SetEffect { slots: Vec::new() },
            slot_index,
            slot,
        );
    }

    fn upsert_slot(
        &mut self,
        name: &str,
        empty_kind: FilterKind,
        slot_index: usize,
        slot: SlotQuery,
    ) {
        if slot_index >= MAX_SLOTS {
            return;
        }

        let index = match self.filters.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.filters.push(FilterDescriptor::new(name, empty_kind));
                self.filters.len() - 1
            }
        };

        if let Some(slots) = self.filters[index].kind.slots_mut() {
            while slots.len() <= slot_index {
                slots.push(SlotQuery::default());
            }
            slots[slot_index] = slot;
        }
    }

    /// Returns true if the item satisfies every active filter.
    pub fn passes_all(&self, item: &AuctionItem, evaluator: &Evaluator<'_>) -> bool {
        self.filters.iter().all(|f| evaluator.matches(item, f))
    }

    /// Keeps the items satisfying every active filter, in input order.
    pub fn filter_items<'a>(
        &self,
        items: &'a [AuctionItem],
        evaluator: &Evaluator<'_>,
    ) -> Vec<&'a AuctionItem> {
        items
            .iter()
            .filter(|item| self.passes_all(item, evaluator))
            .collect()
    }

    /// Groups the active filters for display.
    pub fn categorize(&self) -> CategorizedFilters<'_> {
        let mut out = CategorizedFilters::default();
        for filter in &self.filters {
            match category_of(&filter.kind) {
                FilterCategory::Basic => out.basic.push(filter),
                FilterCategory::Reforge => out.reforge.push(filter),
                FilterCategory::SetEffect => out.set_effect.push(filter),
                FilterCategory::Special => out.special.push(filter),
            }
        }
        out
    }
}

fn category_of(kind: &FilterKind) -> FilterCategory {
    match kind {
        FilterKind::Range { .. }
        | FilterKind::Selection { .. }
        | FilterKind::Enchant { .. }
        | FilterKind::Unknown => FilterCategory::Basic,
        FilterKind::ReforgeStatus { .. } | FilterKind::ReforgeOption { .. } => {
            FilterCategory::Reforge
        }
        FilterKind::SetEffect { .. } => FilterCategory::SetEffect,
        FilterKind::Erg { .. }
        | FilterKind::SpecialModType { .. }
        | FilterKind::SpecialModRange { .. }
        | FilterKind::SpecialModNone => FilterCategory::Special,
    }
}
