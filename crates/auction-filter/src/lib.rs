//! Item-option filtering for Mabinogi auction listings.
//!
//! This crate turns the raw option payloads on auction items into
//! filterable facets and evaluates filter sets against them:
//!
//! - [`registry`]: the canonical table of recognizable option types and
//!   how to read each of them.
//! - [`descriptor`]: serializable filter descriptions ([`FilterKind`]).
//! - [`facet`]: extraction of the filterable aspects of an item.
//! - [`evaluator`]: pure per-filter predicate evaluation.
//! - [`aggregator`]: the active filter set, AND-combined.
//! - [`metadata`]: vocabulary files backing name suggestions.
//! - [`engine`]: state, change events, and deferred re-evaluation.
//!
//! # Example
//!
//! ```
//! use mabi_auction_filter::{FilterDescriptor, FilterEngine};
//!
//! let mut engine = FilterEngine::new();
//! engine.set_filter(FilterDescriptor::range("밸런스", Some(40.0), None));
//! let matching = engine.apply();
//! assert!(matching.is_empty());
//! ```

pub mod aggregator;
pub mod descriptor;
pub mod engine;
pub mod evaluator;
pub mod facet;
pub mod metadata;
pub mod registry;

pub use aggregator::{ActiveFilters, CategorizedFilters, FilterCategory};
pub use descriptor::{FilterDescriptor, FilterKind, SlotQuery, MAX_SLOTS};
pub use engine::{FilterEngine, FilterEvent, RefreshPass, RefreshScheduler};
pub use evaluator::Evaluator;
pub use facet::{extract_facets, Facet};
pub use metadata::{
    EnchantEffect, EnchantEntry, EnchantVocabulary, MetadataCache, MetadataError, MetadataStore,
    ReforgeVocabulary, SetEffectVocabulary,
};
pub use registry::{
    option_types, DerivedValue, EnchantSlot, FacetKind, OptionRegistry, OptionTypeSpec, ValueField,
};
