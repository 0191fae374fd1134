//! Filter descriptors: concrete, user-configured predicate instances.
//!
//! A [`FilterDescriptor`] pairs an option type name with a [`FilterKind`],
//! the closed set of predicate shapes the evaluator knows how to run. The
//! kind is immutable once created and fully determines which evaluator
//! branch runs.
//!
//! Descriptors are plain data and serialize to the wire format consumed
//! from the UI layer, e.g.:
//!
//! ```json
//! { "name": "공격", "kind": "range", "field": "value2", "min": 100, "max": 200 }
//! { "name": "인챈트", "kind": "enchant", "prefix_query": "충돌" }
//! ```
//!
//! A descriptor deserialized with a kind tag this version does not know
//! becomes [`FilterKind::Unknown`], which the evaluator passes unchanged
//! (fail-open).

use serde::{Deserialize, Serialize};

use crate::registry::ValueField;

/// Maximum number of independent slots in a multi-slot filter.
pub const MAX_SLOTS: usize = 3;

/// One independent sub-predicate of a multi-slot filter (reforge option,
/// set effect).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SlotQuery {
    /// Substring query against the option name; an empty or whitespace-only
    /// query makes the slot inert.
    #[serde(default)]
    pub name_query: String,

    /// Inclusive lower bound on the slot's numeric payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound on the slot's numeric payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl SlotQuery {
    /// Creates a slot matching options whose name contains `name_query`.
    pub fn named(name_query: impl Into<String>) -> Self {
        Self {
            name_query: name_query.into(),
            min: None,
            max: None,
        }
    }

    /// Sets the inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Returns true if the slot carries no usable query.
    pub fn is_empty(&self) -> bool {
        self.name_query.trim().is_empty()
    }
}

/// The closed set of predicate shapes.
///
/// Adding a new kind is a compile-time-checked change: the evaluator
/// matches exhaustively on this enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterKind {
    /// Inclusive numeric range over a payload field.
    Range {
        /// Field to read; defaults to the registry's field for the type.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<ValueField>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        /// Display-only percentage marker carried over from the facet.
        #[serde(default)]
        is_percent: bool,
    },

    /// Exact string equality over a payload field.
    Selection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<ValueField>,
        value: String,
    },

    /// Enchant substring queries; each non-empty query must independently
    /// match an enchant of its position.
    Enchant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix_query: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suffix_query: Option<String>,
    },

    /// Reforge rank and/or reforge line count, both exact.
    ReforgeStatus {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rank: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line_count: Option<usize>,
    },

    /// Up to [`MAX_SLOTS`] reforge option queries, ANDed over non-empty
    /// slots.
    ReforgeOption {
        #[serde(default)]
        slots: Vec<SlotQuery>,
    },

    /// Erg grade and level bounds.
    Erg {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        grade: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_level: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_level: Option<u32>,
    },

    /// At least one special remodel of the given type, any level.
    SpecialModType { mod_type: String },

    /// Special remodel level range, optionally restricted to one type.
    SpecialModRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mod_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// No special remodel at all.
    SpecialModNone,

    /// Up to [`MAX_SLOTS`] set-effect queries, ANDed over non-empty slots.
    SetEffect {
        #[serde(default)]
        slots: Vec<SlotQuery>,
    },

    /// A kind tag this version does not recognize. Passes every item
    /// (fail-open); kept so old clients can round-trip newer payloads.
    #[serde(other)]
    Unknown,
}

impl FilterKind {
    /// Returns the slot list for multi-slot kinds.
    pub fn slots(&self) -> Option<&[SlotQuery]> {
        match self {
            FilterKind::ReforgeOption { slots } | FilterKind::SetEffect { slots } => {
                Some(slots.as_slice())
            }
            _ => None,
        }
    }

    /// Returns a mutable slot list for multi-slot kinds.
    pub(crate) fn slots_mut(&mut self) -> Option<&mut Vec<SlotQuery>> {
        match self {
            FilterKind::ReforgeOption { slots } | FilterKind::SetEffect { slots } => Some(slots),
            _ => None,
        }
    }

    /// Returns true for kinds keyed per slot rather than per name.
    pub fn is_multi_slot(&self) -> bool {
        matches!(
            self,
            FilterKind::ReforgeOption { .. } | FilterKind::SetEffect { .. }
        )
    }
}

/// A concrete, user-configured predicate instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Matches an option type name from the registry.
    pub name: String,

    /// The predicate shape and its parameters.
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl FilterDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Convenience constructor for a range filter on the type's default
    /// field.
    pub fn range(name: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(
            name,
            FilterKind::Range {
                field: None,
                min,
                max,
                is_percent: false,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_descriptor_deserializes_wire_format() {
        let json = r#"{ "name": "공격", "kind": "range", "field": "value2",
                        "min": 100.0, "max": 200.0 }"#;
        let descriptor: FilterDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.name, "공격");
        match descriptor.kind {
            FilterKind::Range {
                field, min, max, ..
            } => {
                assert_eq!(field, Some(ValueField::Value2));
                assert_eq!(min, Some(100.0));
                assert_eq!(max, Some(200.0));
            }
            other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_enchant_descriptor_deserializes() {
        let json = r#"{ "name": "인챈트", "kind": "enchant", "prefix_query": "충돌" }"#;
        let descriptor: FilterDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            descriptor.kind,
            FilterKind::Enchant {
                prefix_query: Some("충돌".to_string()),
                suffix_query: None,
            }
        );
    }

    #[test]
    fn test_reforge_option_descriptor_deserializes_slots() {
        let json = r#"{ "name": "세공 옵션", "kind": "reforge-option",
                        "slots": [{ "name_query": "스매시", "min": 15.0 }] }"#;
        let descriptor: FilterDescriptor = serde_json::from_str(json).unwrap();

        let slots = descriptor.kind.slots().unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].name_query, "스매시");
        assert_eq!(slots[0].min, Some(15.0));
        assert_eq!(slots[0].max, None);
    }

    #[test]
    fn test_unknown_kind_deserializes_fail_open() {
        // A kind tag from a newer client version lands on Unknown instead
        // of failing deserialization.
        let json = r#"{ "name": "공격", "kind": "holographic" }"#;
        let descriptor: FilterDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.kind, FilterKind::Unknown);
    }

    #[test]
    fn test_descriptor_serde_roundtrip() {
        let descriptor = FilterDescriptor::new(
            "세트 효과",
            FilterKind::SetEffect {
                slots: vec![SlotQuery::named("체인 블레이드").with_min(10.0).with_max(30.0)],
            },
        );

        let json = serde_json::to_string(&descriptor).unwrap();
        let deserialized: FilterDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, deserialized);
    }

    #[test]
    fn test_slot_query_is_empty() {
        assert!(SlotQuery::default().is_empty());
        assert!(SlotQuery::named("   ").is_empty());
        assert!(!SlotQuery::named("스매시").is_empty());
    }

    #[test]
    fn test_is_multi_slot() {
        assert!(FilterKind::ReforgeOption { slots: vec![] }.is_multi_slot());
        assert!(FilterKind::SetEffect { slots: vec![] }.is_multi_slot());
        assert!(!FilterKind::SpecialModNone.is_multi_slot());
    }

    #[test]
    fn test_special_mod_none_roundtrip() {
        let descriptor = FilterDescriptor::new("특별 개조", FilterKind::SpecialModNone);
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("special-mod-none"));
        let deserialized: FilterDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, deserialized);
    }
}
