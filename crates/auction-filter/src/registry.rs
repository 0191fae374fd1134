//! Option-type registry.
//!
//! The registry is the single source of truth mapping a recognized item
//! option type to its user-facing facet: display name, evaluator kind,
//! default field selector, and type-specific extras. Both the facet
//! extractor and the predicate evaluator consult the same table; option
//! types absent from it yield no facet and cannot be filtered.

use serde::{Deserialize, Serialize};

/// Well-known option type keys consumed directly by the evaluator.
pub mod option_types {
    /// Enchant lines ("충돌의 (랭크 4)"), sub-typed by position.
    pub const ENCHANT: &str = "인챈트";
    /// Reforge rank (1-3).
    pub const REFORGE_RANK: &str = "세공 랭크";
    /// Reforge option lines, up to three per item.
    pub const REFORGE_OPTION: &str = "세공 옵션";
    /// Erg upgrade; sub-type is the grade letter, value is the level.
    pub const ERG: &str = "에르그";
    /// Special remodeling; sub-type is the mod type letter.
    pub const SPECIAL_MOD: &str = "특별 개조";
    /// Set-effect lines, up to three per item.
    pub const SET_EFFECT: &str = "세트 효과";
}

/// Evaluator kind attached to a registered option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// Numeric range over a payload field.
    Range,
    /// Exact string equality over a payload field.
    Selection,
    /// Prefix/suffix enchant substring queries.
    Enchant,
    /// Reforge rank and line count.
    ReforgeStatus,
    /// Multi-slot reforge option queries.
    ReforgeOption,
    /// Erg grade and level.
    Erg,
    /// Special remodeling (type / range / none).
    SpecialMod,
    /// Multi-slot set-effect queries.
    SetEffect,
}

/// Which payload field of an option a facet reads by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueField {
    /// The primary payload.
    #[default]
    Value,
    /// The secondary payload (often the upper bound of a range).
    Value2,
}

/// A derived-value rule replacing the plain field read for a range facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedValue {
    /// Pierce level: base level in `value` plus the parsed increment in
    /// `value2` (e.g. value "5", value2 "+2" reads as 7).
    PierceLevel,
}

/// Enchant position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnchantSlot {
    Prefix,
    Suffix,
}

impl EnchantSlot {
    /// The option sub-type string used on the wire for this position.
    pub fn as_sub_type(&self) -> &'static str {
        match self {
            EnchantSlot::Prefix => "접두",
            EnchantSlot::Suffix => "접미",
        }
    }
}

/// One registry entry: everything the facet extractor and the evaluator
/// need to know about a recognized option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTypeSpec {
    /// Option type key as it appears on items.
    pub type_name: &'static str,
    /// User-facing facet name.
    pub display_name: &'static str,
    /// Which evaluator handles this type.
    pub kind: FacetKind,
    /// Default field selector for range/selection reads.
    pub field: ValueField,
    /// Whether the value is a percentage (display concern, e.g. balance).
    pub is_percent: bool,
    /// Derived-value rule, if the facet value is not a plain field read.
    pub derived: Option<DerivedValue>,
}

impl OptionTypeSpec {
    const fn range(type_name: &'static str, field: ValueField) -> Self {
        Self {
            type_name,
            display_name: type_name,
            kind: FacetKind::Range,
            field,
            is_percent: false,
            derived: None,
        }
    }

    const fn percent(type_name: &'static str) -> Self {
        Self {
            type_name,
            display_name: type_name,
            kind: FacetKind::Range,
            field: ValueField::Value,
            is_percent: true,
            derived: None,
        }
    }

    const fn special(type_name: &'static str, kind: FacetKind) -> Self {
        Self {
            type_name,
            display_name: type_name,
            kind,
            field: ValueField::Value,
            is_percent: false,
            derived: None,
        }
    }
}

/// The canonical option-type table.
static STANDARD_ENTRIES: &[OptionTypeSpec] = &[
    OptionTypeSpec::range("공격", ValueField::Value2),
    OptionTypeSpec::range("부상률", ValueField::Value2),
    OptionTypeSpec::percent("크리티컬"),
    OptionTypeSpec::percent("밸런스"),
    OptionTypeSpec::range("내구력", ValueField::Value2),
    OptionTypeSpec::range("숙련", ValueField::Value),
    OptionTypeSpec::range("방어력", ValueField::Value),
    OptionTypeSpec::range("보호", ValueField::Value),
    OptionTypeSpec::range("마법 방어력", ValueField::Value),
    OptionTypeSpec::range("마법 보호", ValueField::Value),
    OptionTypeSpec {
        type_name: "피어싱 레벨",
        display_name: "피어싱 레벨",
        kind: FacetKind::Range,
        field: ValueField::Value,
        is_percent: false,
        derived: Some(DerivedValue::PierceLevel),
    },
    OptionTypeSpec::range("남은 전용 해제 가능 횟수", ValueField::Value),
    OptionTypeSpec::special("아이템 보호", FacetKind::Selection),
    OptionTypeSpec::special(option_types::ENCHANT, FacetKind::Enchant),
    OptionTypeSpec::special(option_types::REFORGE_RANK, FacetKind::ReforgeStatus),
    OptionTypeSpec::special(option_types::REFORGE_OPTION, FacetKind::ReforgeOption),
    OptionTypeSpec::special(option_types::ERG, FacetKind::Erg),
    OptionTypeSpec::special(option_types::SPECIAL_MOD, FacetKind::SpecialMod),
    OptionTypeSpec::special(option_types::SET_EFFECT, FacetKind::SetEffect),
];

static STANDARD: OptionRegistry = OptionRegistry {
    entries: STANDARD_ENTRIES,
};

/// Lookup table from option type name to [`OptionTypeSpec`].
///
/// Injected into both the facet extractor and the evaluator so the two can
/// never drift apart.
#[derive(Debug)]
pub struct OptionRegistry {
    entries: &'static [OptionTypeSpec],
}

impl OptionRegistry {
    /// Returns the standard registry covering the known option vocabulary.
    pub fn standard() -> &'static OptionRegistry {
        &STANDARD
    }

    /// Looks up the spec for an option type name.
    pub fn get(&self, type_name: &str) -> Option<&OptionTypeSpec> {
        self.entries.iter().find(|e| e.type_name == type_name)
    }

    /// Returns true if the option type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }

    /// Iterates over all registered specs in table order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionTypeSpec> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_has_core_types() {
        let registry = OptionRegistry::standard();
        for type_name in [
            "공격",
            "밸런스",
            option_types::ENCHANT,
            option_types::REFORGE_RANK,
            option_types::REFORGE_OPTION,
            option_types::ERG,
            option_types::SPECIAL_MOD,
            option_types::SET_EFFECT,
        ] {
            assert!(registry.contains(type_name), "missing {type_name}");
        }
    }

    #[test]
    fn test_unrecognized_type_is_absent() {
        let registry = OptionRegistry::standard();
        assert!(registry.get("아이템 색상").is_none());
    }

    #[test]
    fn test_balance_is_percent() {
        let spec = OptionRegistry::standard().get("밸런스").unwrap();
        assert!(spec.is_percent);
        assert_eq!(spec.kind, FacetKind::Range);
        assert_eq!(spec.field, ValueField::Value);
    }

    #[test]
    fn test_attack_reads_value2() {
        let spec = OptionRegistry::standard().get("공격").unwrap();
        assert_eq!(spec.field, ValueField::Value2);
    }

    #[test]
    fn test_pierce_level_is_derived() {
        let spec = OptionRegistry::standard().get("피어싱 레벨").unwrap();
        assert_eq!(spec.derived, Some(DerivedValue::PierceLevel));
    }

    #[test]
    fn test_type_names_unique() {
        let registry = OptionRegistry::standard();
        let mut names: Vec<&str> = registry.iter().map(|e| e.type_name).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn test_enchant_slot_sub_types() {
        assert_eq!(EnchantSlot::Prefix.as_sub_type(), "접두");
        assert_eq!(EnchantSlot::Suffix.as_sub_type(), "접미");
    }
}
