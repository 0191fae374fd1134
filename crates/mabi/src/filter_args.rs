//! Compiles filter flags into filter descriptors.
//!
//! Flag payloads use a small hand-rolled syntax: `이름=MIN..MAX` for
//! ranges, `이름=값` for selections, `이름:MIN..MAX` for reforge and
//! set-effect slots. Either bound of a range may be omitted
//! (`150..`, `..200`).

use thiserror::Error;

use mabi_auction_filter::{option_types, FilterDescriptor, FilterKind, SlotQuery, MAX_SLOTS};

use crate::cli::FilterArgs;

/// Errors from malformed filter flags.
#[derive(Debug, Error)]
pub enum FilterArgError {
    /// The flag payload does not match the expected syntax.
    #[error("invalid {flag} value '{value}': expected {expected}")]
    Malformed {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A bound is not a number.
    #[error("invalid {flag} value '{value}': bounds must be numeric")]
    BadBound { flag: &'static str, value: String },

    /// More slots than the filter supports.
    #[error("--{flag} given {given} times, at most {MAX_SLOTS} supported")]
    TooManySlots { flag: &'static str, given: usize },
}

type Result<T> = std::result::Result<T, FilterArgError>;

impl FilterArgs {
    /// Compiles the flags into filter descriptors.
    ///
    /// Flags sharing an option-type name produce descriptors with the same
    /// name, so the aggregator's upsert keeps only the last one.
    pub fn to_descriptors(&self) -> Result<Vec<FilterDescriptor>> {
        let mut descriptors = Vec::new();

        for spec in &self.ranges {
            let (name, bounds) = split_named("range", spec, '=')?;
            let (min, max) = parse_bounds("range", bounds)?;
            descriptors.push(FilterDescriptor::range(name, min, max));
        }

        for spec in &self.selects {
            let (name, value) = split_named("select", spec, '=')?;
            descriptors.push(FilterDescriptor::new(
                name,
                FilterKind::Selection {
                    field: None,
                    value: value.to_string(),
                },
            ));
        }

        if self.enchant_prefix.is_some() || self.enchant_suffix.is_some() {
            descriptors.push(FilterDescriptor::new(
                option_types::ENCHANT,
                FilterKind::Enchant {
                    prefix_query: self.enchant_prefix.clone(),
                    suffix_query: self.enchant_suffix.clone(),
                },
            ));
        }

        if self.reforge_rank.is_some() || self.reforge_lines.is_some() {
            descriptors.push(FilterDescriptor::new(
                option_types::REFORGE_RANK,
                FilterKind::ReforgeStatus {
                    rank: self.reforge_rank,
                    line_count: self.reforge_lines,
                },
            ));
        }

        if !self.reforge_options.is_empty() {
            let slots = parse_slots("reforge-option", &self.reforge_options)?;
            descriptors.push(FilterDescriptor::new(
                option_types::REFORGE_OPTION,
                FilterKind::ReforgeOption { slots },
            ));
        }

        if self.erg_grade.is_some() || self.erg_min.is_some() || self.erg_max.is_some() {
            descriptors.push(FilterDescriptor::new(
                option_types::ERG,
                FilterKind::Erg {
                    grade: self.erg_grade.clone(),
                    min_level: self.erg_min,
                    max_level: self.erg_max,
                },
            ));
        }

        if let Some(special) = self.special_descriptor()? {
            descriptors.push(special);
        }

        if !self.set_effects.is_empty() {
            let slots = parse_slots("set-effect", &self.set_effects)?;
            descriptors.push(FilterDescriptor::new(
                option_types::SET_EFFECT,
                FilterKind::SetEffect { slots },
            ));
        }

        Ok(descriptors)
    }

    /// At most one special-modification filter can be active; the range
    /// form subsumes the type form when both flags are given.
    fn special_descriptor(&self) -> Result<Option<FilterDescriptor>> {
        if self.no_special {
            return Ok(Some(FilterDescriptor::new(
                option_types::SPECIAL_MOD,
                FilterKind::SpecialModNone,
            )));
        }

        if let Some(spec) = &self.special_range {
            let (mod_type, bounds) = match spec.split_once(':') {
                Some((mod_type, bounds)) => (Some(mod_type.trim().to_string()), bounds),
                None => (self.special_type.clone(), spec.as_str()),
            };
            let (min, max) = parse_bounds("special-range", bounds)?;
            return Ok(Some(FilterDescriptor::new(
                option_types::SPECIAL_MOD,
                FilterKind::SpecialModRange { mod_type, min, max },
            )));
        }

        if let Some(mod_type) = &self.special_type {
            return Ok(Some(FilterDescriptor::new(
                option_types::SPECIAL_MOD,
                FilterKind::SpecialModType {
                    mod_type: mod_type.clone(),
                },
            )));
        }

        Ok(None)
    }
}

/// Splits "NAME<sep>REST", requiring a non-empty name.
fn split_named<'a>(flag: &'static str, spec: &'a str, sep: char) -> Result<(&'a str, &'a str)> {
    match spec.split_once(sep) {
        Some((name, rest)) if !name.trim().is_empty() => Ok((name.trim(), rest)),
        _ => Err(FilterArgError::Malformed {
            flag,
            value: spec.to_string(),
            expected: "NAME=VALUE",
        }),
    }
}

/// Parses "MIN..MAX" with either bound optional.
fn parse_bounds(flag: &'static str, bounds: &str) -> Result<(Option<f64>, Option<f64>)> {
    let Some((min, max)) = bounds.split_once("..") else {
        // A bare number reads as an exact match.
        let value = parse_bound(flag, bounds)?;
        return Ok((value, value));
    };

    let min = parse_bound(flag, min)?;
    let max = parse_bound(flag, max)?;
    if min.is_none() && max.is_none() {
        return Err(FilterArgError::Malformed {
            flag,
            value: bounds.to_string(),
            expected: "MIN..MAX with at least one bound",
        });
    }
    Ok((min, max))
}

fn parse_bound(flag: &'static str, text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| FilterArgError::BadBound {
        flag,
        value: text.to_string(),
    })
}

/// Parses slot specs "NAME" or "NAME:MIN..MAX", at most `MAX_SLOTS`.
fn parse_slots(flag: &'static str, specs: &[String]) -> Result<Vec<SlotQuery>> {
    if specs.len() > MAX_SLOTS {
        return Err(FilterArgError::TooManySlots {
            flag,
            given: specs.len(),
        });
    }

    specs
        .iter()
        .map(|spec| match spec.split_once(':') {
            Some((name, bounds)) => {
                let (min, max) = parse_bounds(flag, bounds)?;
                Ok(SlotQuery {
                    name_query: name.trim().to_string(),
                    min,
                    max,
                })
            }
            None => Ok(SlotQuery::named(spec.trim())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> FilterArgs {
        FilterArgs::default()
    }

    #[test]
    fn test_range_flag_both_bounds() {
        let mut a = args();
        a.ranges = vec!["공격=150..300".to_string()];
        let descriptors = a.to_descriptors().expect("parse failed");

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "공격");
        match &descriptors[0].kind {
            FilterKind::Range { min, max, .. } => {
                assert_eq!(*min, Some(150.0));
                assert_eq!(*max, Some(300.0));
            }
            other => panic!("expected range, got {other:?}"),
        }
    }

    #[test]
    fn test_range_flag_open_bounds() {
        let mut a = args();
        a.ranges = vec!["밸런스=40..".to_string(), "내구력=..20".to_string()];
        let descriptors = a.to_descriptors().expect("parse failed");

        match &descriptors[0].kind {
            FilterKind::Range { min, max, .. } => {
                assert_eq!(*min, Some(40.0));
                assert_eq!(*max, None);
            }
            other => panic!("expected range, got {other:?}"),
        }
        match &descriptors[1].kind {
            FilterKind::Range { min, max, .. } => {
                assert_eq!(*min, None);
                assert_eq!(*max, Some(20.0));
            }
            other => panic!("expected range, got {other:?}"),
        }
    }

    #[test]
    fn test_range_flag_bare_number_is_exact() {
        let mut a = args();
        a.ranges = vec!["세공 랭크=1".to_string()];
        let descriptors = a.to_descriptors().expect("parse failed");
        match &descriptors[0].kind {
            FilterKind::Range { min, max, .. } => {
                assert_eq!(*min, Some(1.0));
                assert_eq!(*max, Some(1.0));
            }
            other => panic!("expected range, got {other:?}"),
        }
    }

    #[test]
    fn test_range_flag_rejects_empty_bounds() {
        let mut a = args();
        a.ranges = vec!["공격=..".to_string()];
        assert!(a.to_descriptors().is_err());
    }

    #[test]
    fn test_range_flag_rejects_missing_name() {
        let mut a = args();
        a.ranges = vec!["=100..200".to_string()];
        assert!(a.to_descriptors().is_err());
    }

    #[test]
    fn test_range_flag_rejects_non_numeric_bound() {
        let mut a = args();
        a.ranges = vec!["공격=많이..".to_string()];
        match a.to_descriptors() {
            Err(FilterArgError::BadBound { value, .. }) => assert_eq!(value, "많이"),
            other => panic!("expected BadBound, got {other:?}"),
        }
    }

    #[test]
    fn test_select_flag() {
        let mut a = args();
        a.selects = vec!["아이템 보호=인챈트 실패".to_string()];
        let descriptors = a.to_descriptors().expect("parse failed");
        match &descriptors[0].kind {
            FilterKind::Selection { value, .. } => assert_eq!(value, "인챈트 실패"),
            other => panic!("expected selection, got {other:?}"),
        }
    }

    #[test]
    fn test_enchant_flags_merge_into_one_descriptor() {
        let mut a = args();
        a.enchant_prefix = Some("충돌".to_string());
        a.enchant_suffix = Some("파괴".to_string());
        let descriptors = a.to_descriptors().expect("parse failed");

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, option_types::ENCHANT);
    }

    #[test]
    fn test_reforge_option_slots() {
        let mut a = args();
        a.reforge_options = vec![
            "스매시 대미지:15..".to_string(),
            "매그넘 샷 대미지".to_string(),
        ];
        let descriptors = a.to_descriptors().expect("parse failed");

        match &descriptors[0].kind {
            FilterKind::ReforgeOption { slots } => {
                assert_eq!(slots.len(), 2);
                assert_eq!(slots[0].name_query, "스매시 대미지");
                assert_eq!(slots[0].min, Some(15.0));
                assert_eq!(slots[1].name_query, "매그넘 샷 대미지");
                assert_eq!(slots[1].min, None);
            }
            other => panic!("expected reforge option, got {other:?}"),
        }
    }

    #[test]
    fn test_too_many_slots_is_an_error() {
        let mut a = args();
        a.set_effects = vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ];
        match a.to_descriptors() {
            Err(FilterArgError::TooManySlots { given, .. }) => assert_eq!(given, 4),
            other => panic!("expected TooManySlots, got {other:?}"),
        }
    }

    #[test]
    fn test_no_special_flag() {
        let mut a = args();
        a.no_special = true;
        let descriptors = a.to_descriptors().expect("parse failed");
        assert_eq!(descriptors[0].kind, FilterKind::SpecialModNone);
    }

    #[test]
    fn test_special_range_with_embedded_type() {
        let mut a = args();
        a.special_range = Some("S:5..7".to_string());
        let descriptors = a.to_descriptors().expect("parse failed");
        match &descriptors[0].kind {
            FilterKind::SpecialModRange { mod_type, min, max } => {
                assert_eq!(mod_type.as_deref(), Some("S"));
                assert_eq!(*min, Some(5.0));
                assert_eq!(*max, Some(7.0));
            }
            other => panic!("expected special range, got {other:?}"),
        }
    }

    #[test]
    fn test_special_range_takes_type_from_flag() {
        let mut a = args();
        a.special_type = Some("R".to_string());
        a.special_range = Some("3..".to_string());
        let descriptors = a.to_descriptors().expect("parse failed");

        assert_eq!(descriptors.len(), 1);
        match &descriptors[0].kind {
            FilterKind::SpecialModRange { mod_type, .. } => {
                assert_eq!(mod_type.as_deref(), Some("R"));
            }
            other => panic!("expected special range, got {other:?}"),
        }
    }

    #[test]
    fn test_erg_flags_merge() {
        let mut a = args();
        a.erg_grade = Some("S".to_string());
        a.erg_min = Some(40);
        let descriptors = a.to_descriptors().expect("parse failed");
        match &descriptors[0].kind {
            FilterKind::Erg {
                grade, min_level, ..
            } => {
                assert_eq!(grade.as_deref(), Some("S"));
                assert_eq!(*min_level, Some(40));
            }
            other => panic!("expected erg, got {other:?}"),
        }
    }

    #[test]
    fn test_no_flags_no_descriptors() {
        assert!(args().to_descriptors().expect("parse failed").is_empty());
    }
}
