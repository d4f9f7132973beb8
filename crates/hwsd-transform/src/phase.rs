//! Soil-phase classifiers.
//!
//! HWSD2 records up to two phases per profile (`PHASE1`, `PHASE2`), coded
//! against `D_PHASE`. PyAEZ distinguishes two families:
//!
//! - **SPR** (rocky/surface): physical limitations to tillage and rooting.
//! - **SPH** (chemical/deep): salinity, sodicity, permafrost, aridity.
//!
//! The primary phase is tested before the secondary; the first label that
//! contains one of the family's keywords (case-sensitive) wins.

use hwsd_model::{CodeLookup, CodeValue};

pub const CHEMICAL_PHASE_KEYWORDS: [&str; 6] =
    ["Salic", "Sodic", "Gelic", "Yermic", "Aridic", "Duric"];

pub const ROCKY_PHASE_KEYWORDS: [&str; 6] =
    ["Stony", "Lithic", "Petric", "Skeletic", "Rudic", "Gravelly"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseFamily {
    /// SPH.
    Chemical,
    /// SPR.
    Rocky,
}

impl PhaseFamily {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            PhaseFamily::Chemical => &CHEMICAL_PHASE_KEYWORDS,
            PhaseFamily::Rocky => &ROCKY_PHASE_KEYWORDS,
        }
    }

    pub fn matches(self, label: &str) -> bool {
        self.keywords().iter().any(|keyword| label.contains(keyword))
    }
}

/// Label of the first phase code (primary, then secondary) belonging to
/// `family`, or `None` when neither matches.
pub fn classify_phase(
    family: PhaseFamily,
    primary: &CodeValue,
    secondary: &CodeValue,
    phases: &CodeLookup,
) -> Option<String> {
    [primary, secondary]
        .into_iter()
        .filter_map(|code| phases.get_integer(code))
        .find(|label| family.matches(label))
        .map(str::to_string)
}

pub fn classify_chemical_phase(
    primary: &CodeValue,
    secondary: &CodeValue,
    phases: &CodeLookup,
) -> Option<String> {
    classify_phase(PhaseFamily::Chemical, primary, secondary, phases)
}

pub fn classify_rocky_phase(
    primary: &CodeValue,
    secondary: &CodeValue,
    phases: &CodeLookup,
) -> Option<String> {
    classify_phase(PhaseFamily::Rocky, primary, secondary, phases)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases() -> CodeLookup {
        [
            (1_i64, "Stony"),
            (2, "Lithic"),
            (3, "Salic"),
            (4, "Sodic"),
            (5, "Phreatic"),
            (6, "Petric Duric"),
            (7, ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn primary_wins_over_secondary() {
        let lookup = phases();
        let result = classify_rocky_phase(&CodeValue::Integer(2), &CodeValue::Integer(1), &lookup);
        assert_eq!(result.as_deref(), Some("Lithic"));
    }

    #[test]
    fn falls_back_to_secondary() {
        let lookup = phases();
        let result =
            classify_chemical_phase(&CodeValue::Integer(1), &CodeValue::Integer(4), &lookup);
        assert_eq!(result.as_deref(), Some("Sodic"));
    }

    #[test]
    fn no_match_is_none() {
        let lookup = phases();
        assert_eq!(
            classify_chemical_phase(&CodeValue::Integer(5), &CodeValue::Missing, &lookup),
            None
        );
        assert_eq!(
            classify_rocky_phase(&CodeValue::Missing, &CodeValue::Missing, &lookup),
            None
        );
        assert_eq!(
            classify_rocky_phase(&CodeValue::Integer(99), &CodeValue::from("x"), &lookup),
            None
        );
        assert_eq!(
            classify_rocky_phase(&CodeValue::Integer(7), &CodeValue::Missing, &lookup),
            None
        );
    }

    #[test]
    fn one_label_can_serve_both_families() {
        let lookup = phases();
        let code = CodeValue::Integer(6);
        assert_eq!(
            classify_rocky_phase(&code, &CodeValue::Missing, &lookup).as_deref(),
            Some("Petric Duric")
        );
        assert_eq!(
            classify_chemical_phase(&code, &CodeValue::Missing, &lookup).as_deref(),
            Some("Petric Duric")
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let lookup: CodeLookup = [(1_i64, "stony")].into_iter().collect();
        assert_eq!(
            classify_rocky_phase(&CodeValue::Integer(1), &CodeValue::Missing, &lookup),
            None
        );
    }

    #[test]
    fn fractional_real_codes_truncate() {
        let lookup = phases();
        assert_eq!(
            classify_chemical_phase(&CodeValue::from_real(4.5), &CodeValue::Missing, &lookup)
                .as_deref(),
            Some("Sodic")
        );
        assert_eq!(
            classify_rocky_phase(&CodeValue::Missing, &CodeValue::from_real(2.25), &lookup)
                .as_deref(),
            Some("Lithic")
        );
        assert_eq!(
            classify_chemical_phase(&CodeValue::from("4.5"), &CodeValue::Missing, &lookup),
            None
        );
    }

    #[test]
    fn numeric_text_codes_resolve() {
        let lookup = phases();
        assert_eq!(
            classify_chemical_phase(&CodeValue::from("3"), &CodeValue::Missing, &lookup)
                .as_deref(),
            Some("Salic")
        );
    }
}
