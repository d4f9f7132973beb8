//! Vertic soil phase (VSP).
//!
//! A mapping unit is vertic when its WRB classification names it so, or when
//! its topsoil (layer D1) has more than 35 % clay together with a clay CEC
//! above 40 cmol(+)/kg (expansive, montmorillonitic clays).
//!
//! The flag is a unit-level property: it is derived from D1 only and applied
//! to every depth layer of the unit. Only units with an `HWSD2_SMU` row are
//! classified; any other unit exports VSP 0.

use std::collections::BTreeMap;

use hwsd_common::mean;
use hwsd_model::{DepthLayer, ProfileLayerRecord, ReferenceTables, SmuClassification};
use serde::Serialize;

pub const VERTIC_TERM: &str = "vertic";
pub const VERTIC_CLAY_MIN: f64 = 35.0;
pub const VERTIC_CLAY_CEC_MIN: f64 = 40.0;

/// Mean topsoil clay properties of one mapping unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TopsoilClay {
    pub mean_clay: Option<f64>,
    pub mean_clay_cec: Option<f64>,
}

impl TopsoilClay {
    pub fn is_expansive(&self) -> bool {
        matches!(
            (self.mean_clay, self.mean_clay_cec),
            (Some(clay), Some(cec)) if clay > VERTIC_CLAY_MIN && cec > VERTIC_CLAY_CEC_MIN
        )
    }
}

/// Why a unit was (or was not) classified vertic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticEvidence {
    pub smu_id: i64,
    pub wrb4_label: Option<String>,
    pub wrb2_label: Option<String>,
    pub clay: TopsoilClay,
    pub by_classification: bool,
    pub by_clay: bool,
}

impl VerticEvidence {
    pub fn is_vertic(&self) -> bool {
        self.by_classification || self.by_clay
    }
}

/// Vertic classification of every mapping unit seen in the selection.
#[derive(Debug, Clone, Default)]
pub struct VerticMap {
    units: BTreeMap<i64, VerticEvidence>,
}

impl VerticMap {
    /// Export flag for a unit: 1 when vertic, 0 otherwise (including unknown units).
    pub fn flag(&self, smu_id: i64) -> i64 {
        i64::from(self.units.get(&smu_id).is_some_and(VerticEvidence::is_vertic))
    }

    pub fn get(&self, smu_id: i64) -> Option<&VerticEvidence> {
        self.units.get(&smu_id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn vertic_count(&self) -> usize {
        self.units.values().filter(|unit| unit.is_vertic()).count()
    }

    pub fn vertic_units(&self) -> impl Iterator<Item = &VerticEvidence> {
        self.units.values().filter(|unit| unit.is_vertic())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerticEvidence> {
        self.units.values()
    }
}

impl FromIterator<VerticEvidence> for VerticMap {
    fn from_iter<I: IntoIterator<Item = VerticEvidence>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().map(|unit| (unit.smu_id, unit)).collect(),
        }
    }
}

/// Mean D1 clay and clay CEC per unit, over rows with clay > 0.
pub fn topsoil_clay(records: &[ProfileLayerRecord]) -> BTreeMap<i64, TopsoilClay> {
    let mut grouped: BTreeMap<i64, Vec<&ProfileLayerRecord>> = BTreeMap::new();
    for record in records {
        if record.layer == DepthLayer::D1 && record.clay.is_some_and(|clay| clay > 0.0) {
            grouped.entry(record.smu_id).or_default().push(record);
        }
    }
    grouped
        .into_iter()
        .map(|(smu_id, rows)| {
            let clay = TopsoilClay {
                mean_clay: mean(rows.iter().map(|row| row.clay)),
                mean_clay_cec: mean(rows.iter().map(|row| row.cec_clay)),
            };
            (smu_id, clay)
        })
        .collect()
}

fn names_vertic(label: Option<&str>) -> bool {
    label.is_some_and(|label| label.to_lowercase().contains(VERTIC_TERM))
}

/// Classify every unit that has a classification row. Topsoil clay of units
/// without one is ignored.
pub fn classify_vertic(
    classifications: &[SmuClassification],
    records: &[ProfileLayerRecord],
    tables: &ReferenceTables,
) -> VerticMap {
    let clay_by_unit = topsoil_clay(records);
    let mut labels: BTreeMap<i64, (Option<String>, Option<String>)> = BTreeMap::new();
    for classification in classifications {
        let wrb4 = tables.wrb4.get(&classification.wrb4).map(str::to_string);
        let wrb2 = tables.wrb2.get(&classification.wrb2).map(str::to_string);
        labels.entry(classification.smu_id).or_insert((wrb4, wrb2));
    }

    labels
        .into_iter()
        .map(|(smu_id, (wrb4_label, wrb2_label))| {
            let clay = clay_by_unit.get(&smu_id).copied().unwrap_or_default();
            let by_classification =
                names_vertic(wrb4_label.as_deref()) || names_vertic(wrb2_label.as_deref());
            VerticEvidence {
                smu_id,
                by_classification,
                by_clay: clay.is_expansive(),
                wrb4_label,
                wrb2_label,
                clay,
            }
        })
        .collect()
}
