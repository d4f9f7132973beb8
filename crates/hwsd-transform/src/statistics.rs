//! Summary statistics of a consolidated export.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use hwsd_model::{DepthLayer, OutputRow};

use crate::consolidate::LayerConsolidation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |range, value| match range {
            None => Some(ValueRange {
                min: value,
                max: value,
            }),
            Some(ValueRange { min, max }) => Some(ValueRange {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerCounts {
    pub layer: DepthLayer,
    pub raw: usize,
    pub valid: usize,
    pub consolidated: usize,
}

/// Ranges of the key soil properties over every exported row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyRanges {
    pub ph: Option<ValueRange>,
    pub bs: Option<ValueRange>,
    pub oc: Option<ValueRange>,
    pub cec_soil: Option<ValueRange>,
    pub esp: Option<ValueRange>,
}

/// Rows carrying each PyAEZ limitation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LimitationCounts {
    pub rocky_phase: usize,
    pub chemical_phase: usize,
    pub vertic: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportStatistics {
    pub layers: Vec<LayerCounts>,
    pub ranges: PropertyRanges,
    pub textures: BTreeMap<String, usize>,
    pub drainage: BTreeMap<String, usize>,
    pub limitations: LimitationCounts,
    pub total_rows: usize,
    pub unique_codes: usize,
    /// Layers that produced at least one row.
    pub layer_count: usize,
}

impl ExportStatistics {
    pub fn from_layers(layers: &[LayerConsolidation]) -> Self {
        let rows: Vec<&OutputRow> = layers.iter().flat_map(|layer| layer.rows.iter()).collect();

        let ranges = PropertyRanges {
            ph: ValueRange::of(rows.iter().map(|row| row.ph)),
            bs: ValueRange::of(rows.iter().map(|row| row.bs as f64)),
            oc: ValueRange::of(rows.iter().map(|row| row.oc)),
            cec_soil: ValueRange::of(rows.iter().map(|row| row.cec_soil as f64)),
            esp: ValueRange::of(rows.iter().map(|row| row.esp as f64)),
        };

        let mut textures = BTreeMap::new();
        let mut drainage = BTreeMap::new();
        let mut limitations = LimitationCounts::default();
        for row in &rows {
            *textures.entry(row.txt.clone()).or_insert(0) += 1;
            *drainage.entry(row.drg.clone()).or_insert(0) += 1;
            limitations.rocky_phase += usize::from(row.spr.is_some());
            limitations.chemical_phase += usize::from(row.sph.is_some());
            limitations.vertic += usize::from(row.vsp == 1);
        }

        let unique_codes = rows.iter().map(|row| row.code).collect::<BTreeSet<_>>().len();

        Self {
            layers: layers
                .iter()
                .map(|layer| LayerCounts {
                    layer: layer.layer,
                    raw: layer.raw_count,
                    valid: layer.valid_count,
                    consolidated: layer.rows.len(),
                })
                .collect(),
            ranges,
            textures,
            drainage,
            limitations,
            total_rows: rows.len(),
            unique_codes,
            layer_count: layers.iter().filter(|layer| !layer.is_empty()).count(),
        }
    }

    /// Value counts sorted by descending count, then label.
    pub fn ranked(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
