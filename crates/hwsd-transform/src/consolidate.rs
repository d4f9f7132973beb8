//! Per-layer consolidation.
//!
//! Every soil mapping unit has several profiles per depth layer. PyAEZ needs
//! one representative record per (unit, layer): numeric attributes are
//! averaged, code attributes take the most frequent value, and the PyAEZ
//! indicators are derived from the consolidated values.
//!
//! Only rows with positive organic carbon are used. Rows are stably ordered
//! by (unit, profile id, top depth) before grouping, so mode ties resolve to
//! the first profile in that order.

use std::collections::BTreeMap;

use hwsd_common::{clamp, mean, mode_or_first, round_half_even, round_to_int};
use hwsd_model::{CodeValue, DepthLayer, OutputRow, ProfileLayerRecord, ReferenceTables};
use tracing::{debug, warn};

use crate::obstacle::obstacle_depth_cm;
use crate::phase::{classify_chemical_phase, classify_rocky_phase};
use crate::vertic::VerticMap;

pub const PH_RANGE: (f64, f64) = (3.0, 11.0);
pub const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

pub const DEFAULT_PH: f64 = 7.0;
pub const DEFAULT_ROOT_DEPTH: i64 = 100;

/// Reference data the consolidator reads from.
#[derive(Debug, Clone, Copy)]
pub struct ConsolidationContext<'a> {
    pub tables: &'a ReferenceTables,
    pub vertic: &'a VerticMap,
}

impl<'a> ConsolidationContext<'a> {
    pub fn new(tables: &'a ReferenceTables, vertic: &'a VerticMap) -> Self {
        Self { tables, vertic }
    }
}

/// Consolidated attributes of one (mapping unit, depth layer) pair, before
/// labels are resolved and values rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedSoilRecord {
    pub smu_id: i64,
    pub layer: DepthLayer,
    /// Number of valid profiles reduced into this record.
    pub profile_count: usize,
    pub texture: CodeValue,
    pub root_depth: CodeValue,
    pub phase1: CodeValue,
    pub phase2: CodeValue,
    pub roots: CodeValue,
    pub drainage: CodeValue,
    pub org_carbon: Option<f64>,
    pub ph_water: Option<f64>,
    pub teb: Option<f64>,
    pub cec_soil: Option<f64>,
    pub cec_clay: Option<f64>,
    pub esp: Option<f64>,
    pub elec_cond: Option<f64>,
    pub tcarbon_eq: Option<f64>,
    pub gypsum: Option<f64>,
    pub coarse: Option<f64>,
}

fn mode_code<F>(rows: &[&ProfileLayerRecord], field: F) -> CodeValue
where
    F: Fn(&ProfileLayerRecord) -> &CodeValue,
{
    let values: Vec<CodeValue> = rows.iter().map(|row| field(*row).clone()).collect();
    mode_or_first(&values, CodeValue::is_missing).unwrap_or_default()
}

fn mean_of<F>(rows: &[&ProfileLayerRecord], field: F) -> Option<f64>
where
    F: Fn(&ProfileLayerRecord) -> Option<f64>,
{
    mean(rows.iter().map(|row| field(*row)))
}

impl ConsolidatedSoilRecord {
    /// Reduce the rows of one unit. `rows` must be in tie-break order.
    pub fn from_rows(smu_id: i64, layer: DepthLayer, rows: &[&ProfileLayerRecord]) -> Self {
        Self {
            smu_id,
            layer,
            profile_count: rows.len(),
            texture: mode_code(rows, |row| &row.texture),
            root_depth: mode_code(rows, |row| &row.root_depth),
            phase1: mode_code(rows, |row| &row.phase1),
            phase2: mode_code(rows, |row| &row.phase2),
            roots: mode_code(rows, |row| &row.roots),
            drainage: mode_code(rows, |row| &row.drainage),
            org_carbon: mean_of(rows, |row| row.org_carbon),
            ph_water: mean_of(rows, |row| row.ph_water),
            teb: mean_of(rows, |row| row.teb),
            cec_soil: mean_of(rows, |row| row.cec_soil),
            cec_clay: mean_of(rows, |row| row.cec_clay),
            esp: mean_of(rows, |row| row.esp),
            elec_cond: mean_of(rows, |row| row.elec_cond),
            tcarbon_eq: mean_of(rows, |row| row.tcarbon_eq),
            gypsum: mean_of(rows, |row| row.gypsum),
            coarse: mean_of(rows, |row| row.coarse),
        }
    }

    /// Base saturation (%) recomputed from the consolidated TEB and soil CEC.
    pub fn base_saturation(&self) -> f64 {
        base_saturation(self.teb, self.cec_soil)
    }

    /// Resolve labels, derive indicators and round to export precision.
    pub fn to_output_row(&self, ctx: &ConsolidationContext<'_>) -> OutputRow {
        let tables = ctx.tables;
        OutputRow {
            code: self.smu_id,
            txt: texture_label(&self.texture, tables),
            oc: round_half_even(self.org_carbon.unwrap_or(0.0), 3),
            ph: round_half_even(
                clamp(self.ph_water, PH_RANGE.0, PH_RANGE.1).unwrap_or(DEFAULT_PH),
                1,
            ),
            teb: round_half_even(self.teb.unwrap_or(0.0), 1),
            bs: round_to_int(Some(self.base_saturation()), 0),
            cec_soil: round_to_int(self.cec_soil, 0),
            cec_clay: round_to_int(self.cec_clay, 0),
            rsd: round_to_int(self.root_depth.as_f64(), DEFAULT_ROOT_DEPTH),
            spr: classify_rocky_phase(&self.phase1, &self.phase2, &tables.phase),
            sph: classify_chemical_phase(&self.phase1, &self.phase2, &tables.phase),
            osd: obstacle_depth_cm(&self.roots),
            drg: drainage_label(&self.drainage, tables),
            esp: round_to_int(clamp(self.esp, PERCENT_RANGE.0, PERCENT_RANGE.1), 0),
            ec: round_to_int(self.elec_cond, 0),
            ccb: round_to_int(self.tcarbon_eq, 0),
            gyp: round_half_even(self.gypsum.unwrap_or(0.0), 1),
            grc: round_to_int(self.coarse, 0),
            vsp: ctx.vertic.flag(self.smu_id),
        }
    }
}

/// `TEB / CEC_soil * 100`, clamped to [0, 100].
///
/// A zero or missing CEC gives 0; a missing TEB counts as 0.
///
/// # Examples
///
/// ```
/// use hwsd_transform::base_saturation;
///
/// assert_eq!(base_saturation(Some(10.0), Some(40.0)), 25.0);
/// assert_eq!(base_saturation(Some(20.0), Some(0.0)), 0.0);
/// assert_eq!(base_saturation(Some(50.0), Some(20.0)), 100.0);
/// ```
pub fn base_saturation(teb: Option<f64>, cec_soil: Option<f64>) -> f64 {
    match cec_soil {
        Some(cec) if cec != 0.0 && cec.is_finite() => {
            let ratio = teb.unwrap_or(0.0) / cec * 100.0;
            clamp(Some(ratio), PERCENT_RANGE.0, PERCENT_RANGE.1).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Texture label, or the raw code when the lookup has no entry.
///
/// Only exact codes match; a fractional real such as `2.5` passes through.
pub fn texture_label(code: &CodeValue, tables: &ReferenceTables) -> String {
    let label = match code {
        CodeValue::Text(_) => tables
            .texture
            .get_integer(code)
            .or_else(|| tables.texture.get(code)),
        _ => tables.texture.get(code),
    };
    label.map_or_else(|| code.to_string(), str::to_string)
}

/// Drainage class. Numeric codes, reals truncated, are resolved through
/// `D_DRAINAGE`; a missing code is empty.
///
/// Text is returned unchanged even when it looks numeric (`"4"`): HWSD2
/// stores class symbols such as `"MW"` as text.
pub fn drainage_label(code: &CodeValue, tables: &ReferenceTables) -> String {
    match code {
        CodeValue::Text(text) => text.clone(),
        CodeValue::Integer(_) | CodeValue::Real(_) => tables
            .drainage
            .get_integer(code)
            .unwrap_or_default()
            .to_string(),
        CodeValue::Missing => String::new(),
    }
}

/// Result of consolidating one depth layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerConsolidation {
    pub layer: DepthLayer,
    /// Rows of this layer before the organic-carbon filter.
    pub raw_count: usize,
    /// Rows with positive organic carbon.
    pub valid_count: usize,
    /// One row per mapping unit, ascending by unit id.
    pub rows: Vec<OutputRow>,
}

impl LayerConsolidation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Valid rows of `layer`, in tie-break order.
pub fn valid_layer_records(
    records: &[ProfileLayerRecord],
    layer: DepthLayer,
) -> Vec<&ProfileLayerRecord> {
    let mut rows: Vec<&ProfileLayerRecord> = records
        .iter()
        .filter(|record| record.layer == layer && record.is_valid())
        .collect();
    rows.sort_by(|a, b| {
        (a.smu_id, a.profile_id)
            .cmp(&(b.smu_id, b.profile_id))
            .then_with(|| a.top_depth.unwrap_or(0.0).total_cmp(&b.top_depth.unwrap_or(0.0)))
    });
    rows
}

/// Consolidate the records of one layer into one output row per unit.
///
/// A layer without valid rows produces an empty result and a warning.
pub fn consolidate_layer(
    records: &[ProfileLayerRecord],
    layer: DepthLayer,
    ctx: &ConsolidationContext<'_>,
) -> LayerConsolidation {
    let raw_count = records.iter().filter(|record| record.layer == layer).count();
    let valid = valid_layer_records(records, layer);
    let valid_count = valid.len();

    if valid.is_empty() {
        warn!(layer = %layer, raw_count, "no valid records for layer, skipping");
        return LayerConsolidation {
            layer,
            raw_count,
            valid_count,
            rows: Vec::new(),
        };
    }

    let mut groups: BTreeMap<i64, Vec<&ProfileLayerRecord>> = BTreeMap::new();
    for record in valid {
        groups.entry(record.smu_id).or_default().push(record);
    }

    let rows: Vec<OutputRow> = groups
        .iter()
        .map(|(smu_id, rows)| {
            ConsolidatedSoilRecord::from_rows(*smu_id, layer, rows).to_output_row(ctx)
        })
        .collect();

    debug!(
        layer = %layer,
        raw_count,
        valid_count,
        smu_count = rows.len(),
        "layer consolidated"
    );
    for row in rows.iter().take(3) {
        debug!(
            layer = %layer,
            code = row.code,
            txt = %row.txt,
            oc = row.oc,
            ph = row.ph,
            bs = row.bs,
            vsp = row.vsp,
            "consolidated row"
        );
    }

    LayerConsolidation {
        layer,
        raw_count,
        valid_count,
        rows,
    }
}

/// Consolidate each of `layers` in order.
pub fn consolidate_layers(
    records: &[ProfileLayerRecord],
    layers: &[DepthLayer],
    ctx: &ConsolidationContext<'_>,
) -> Vec<LayerConsolidation> {
    layers
        .iter()
        .map(|layer| consolidate_layer(records, *layer, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsd_model::CodeLookup;

    fn tables() -> ReferenceTables {
        ReferenceTables {
            drainage: [(4_i64, "MW"), (6_i64, "W")].into_iter().collect::<CodeLookup>(),
            texture: [(3_i64, "Clay"), (9_i64, "Loam")].into_iter().collect(),
            ..ReferenceTables::default()
        }
    }

    #[test]
    fn texture_passes_raw_code_through() {
        let tables = tables();
        assert_eq!(texture_label(&CodeValue::Integer(3), &tables), "Clay");
        assert_eq!(texture_label(&CodeValue::from("9"), &tables), "Loam");
        assert_eq!(texture_label(&CodeValue::Integer(12), &tables), "12");
        assert_eq!(texture_label(&CodeValue::Missing, &tables), "");
        assert_eq!(texture_label(&CodeValue::Real(3.5), &tables), "3.5");
    }

    #[test]
    fn drainage_keeps_text_and_resolves_integers() {
        let tables = tables();
        assert_eq!(drainage_label(&CodeValue::from("SE"), &tables), "SE");
        assert_eq!(drainage_label(&CodeValue::Integer(4), &tables), "MW");
        assert_eq!(drainage_label(&CodeValue::Integer(2), &tables), "");
        assert_eq!(drainage_label(&CodeValue::Missing, &tables), "");
        assert_eq!(drainage_label(&CodeValue::from("4"), &tables), "4");
    }

    #[test]
    fn fractional_drainage_code_truncates() {
        let tables = tables();
        assert_eq!(drainage_label(&CodeValue::Real(4.5), &tables), "MW");
        assert_eq!(drainage_label(&CodeValue::Real(6.9), &tables), "W");
    }

    #[test]
    fn base_saturation_guards_division() {
        assert_eq!(base_saturation(Some(20.0), Some(0.0)), 0.0);
        assert_eq!(base_saturation(Some(20.0), None), 0.0);
        assert_eq!(base_saturation(None, Some(10.0)), 0.0);
        assert_eq!(base_saturation(Some(-5.0), Some(10.0)), 0.0);
    }

    #[test]
    fn tie_break_follows_profile_order() {
        let mut first = ProfileLayerRecord::new(1, 2, DepthLayer::D1);
        first.org_carbon = Some(1.0);
        first.texture = CodeValue::Integer(9);
        let mut second = ProfileLayerRecord::new(1, 1, DepthLayer::D1);
        second.org_carbon = Some(1.0);
        second.texture = CodeValue::Integer(3);

        let records = vec![first, second];
        let rows = valid_layer_records(&records, DepthLayer::D1);
        let consolidated = ConsolidatedSoilRecord::from_rows(1, DepthLayer::D1, &rows);
        assert_eq!(consolidated.texture, CodeValue::Integer(3));
        assert_eq!(consolidated.profile_count, 2);
    }
}
