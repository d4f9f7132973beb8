//! Consolidation scenarios over small HWSD2 fixtures.

use hwsd_model::{
    CodeLookup, CodeValue, DepthLayer, ProfileLayerRecord, ReferenceTables, SmuClassification,
};
use hwsd_transform::{
    ConsolidationContext, VerticMap, assemble_layers, build_layer_frame, classify_vertic,
    consolidate_layer, consolidate_layers,
};
use proptest::prelude::*;

fn tables() -> ReferenceTables {
    ReferenceTables {
        drainage: [(4_i64, "MW"), (6_i64, "W")].into_iter().collect::<CodeLookup>(),
        phase: [(1_i64, "Stony"), (2_i64, "Sodic"), (3_i64, "Phreatic")]
            .into_iter()
            .collect(),
        roots: [(0_i64, "No obstacle"), (3_i64, "40-60 cm")].into_iter().collect(),
        texture: [(3_i64, "Clay"), (9_i64, "Loam")].into_iter().collect(),
        wrb4: [("LXha", "Haplic Lixisols"), ("VRpe", "Pellic Vertisols")]
            .into_iter()
            .collect(),
        wrb2: [("LX", "Lixisols"), ("VR", "Vertisols")].into_iter().collect(),
    }
}

fn record(smu_id: i64, profile_id: i64, layer: DepthLayer, org_carbon: f64) -> ProfileLayerRecord {
    let mut record = ProfileLayerRecord::new(smu_id, profile_id, layer);
    record.org_carbon = Some(org_carbon);
    record
}

fn clay_profile(profile_id: i64, org_carbon: f64, ph: f64) -> ProfileLayerRecord {
    let mut record = record(100, profile_id, DepthLayer::D1, org_carbon);
    record.texture = CodeValue::Integer(3);
    record.ph_water = Some(ph);
    record.cec_soil = Some(20.0);
    record.cec_clay = Some(45.0);
    record.root_depth = CodeValue::Integer(100);
    record.roots = CodeValue::Integer(3);
    record.drainage = CodeValue::Integer(4);
    record.clay = Some(40.0);
    record
}

fn lixisol() -> SmuClassification {
    SmuClassification {
        smu_id: 100,
        wrb4: CodeValue::from("LXha"),
        wrb2: CodeValue::from("LX"),
    }
}

#[test]
fn consolidates_two_profiles_into_one_row() {
    let mut first = clay_profile(1, 1.25, 6.5);
    first.teb = Some(10.0);
    first.phase1 = CodeValue::Integer(2);
    first.esp = Some(2.0);
    first.elec_cond = Some(0.25);
    first.tcarbon_eq = Some(1.0);
    first.gypsum = Some(0.25);
    first.coarse = Some(8.0);
    let mut second = clay_profile(2, 1.75, 7.5);
    second.teb = Some(14.0);
    second.phase1 = CodeValue::Integer(1);
    second.esp = Some(4.0);
    second.elec_cond = Some(0.75);
    second.tcarbon_eq = Some(2.0);
    second.gypsum = Some(0.75);
    second.coarse = Some(12.0);

    let tables = tables();
    let records = vec![second, first];
    let vertic = classify_vertic(&[lixisol()], &records, &tables);
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layer = consolidate_layer(&records, DepthLayer::D1, &ctx);

    assert_eq!(layer.raw_count, 2);
    assert_eq!(layer.valid_count, 2);
    insta::assert_debug_snapshot!(layer.rows[0], @r#"
    OutputRow {
        code: 100,
        txt: "Clay",
        oc: 1.5,
        ph: 7.0,
        teb: 12.0,
        bs: 60,
        cec_soil: 20,
        cec_clay: 45,
        rsd: 100,
        spr: None,
        sph: Some(
            "Sodic",
        ),
        osd: 50,
        drg: "MW",
        esp: 3,
        ec: 0,
        ccb: 2,
        gyp: 0.5,
        grc: 10,
        vsp: 1,
    }
    "#);
}

#[test]
fn expansive_topsoil_sets_vertic_flag_without_label() {
    let tables = tables();
    let records = vec![clay_profile(1, 1.0, 6.0)];
    let vertic = classify_vertic(&[lixisol()], &records, &tables);
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layer = consolidate_layer(&records, DepthLayer::D1, &ctx);
    assert_eq!(layer.rows[0].vsp, 1);
}

#[test]
fn expansive_topsoil_without_classification_row_exports_zero() {
    let tables = tables();
    let mut unlisted = clay_profile(1, 1.0, 6.0);
    unlisted.smu_id = 555;
    let records = vec![unlisted];
    let vertic = classify_vertic(&[lixisol()], &records, &tables);
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layer = consolidate_layer(&records, DepthLayer::D1, &ctx);
    assert_eq!(layer.rows[0].code, 555);
    assert_eq!(layer.rows[0].vsp, 0);
}

#[test]
fn vertic_flag_applies_to_every_layer() {
    let tables = tables();
    let mut deep = record(100, 1, DepthLayer::D5, 0.3);
    deep.clay = Some(10.0);
    let records = vec![clay_profile(1, 1.0, 6.0), deep];
    let vertic = classify_vertic(&[lixisol()], &records, &tables);
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layer = consolidate_layer(&records, DepthLayer::D5, &ctx);
    assert_eq!(layer.rows[0].vsp, 1);
}

#[test]
fn single_profile_keeps_measured_values() {
    let tables = tables();
    let mut only = record(7, 1, DepthLayer::D1, 1.5);
    only.ph_water = Some(9.2);
    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let row = &consolidate_layer(&[only], DepthLayer::D1, &ctx).rows[0];
    assert_eq!(row.oc, 1.5);
    assert_eq!(row.ph, 9.2);
    assert_eq!(row.vsp, 0);
}

#[test]
fn fractional_real_codes_resolve_by_truncation() {
    let tables = tables();
    let mut only = record(7, 1, DepthLayer::D1, 1.0);
    only.roots = CodeValue::from_real(3.5);
    only.phase1 = CodeValue::from_real(2.5);
    only.drainage = CodeValue::from_real(4.5);
    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let row = &consolidate_layer(&[only], DepthLayer::D1, &ctx).rows[0];
    assert_eq!(row.osd, 50);
    assert_eq!(row.sph.as_deref(), Some("Sodic"));
    assert_eq!(row.drg, "MW");
}

#[test]
fn zero_cec_gives_zero_base_saturation() {
    let tables = tables();
    let mut only = record(7, 1, DepthLayer::D1, 1.0);
    only.teb = Some(20.0);
    only.cec_soil = Some(0.0);
    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let row = &consolidate_layer(&[only], DepthLayer::D1, &ctx).rows[0];
    assert_eq!(row.bs, 0);
}

#[test]
fn base_saturation_is_recomputed_from_means() {
    let tables = tables();
    let mut saturated = record(7, 1, DepthLayer::D1, 1.0);
    saturated.teb = Some(10.0);
    saturated.cec_soil = Some(10.0);
    let mut leached = record(7, 2, DepthLayer::D1, 1.0);
    leached.teb = Some(0.0);
    leached.cec_soil = Some(30.0);
    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let row = &consolidate_layer(&[saturated, leached], DepthLayer::D1, &ctx).rows[0];
    // Mean of row-wise BS would be 50.
    assert_eq!(row.bs, 25);
}

#[test]
fn clamps_and_fallbacks() {
    let tables = tables();
    let mut alkaline = record(1, 1, DepthLayer::D1, 1.0);
    alkaline.ph_water = Some(12.5);
    alkaline.esp = Some(150.0);
    let mut acid = record(2, 1, DepthLayer::D1, 1.0);
    acid.ph_water = Some(1.0);
    acid.esp = Some(-3.0);
    let bare = record(3, 1, DepthLayer::D1, 1.0);

    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let rows = consolidate_layer(&[bare, acid, alkaline], DepthLayer::D1, &ctx).rows;

    let codes: Vec<i64> = rows.iter().map(|row| row.code).collect();
    assert_eq!(codes, vec![1, 2, 3]);
    assert_eq!((rows[0].ph, rows[0].esp), (11.0, 100));
    assert_eq!((rows[1].ph, rows[1].esp), (3.0, 0));
    assert_eq!(rows[2].ph, 7.0);
    assert_eq!(rows[2].rsd, 100);
    assert_eq!(rows[2].cec_soil, 0);
    assert_eq!(rows[2].txt, "");
    assert_eq!(rows[2].drg, "");
    assert_eq!(rows[2].spr, None);
}

#[test]
fn records_without_carbon_are_ignored() {
    let tables = tables();
    let mut measured = record(1, 1, DepthLayer::D1, 2.0);
    measured.ph_water = Some(6.0);
    let mut empty = record(1, 2, DepthLayer::D1, 0.0);
    empty.ph_water = Some(10.0);
    let unmeasured = record(2, 1, DepthLayer::D1, -1.0);

    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layer = consolidate_layer(&[measured, empty, unmeasured], DepthLayer::D1, &ctx);
    assert_eq!(layer.raw_count, 3);
    assert_eq!(layer.valid_count, 1);
    assert_eq!(layer.rows.len(), 1);
    assert_eq!(layer.rows[0].ph, 6.0);
}

#[test]
fn layer_without_valid_rows_is_absent_from_export() {
    let tables = tables();
    let records = vec![
        record(1, 1, DepthLayer::D1, 1.0),
        record(1, 1, DepthLayer::D2, 0.0),
    ];
    let vertic = VerticMap::default();
    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layers = consolidate_layers(&records, &DepthLayer::ALL, &ctx);
    assert_eq!(layers.len(), 7);
    assert!(layers[1].is_empty());
    assert_eq!(layers[1].raw_count, 1);

    let frames = layers
        .iter()
        .map(|layer| build_layer_frame(layer.layer, &layer.rows))
        .collect::<Result<Vec<_>, _>>()
        .expect("build frames");
    let combined = assemble_layers(&frames).expect("assemble");
    assert_eq!(combined.height(), 1);
    let tags: Vec<Option<&str>> = combined
        .column("LAYER")
        .expect("LAYER")
        .str()
        .expect("str")
        .into_iter()
        .collect();
    assert_eq!(tags, vec![Some("D1")]);
}

fn measured(
    ph: Option<f64>,
    teb: Option<f64>,
    cec: Option<f64>,
    esp: Option<f64>,
) -> ProfileLayerRecord {
    let mut record = record(1, 1, DepthLayer::D1, 1.0);
    record.ph_water = ph;
    record.teb = teb;
    record.cec_soil = cec;
    record.esp = esp;
    record
}

proptest! {
    #[test]
    fn exported_values_stay_in_range(
        ph in prop::option::of(-5.0f64..20.0),
        teb in prop::option::of(-10.0f64..200.0),
        cec in prop::option::of(0.0f64..60.0),
        esp in prop::option::of(-50.0f64..200.0),
    ) {
        let tables = tables();
        let vertic = VerticMap::default();
        let ctx = ConsolidationContext::new(&tables, &vertic);
        let layer = consolidate_layer(&[measured(ph, teb, cec, esp)], DepthLayer::D1, &ctx);
        let row = &layer.rows[0];

        prop_assert!((0..=100).contains(&row.bs));
        prop_assert!((3.0..=11.0).contains(&row.ph));
        prop_assert!((0..=100).contains(&row.esp));

        let expected_bs = match (teb, cec) {
            (_, Some(c)) if c != 0.0 => {
                (teb.unwrap_or(0.0) / c * 100.0).clamp(0.0, 100.0).round_ties_even() as i64
            }
            _ => 0,
        };
        prop_assert_eq!(row.bs, expected_bs);
    }

    #[test]
    fn consolidation_is_deterministic(
        phases in prop::collection::vec(0i64..4, 1..6),
    ) {
        let tables = tables();
        let vertic = VerticMap::default();
        let ctx = ConsolidationContext::new(&tables, &vertic);
        let records: Vec<ProfileLayerRecord> = phases
            .iter()
            .enumerate()
            .map(|(idx, phase)| {
                let mut record = record(1, idx as i64, DepthLayer::D1, 1.0);
                record.phase1 = CodeValue::Integer(*phase);
                record
            })
            .collect();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = consolidate_layer(&records, DepthLayer::D1, &ctx);
        let backward = consolidate_layer(&reversed, DepthLayer::D1, &ctx);
        prop_assert_eq!(forward.rows, backward.rows);
    }
}
