//! DataFrame construction from consolidated rows.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use hwsd_model::{DepthLayer, OutputRow};

use crate::error::{Result, TransformError};
use crate::frame::LayerFrame;

fn int_column<F>(name: &str, rows: &[OutputRow], field: F) -> Column
where
    F: Fn(&OutputRow) -> i64,
{
    let values: Vec<i64> = rows.iter().map(field).collect();
    Series::new(name.into(), values).into()
}

fn float_column<F>(name: &str, rows: &[OutputRow], field: F) -> Column
where
    F: Fn(&OutputRow) -> f64,
{
    let values: Vec<f64> = rows.iter().map(field).collect();
    Series::new(name.into(), values).into()
}

fn text_column<'a, F>(name: &str, rows: &'a [OutputRow], field: F) -> Column
where
    F: Fn(&'a OutputRow) -> Option<&'a str>,
{
    let values: Vec<Option<&str>> = rows.iter().map(field).collect();
    Series::new(name.into(), values).into()
}

/// Build the PyAEZ DataFrame of one layer.
///
/// Columns follow [`hwsd_model::OUTPUT_COLUMNS`]. Phase columns are nullable
/// strings; every other text column is non-null.
pub fn build_layer_frame(layer: DepthLayer, rows: &[OutputRow]) -> Result<LayerFrame> {
    let columns = vec![
        int_column("CODE", rows, |row| row.code),
        text_column("TXT", rows, |row| Some(row.txt.as_str())),
        float_column("OC", rows, |row| row.oc),
        float_column("pH", rows, |row| row.ph),
        float_column("TEB", rows, |row| row.teb),
        int_column("BS", rows, |row| row.bs),
        int_column("CEC_soil", rows, |row| row.cec_soil),
        int_column("CEC_clay", rows, |row| row.cec_clay),
        int_column("RSD", rows, |row| row.rsd),
        text_column("SPR", rows, |row| row.spr.as_deref()),
        text_column("SPH", rows, |row| row.sph.as_deref()),
        int_column("OSD", rows, |row| row.osd),
        text_column("DRG", rows, |row| Some(row.drg.as_str())),
        int_column("ESP", rows, |row| row.esp),
        int_column("EC", rows, |row| row.ec),
        int_column("CCB", rows, |row| row.ccb),
        float_column("GYP", rows, |row| row.gyp),
        int_column("GRC", rows, |row| row.grc),
        int_column("VSP", rows, |row| row.vsp),
    ];
    let data = DataFrame::new(columns).map_err(|source| TransformError::Frame {
        layer: layer.to_string(),
        source,
    })?;
    Ok(LayerFrame::new(layer, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsd_model::OUTPUT_COLUMNS;
    use polars::prelude::{AnyValue, DataType};

    fn row(code: i64, sph: Option<&str>) -> OutputRow {
        OutputRow {
            code,
            txt: "Loam".to_string(),
            oc: 1.5,
            ph: 6.5,
            teb: 12.0,
            bs: 60,
            cec_soil: 20,
            cec_clay: 45,
            rsd: 100,
            spr: None,
            sph: sph.map(str::to_string),
            osd: 90,
            drg: "MW".to_string(),
            esp: 2,
            ec: 0,
            ccb: 0,
            gyp: 0.0,
            grc: 5,
            vsp: 0,
        }
    }

    #[test]
    fn columns_follow_export_order() {
        let frame = build_layer_frame(DepthLayer::D2, &[row(1, None), row(2, Some("Sodic"))])
            .expect("build frame");
        let names: Vec<String> = frame
            .data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, OUTPUT_COLUMNS);
        assert_eq!(frame.record_count(), 2);
        assert_eq!(frame.dataset_name(), "soil_D2_pyaez");
    }

    #[test]
    fn phase_columns_are_nullable_text() {
        let frame = build_layer_frame(DepthLayer::D1, &[row(1, None), row(2, Some("Sodic"))])
            .expect("build frame");
        let sph = frame.data.column("SPH").expect("SPH column");
        assert_eq!(sph.dtype(), &DataType::String);
        assert_eq!(sph.null_count(), 1);
        assert_eq!(sph.get(1).expect("value"), AnyValue::String("Sodic"));
        assert_eq!(frame.data.column("CODE").expect("CODE").dtype(), &DataType::Int64);
    }

    #[test]
    fn empty_rows_build_empty_frame() {
        let frame = build_layer_frame(DepthLayer::D7, &[]).expect("build frame");
        assert!(frame.is_empty());
        assert_eq!(frame.data.width(), OUTPUT_COLUMNS.len());
    }
}
