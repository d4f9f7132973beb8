//! Multi-layer assembly.
//!
//! Stacks the per-layer frames into the combined PyAEZ export, tagging each
//! row with its layer in a `LAYER` column placed right after `CODE`.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use hwsd_model::{DepthLayer, LAYER_COLUMN};

use crate::error::Result;
use crate::frame::LayerFrame;
use crate::frame_builder::build_layer_frame;

/// Copy of the layer's data with the `LAYER` column inserted at index 1.
pub fn tag_layer(frame: &LayerFrame) -> Result<DataFrame> {
    let tags = vec![frame.layer.as_str(); frame.data.height()];
    let mut columns: Vec<Column> = frame.data.get_columns().to_vec();
    let at = columns.len().min(1);
    columns.insert(at, Series::new(LAYER_COLUMN.into(), tags).into());
    Ok(DataFrame::new(columns)?)
}

/// Combine layer frames in D1..D7 order, each keeping its own row order.
///
/// Empty frames contribute nothing. Without any rows the result is an empty
/// frame that still carries every export column.
pub fn assemble_layers(frames: &[LayerFrame]) -> Result<DataFrame> {
    let mut ordered: Vec<&LayerFrame> = frames.iter().filter(|frame| !frame.is_empty()).collect();
    ordered.sort_by_key(|frame| frame.layer);

    let mut combined: Option<DataFrame> = None;
    for frame in ordered {
        let tagged = tag_layer(frame)?;
        debug!(layer = %frame.layer, rows = tagged.height(), "stacking layer");
        match combined.as_mut() {
            Some(data) => {
                data.vstack_mut(&tagged)?;
            }
            None => combined = Some(tagged),
        }
    }

    match combined {
        Some(data) => Ok(data),
        None => tag_layer(&build_layer_frame(DepthLayer::D1, &[])?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    fn frame(layer: DepthLayer, codes: &[i64]) -> LayerFrame {
        let data = DataFrame::new(vec![
            Series::new("CODE".into(), codes.to_vec()).into(),
            Series::new("TXT".into(), vec!["Loam"; codes.len()]).into(),
        ])
        .expect("frame");
        LayerFrame::new(layer, data)
    }

    #[test]
    fn layer_column_follows_code() {
        let tagged = tag_layer(&frame(DepthLayer::D3, &[1, 2])).expect("tag");
        let names: Vec<String> = tagged
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, ["CODE", "LAYER", "TXT"]);
        assert_eq!(
            tagged.column("LAYER").expect("LAYER").get(0).expect("value"),
            AnyValue::String("D3")
        );
    }

    #[test]
    fn stacks_in_layer_order() {
        let frames = vec![
            frame(DepthLayer::D2, &[5, 7]),
            frame(DepthLayer::D1, &[9, 3]),
            frame(DepthLayer::D4, &[]),
        ];
        let combined = assemble_layers(&frames).expect("assemble");
        assert_eq!(combined.height(), 4);
        let layers: Vec<Option<&str>> = combined
            .column("LAYER")
            .expect("LAYER")
            .str()
            .expect("str")
            .into_iter()
            .collect();
        assert_eq!(layers, [Some("D1"), Some("D1"), Some("D2"), Some("D2")]);
        let codes: Vec<Option<i64>> = combined
            .column("CODE")
            .expect("CODE")
            .i64()
            .expect("i64")
            .into_iter()
            .collect();
        assert_eq!(codes, [Some(9), Some(3), Some(5), Some(7)]);
    }

    #[test]
    fn no_rows_keeps_columns() {
        let combined = assemble_layers(&[]).expect("assemble");
        assert_eq!(combined.height(), 0);
        assert_eq!(combined.width(), 20);
    }
}
