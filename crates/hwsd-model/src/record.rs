use serde::{Deserialize, Serialize};

use crate::{CodeValue, DepthLayer};

/// One `HWSD2_LAYERS` row: a soil profile's attributes within one depth layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLayerRecord {
    /// `HWSD2_SMU_ID`.
    pub smu_id: i64,
    /// `ID`: profile row id, used for deterministic ordering.
    pub profile_id: i64,
    pub layer: DepthLayer,
    /// `TOPDEP` in cm.
    pub top_depth: Option<f64>,
    /// `TEXTURE_USDA` code.
    pub texture: CodeValue,
    /// `ORG_CARBON` in % weight.
    pub org_carbon: Option<f64>,
    /// `PH_WATER`.
    pub ph_water: Option<f64>,
    /// `TEB`: total exchangeable bases, cmol(+)/kg.
    pub teb: Option<f64>,
    /// `CEC_SOIL`, cmol(+)/kg.
    pub cec_soil: Option<f64>,
    /// `CEC_CLAY`, cmol(+)/kg.
    pub cec_clay: Option<f64>,
    /// `ROOT_DEPTH`: root-system depth band.
    pub root_depth: CodeValue,
    pub phase1: CodeValue,
    pub phase2: CodeValue,
    /// `ROOTS`: obstacle-to-roots code.
    pub roots: CodeValue,
    pub drainage: CodeValue,
    /// `ESP`: exchangeable sodium percentage.
    pub esp: Option<f64>,
    /// `ELEC_COND` in dS/m.
    pub elec_cond: Option<f64>,
    /// `TCARBON_EQ`: calcium carbonate equivalent %.
    pub tcarbon_eq: Option<f64>,
    pub gypsum: Option<f64>,
    /// `COARSE`: coarse fragments % volume.
    pub coarse: Option<f64>,
    pub clay: Option<f64>,
}

impl ProfileLayerRecord {
    /// Create a record with every attribute missing.
    pub fn new(smu_id: i64, profile_id: i64, layer: DepthLayer) -> Self {
        Self {
            smu_id,
            profile_id,
            layer,
            top_depth: None,
            texture: CodeValue::Missing,
            org_carbon: None,
            ph_water: None,
            teb: None,
            cec_soil: None,
            cec_clay: None,
            root_depth: CodeValue::Missing,
            phase1: CodeValue::Missing,
            phase2: CodeValue::Missing,
            roots: CodeValue::Missing,
            drainage: CodeValue::Missing,
            esp: None,
            elec_cond: None,
            tcarbon_eq: None,
            gypsum: None,
            coarse: None,
            clay: None,
        }
    }

    /// A record carries real measurements only when organic carbon is positive.
    pub fn is_valid(&self) -> bool {
        self.org_carbon.is_some_and(|value| value > 0.0)
    }
}

/// WRB classification codes of a soil mapping unit (`HWSD2_SMU`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmuClassification {
    pub smu_id: i64,
    pub wrb4: CodeValue,
    pub wrb2: CodeValue,
}
