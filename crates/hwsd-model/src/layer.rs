//! HWSD2 depth layers.
//!
//! HWSD2 describes each soil profile in seven fixed depth bands. D1 is the
//! topsoil (0-20 cm), D7 the deepest band (150-200 cm).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DepthLayer {
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
}

impl DepthLayer {
    /// All layers in processing order.
    pub const ALL: [DepthLayer; 7] = [
        DepthLayer::D1,
        DepthLayer::D2,
        DepthLayer::D3,
        DepthLayer::D4,
        DepthLayer::D5,
        DepthLayer::D6,
        DepthLayer::D7,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DepthLayer::D1 => "D1",
            DepthLayer::D2 => "D2",
            DepthLayer::D3 => "D3",
            DepthLayer::D4 => "D4",
            DepthLayer::D5 => "D5",
            DepthLayer::D6 => "D6",
            DepthLayer::D7 => "D7",
        }
    }

    /// Layer depth range in centimetres (top, bottom).
    pub fn depth_range_cm(self) -> (u32, u32) {
        match self {
            DepthLayer::D1 => (0, 20),
            DepthLayer::D2 => (20, 40),
            DepthLayer::D3 => (40, 60),
            DepthLayer::D4 => (60, 80),
            DepthLayer::D5 => (80, 100),
            DepthLayer::D6 => (100, 150),
            DepthLayer::D7 => (150, 200),
        }
    }
}

impl fmt::Display for DepthLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepthLayer {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        DepthLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::InvalidLayer(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layer_codes() {
        assert_eq!("D1".parse::<DepthLayer>().unwrap(), DepthLayer::D1);
        assert_eq!(" d7 ".parse::<DepthLayer>().unwrap(), DepthLayer::D7);
        assert!("D8".parse::<DepthLayer>().is_err());
        assert!("".parse::<DepthLayer>().is_err());
    }

    #[test]
    fn all_is_ordered() {
        let mut sorted = DepthLayer::ALL;
        sorted.sort();
        assert_eq!(sorted, DepthLayer::ALL);
    }
}
