use serde::{Deserialize, Serialize};

use crate::{
    error::{CalculationError, Result},
    quantity::Kilograms,
};

/// Pollutant masses per kilogram of CO2-equivalent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollutantRatios {
    pub nox: f64,
    pub pm25: f64,
    pub so2: f64,
}

impl PollutantRatios {
    pub const DIESEL: Self = Self { nox: 0.015, pm25: 0.0008, so2: 0.0003 };

    /// Power-plant side pollutants attributed to the electricity drawn.
    pub const ELECTRIC: Self = Self { nox: 0.002, pm25: 0.0001, so2: 0.001 };

    pub fn apply(&self, co2: Kilograms) -> Pollutants {
        Pollutants { nox: co2 * self.nox, pm25: co2 * self.pm25, so2: co2 * self.so2 }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        for ratio in [self.nox, self.pm25, self.so2] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(CalculationError::InvalidTables(format!(
                    "{name} pollutant ratio must be non-negative, got {ratio}",
                )));
            }
        }
        Ok(())
    }
}

/// Annual pollutant masses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    #[serde(rename = "nox_kg")]
    pub nox: Kilograms,

    #[serde(rename = "pm25_kg")]
    pub pm25: Kilograms,

    #[serde(rename = "so2_kg")]
    pub so2: Kilograms,
}
