use serde::{Deserialize, Serialize};

use crate::{
    error::{CalculationError, Result, ensure_positive},
    quantity::{KilogramsPerKilowattHour, Kilograms, KilowattHours, Quantity},
};

/// Cradle-to-gate footprint split by phase, with the end-of-life credit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingPhases {
    #[serde(rename = "raw_materials_kg")]
    pub raw_materials: Kilograms,

    /// Battery for electric vehicles, engine for diesel vehicles.
    #[serde(rename = "component_kg")]
    pub component: Kilograms,

    #[serde(rename = "assembly_kg")]
    pub assembly: Kilograms,

    #[serde(rename = "transport_kg")]
    pub transport: Kilograms,

    /// Usually negative: recycling credit.
    #[serde(rename = "end_of_life_kg")]
    pub end_of_life: Kilograms,
}

impl ManufacturingPhases {
    pub const DIESEL: Self = Self::new([1400.0, 2800.0, 2300.0, 350.0, -250.0]);
    pub const ELECTRIC: Self = Self::new([2300.0, 3800.0, 2200.0, 350.0, -600.0]);

    const fn new([raw_materials, component, assembly, transport, end_of_life]: [f64; 5]) -> Self {
        Self {
            raw_materials: Quantity(raw_materials),
            component: Quantity(component),
            assembly: Quantity(assembly),
            transport: Quantity(transport),
            end_of_life: Quantity(end_of_life),
        }
    }

    /// Net manufacturing footprint including the end-of-life credit.
    pub fn total(&self) -> Kilograms {
        self.raw_materials + self.component + self.assembly + self.transport + self.end_of_life
    }

    /// Component production, assembly, and transport, the «manufacturing» phase proper.
    pub fn production(&self) -> Kilograms {
        self.component + self.assembly + self.transport
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        let phases = [self.raw_materials, self.component, self.assembly, self.transport];
        if phases.iter().any(|phase| !phase.is_finite() || *phase < Kilograms::ZERO) {
            return Err(CalculationError::InvalidTables(format!(
                "{name} manufacturing phases must be non-negative",
            )));
        }
        if !self.end_of_life.is_finite() {
            return Err(CalculationError::InvalidTables(format!(
                "{name} end-of-life credit must be finite",
            )));
        }
        Ok(())
    }
}

/// How the electric vehicle manufacturing footprint is determined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManufacturingFootprint {
    /// Fixed reference footprint including an average battery.
    #[default]
    Fixed,

    /// Non-battery base plus the battery capacity times the production factor.
    BatteryScaled(KilowattHours),
}

impl ManufacturingFootprint {
    /// Phases for the vehicle, with the battery phase scaled when requested.
    pub fn phases(
        self,
        reference: ManufacturingPhases,
        battery_production: KilogramsPerKilowattHour,
    ) -> Result<ManufacturingPhases> {
        match self {
            Self::Fixed => Ok(reference),
            Self::BatteryScaled(capacity) => {
                ensure_positive("battery_capacity", capacity.0)?;
                Ok(ManufacturingPhases { component: capacity * battery_production, ..reference })
            }
        }
    }
}
