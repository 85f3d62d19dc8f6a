use serde::{Deserialize, Serialize};

use crate::{
    core::{
        catalog::VehicleCatalog,
        grid::GridTable,
        manufacturing::ManufacturingPhases,
        pollutants::PollutantRatios,
    },
    error::{CalculationError, Result},
    quantity::{KilogramsPerKilowattHour, KilogramsPerLitre, Quantity},
};

/// Well-to-tank share of the diesel footprint.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DieselUpstream {
    #[serde(rename = "extraction_kg_per_litre")]
    pub extraction: KilogramsPerLitre,

    #[serde(rename = "refining_kg_per_litre")]
    pub refining: KilogramsPerLitre,

    #[serde(rename = "transport_kg_per_litre")]
    pub transport: KilogramsPerLitre,
}

impl DieselUpstream {
    pub fn total(&self) -> KilogramsPerLitre {
        self.extraction + self.refining + self.transport
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DieselFactors {
    /// Combustion emissions.
    #[serde(rename = "tailpipe_kg_per_litre")]
    pub tailpipe: KilogramsPerLitre,

    pub upstream: DieselUpstream,
    pub pollutants: PollutantRatios,
    pub manufacturing: ManufacturingPhases,
}

impl Default for DieselFactors {
    fn default() -> Self {
        Self {
            tailpipe: Quantity(2.68),
            upstream: DieselUpstream {
                extraction: Quantity(0.65),
                refining: Quantity(0.52),
                transport: Quantity(0.18),
            },
            pollutants: PollutantRatios::DIESEL,
            manufacturing: ManufacturingPhases::DIESEL,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectricFactors {
    /// Fraction of generated electricity lost before it reaches the charger.
    pub transmission_loss: f64,

    /// Grid infrastructure footprint per kilowatt-hour drawn.
    #[serde(rename = "infrastructure_kg_per_kwh")]
    pub infrastructure: KilogramsPerKilowattHour,

    /// Battery production footprint per kilowatt-hour of capacity.
    #[serde(rename = "battery_production_kg_per_kwh")]
    pub battery_production: KilogramsPerKilowattHour,

    pub pollutants: PollutantRatios,
    pub manufacturing: ManufacturingPhases,
}

impl ElectricFactors {
    /// Multiplier applied to grid emissions to account for transmission losses.
    pub fn transmission_multiplier(&self) -> f64 {
        1.0 + self.transmission_loss
    }
}

impl Default for ElectricFactors {
    fn default() -> Self {
        Self {
            transmission_loss: 0.05,
            infrastructure: Quantity(0.02),
            battery_production: Quantity(50.0),
            pollutants: PollutantRatios::ELECTRIC,
            manufacturing: ManufacturingPhases::ELECTRIC,
        }
    }
}

/// Every lookup constant used by the calculator.
///
/// The defaults describe the German market. A TOML file with the same structure may replace
/// them, see [`ReferenceTables::from_toml`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub diesel: DieselFactors,
    pub electric: ElectricFactors,
    pub grid: GridTable,

    /// Tables written before the catalog existed load with the built-in models.
    #[serde(default)]
    pub models: VehicleCatalog,
}

impl ReferenceTables {
    /// Parse and validate the tables.
    pub fn from_toml(text: &str) -> Result<Self> {
        let this: Self = toml::from_str(text)
            .map_err(|error| CalculationError::InvalidTables(error.to_string()))?;
        this.validate()?;
        Ok(this)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|error| CalculationError::InvalidTables(error.to_string()))
    }

    /// The grid table and the catalog validate themselves on construction, this covers the rest.
    pub fn validate(&self) -> Result<()> {
        let diesel = &self.diesel;
        for (name, factor) in [
            ("tailpipe", diesel.tailpipe),
            ("extraction", diesel.upstream.extraction),
            ("refining", diesel.upstream.refining),
            ("fuel transport", diesel.upstream.transport),
        ] {
            if !factor.is_finite() || factor < KilogramsPerLitre::ZERO {
                return Err(CalculationError::InvalidTables(format!(
                    "diesel {name} factor must be non-negative, got {}",
                    factor.0,
                )));
            }
        }
        diesel.pollutants.validate("diesel")?;
        diesel.manufacturing.validate("diesel")?;

        let electric = &self.electric;
        if !(0.0..1.0).contains(&electric.transmission_loss) {
            return Err(CalculationError::InvalidTables(format!(
                "transmission loss must be within [0, 1), got {}",
                electric.transmission_loss,
            )));
        }
        for (name, factor) in [
            ("infrastructure", electric.infrastructure),
            ("battery production", electric.battery_production),
        ] {
            if !factor.is_finite() || factor < KilogramsPerKilowattHour::ZERO {
                return Err(CalculationError::InvalidTables(format!(
                    "electric {name} factor must be non-negative, got {}",
                    factor.0,
                )));
            }
        }
        electric.pollutants.validate("electric")?;
        electric.manufacturing.validate("electric")?;
        Ok(())
    }
}
