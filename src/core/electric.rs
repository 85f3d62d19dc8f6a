use std::fmt::{Display, Formatter};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        efficiency::EnergyConsumption,
        grid::{GridSource, GridTable},
        manufacturing::ManufacturingFootprint,
        reference::ElectricFactors,
        result::{AnnualConsumption, EmissionResult, VehicleKind},
    },
    error::{Result, ensure_years},
    quantity::{Kilometres, KilowattHours},
};

pub const COLD_WEATHER_MULTIPLIER: f64 = 1.20;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DrivingPattern {
    #[default]
    Mixed,
    City,
    Highway,
}

impl DrivingPattern {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Mixed => 1.0,
            Self::City => 1.15,
            Self::Highway => 0.90,
        }
    }
}

impl Display for DrivingPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mixed => write!(f, "Mixed"),
            Self::City => write!(f, "City"),
            Self::Highway => write!(f, "Highway"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChargingType {
    /// Home wallbox.
    Home,

    Workplace,

    /// DC fast charging at a public station.
    PublicFast,
}

impl ChargingType {
    /// Fraction of the battery energy lost while charging.
    pub const fn loss(self) -> f64 {
        match self {
            Self::Home => 0.10,
            Self::Workplace => 0.12,
            Self::PublicFast => 0.15,
        }
    }
}

/// Usage of an electric vehicle.
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
pub struct ElectricVehicle {
    pub annual_distance: Kilometres,
    pub energy_consumption: EnergyConsumption,

    #[builder(into)]
    pub grid: GridSource,

    #[builder(default = 15)]
    pub lifetime_years: u32,

    #[builder(default)]
    #[serde(default)]
    pub driving_pattern: DrivingPattern,

    /// Charging losses are not accounted when unset.
    pub charging: Option<ChargingType>,

    #[builder(default)]
    #[serde(default)]
    pub cold_weather: bool,

    #[builder(default)]
    #[serde(default)]
    pub manufacturing: ManufacturingFootprint,
}

impl ElectricVehicle {
    /// Combined consumption multiplier, `1.0` when no modifiers are set.
    pub fn consumption_multiplier(&self) -> f64 {
        let cold = if self.cold_weather { COLD_WEATHER_MULTIPLIER } else { 1.0 };
        let charging = 1.0 + self.charging.map_or(0.0, ChargingType::loss);
        self.driving_pattern.multiplier() * cold * charging
    }

    /// Annual energy drawn from the grid with the modifiers applied.
    pub fn annual_energy(&self) -> Result<KilowattHours> {
        let energy = self.energy_consumption.energy_for(self.annual_distance)?;
        Ok(energy * self.consumption_multiplier())
    }

    pub(crate) fn emissions(
        &self,
        factors: &ElectricFactors,
        grid: &GridTable,
    ) -> Result<EmissionResult> {
        ensure_years("lifetime_years", self.lifetime_years)?;
        let energy = self.annual_energy()?;
        let grid = grid.resolve(&self.grid)?;
        let manufacturing_phases =
            self.manufacturing.phases(factors.manufacturing, factors.battery_production)?;

        let annual_direct = energy * (grid.intensity * factors.transmission_multiplier());
        let annual_upstream = energy * factors.infrastructure;

        Ok(EmissionResult::new(
            VehicleKind::Electric,
            self.lifetime_years,
            AnnualConsumption::Electric { energy, grid },
            (annual_direct, annual_upstream),
            manufacturing_phases,
            factors.pollutants.apply(annual_direct + annual_upstream),
        ))
    }
}
