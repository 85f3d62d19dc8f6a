use std::fmt::{Display, Formatter};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        efficiency::FuelEconomy,
        reference::DieselFactors,
        result::{AnnualConsumption, EmissionResult, VehicleKind},
    },
    error::{Result, ensure_positive, ensure_years},
    quantity::{Kilometres, Litres, Quantity},
};

/// Engines above this displacement burn noticeably more fuel than their rating.
pub const LARGE_ENGINE_THRESHOLD: Litres = Quantity(2.0);

pub const LARGE_ENGINE_MULTIPLIER: f64 = 1.10;
pub const TURBOCHARGED_MULTIPLIER: f64 = 0.95;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FuelPathway {
    #[default]
    Regular,

    /// 20 % biodiesel blend.
    BioDieselB20,

    /// Hydrotreated vegetable oil.
    Renewable,
}

impl FuelPathway {
    /// Scales both the tailpipe and the upstream factor.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Regular => 1.0,
            Self::BioDieselB20 => 0.85,
            Self::Renewable => 0.35,
        }
    }
}

impl Display for FuelPathway {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular diesel"),
            Self::BioDieselB20 => write!(f, "Bio-diesel (B20)"),
            Self::Renewable => write!(f, "Renewable diesel"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmissionStandard {
    Euro4,
    Euro5,
    Euro6,
    EpaTier3,
}

impl EmissionStandard {
    /// Older engines consume more than newer ones with the same rating.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Euro6 | Self::EpaTier3 => 1.0,
            Self::Euro5 => 1.05,
            Self::Euro4 => 1.10,
        }
    }
}

/// Usage of a diesel vehicle.
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
pub struct DieselVehicle {
    pub annual_distance: Kilometres,
    pub fuel_economy: FuelEconomy,

    #[builder(default = 15)]
    pub lifetime_years: u32,

    #[builder(default)]
    #[serde(default)]
    pub fuel_pathway: FuelPathway,

    /// Engine displacement.
    pub engine_size: Option<Litres>,

    pub emission_standard: Option<EmissionStandard>,

    #[builder(default)]
    #[serde(default)]
    pub turbocharged: bool,
}

impl DieselVehicle {
    /// Combined real-world consumption multiplier, `1.0` when no modifiers are set.
    pub fn consumption_multiplier(&self) -> Result<f64> {
        let engine = match self.engine_size {
            Some(size) => {
                ensure_positive("engine_size", size.0)?;
                if size > LARGE_ENGINE_THRESHOLD { LARGE_ENGINE_MULTIPLIER } else { 1.0 }
            }
            None => 1.0,
        };
        let turbo = if self.turbocharged { TURBOCHARGED_MULTIPLIER } else { 1.0 };
        let standard = self.emission_standard.map_or(1.0, EmissionStandard::multiplier);
        Ok(engine * turbo * standard)
    }

    /// Annual fuel volume with the modifiers applied.
    pub fn annual_fuel(&self) -> Result<Litres> {
        let multiplier = self.consumption_multiplier()?;
        Ok(self.fuel_economy.fuel_for(self.annual_distance)? * multiplier)
    }

    pub(crate) fn emissions(&self, factors: &DieselFactors) -> Result<EmissionResult> {
        ensure_years("lifetime_years", self.lifetime_years)?;
        let fuel = self.annual_fuel()?;

        let pathway = self.fuel_pathway.multiplier();
        let annual_direct = fuel * (factors.tailpipe * pathway);
        let annual_upstream = fuel * (factors.upstream.total() * pathway);

        Ok(EmissionResult::new(
            VehicleKind::Diesel,
            self.lifetime_years,
            AnnualConsumption::Diesel { fuel },
            (annual_direct, annual_upstream),
            factors.manufacturing,
            factors.pollutants.apply(annual_direct + annual_upstream),
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::CalculationError;

    fn baseline() -> DieselVehicle {
        DieselVehicle::builder()
            .annual_distance(Kilometres::from_miles(12_000.0))
            .fuel_economy(FuelEconomy::MilesPerGallon(30.0))
            .build()
    }

    #[test]
    fn test_multipliers() {
        for (pathway, expected) in [
            (FuelPathway::Regular, 1.0),
            (FuelPathway::BioDieselB20, 0.85),
            (FuelPathway::Renewable, 0.35),
        ] {
            assert_relative_eq!(pathway.multiplier(), expected);
        }
        for (standard, expected) in [
            (EmissionStandard::Euro6, 1.0),
            (EmissionStandard::EpaTier3, 1.0),
            (EmissionStandard::Euro5, 1.05),
            (EmissionStandard::Euro4, 1.10),
        ] {
            assert_relative_eq!(standard.multiplier(), expected);
        }
        assert_relative_eq!(LARGE_ENGINE_MULTIPLIER, 1.10);
        assert_relative_eq!(TURBOCHARGED_MULTIPLIER, 0.95);
    }

    #[test]
    fn test_annual_total_matches_reference_formula() {
        let result = baseline().emissions(&DieselFactors::default()).unwrap();
        let litres = 12_000.0 / 30.0 * 3.785_41;
        assert_relative_eq!(result.annual_direct.0, litres * 2.68, max_relative = 1e-9);
        assert_relative_eq!(result.annual_upstream.0, litres * 1.35, max_relative = 1e-9);
        assert_relative_eq!(
            result.annual_total.0,
            litres * 2.68 + litres * 1.35,
            max_relative = 1e-9,
        );
        assert_relative_eq!(result.lifetime_operation.0, result.annual_total.0 * 15.0);
        assert_relative_eq!(result.total_lifecycle.0, result.lifetime_operation.0 + 6600.0);
        assert_relative_eq!(result.pollutants.nox.0, result.annual_total.0 * 0.015);
        assert_eq!(result.fuel().map(|fuel| fuel.0 > 0.0), Some(true));
    }

    #[test]
    fn test_no_modifiers_is_neutral() {
        assert_relative_eq!(baseline().consumption_multiplier().unwrap(), 1.0);
        let small_engine = DieselVehicle { engine_size: Some(Litres::from(1.6)), ..baseline() };
        assert_relative_eq!(small_engine.consumption_multiplier().unwrap(), 1.0);
    }

    #[test]
    fn test_modifiers_multiply() {
        let vehicle = DieselVehicle {
            engine_size: Some(Litres::from(3.0)),
            turbocharged: true,
            emission_standard: Some(EmissionStandard::Euro5),
            ..baseline()
        };
        assert_relative_eq!(
            vehicle.consumption_multiplier().unwrap(),
            1.10 * 0.95 * 1.05,
            max_relative = 1e-12,
        );
        assert_relative_eq!(
            vehicle.annual_fuel().unwrap().0,
            baseline().annual_fuel().unwrap().0 * 1.10 * 0.95 * 1.05,
            max_relative = 1e-12,
        );
    }

    #[test]
    fn test_fuel_pathway_scales_direct_and_upstream_alike() {
        let factors = DieselFactors::default();
        let regular = baseline().emissions(&factors).unwrap();
        let renewable = DieselVehicle { fuel_pathway: FuelPathway::Renewable, ..baseline() }
            .emissions(&factors)
            .unwrap();
        assert_relative_eq!(
            renewable.annual_direct.0,
            regular.annual_direct.0 * 0.35,
            max_relative = 1e-12,
        );
        assert_relative_eq!(
            renewable.annual_upstream.0,
            regular.annual_upstream.0 * 0.35,
            max_relative = 1e-12,
        );
        assert_relative_eq!(
            renewable.annual_direct.0 / renewable.annual_upstream.0,
            regular.annual_direct.0 / regular.annual_upstream.0,
            max_relative = 1e-12,
        );
        assert_relative_eq!(renewable.fuel().unwrap().0, regular.fuel().unwrap().0);
    }

    #[test]
    fn test_invalid_parameters() {
        let factors = DieselFactors::default();
        let zero_economy =
            DieselVehicle { fuel_economy: FuelEconomy::MilesPerGallon(0.0), ..baseline() };
        assert!(matches!(
            zero_economy.emissions(&factors),
            Err(CalculationError::InvalidParameter { name: "fuel_economy", .. }),
        ));
        let no_years = DieselVehicle { lifetime_years: 0, ..baseline() };
        assert!(matches!(
            no_years.emissions(&factors),
            Err(CalculationError::InvalidParameter { name: "lifetime_years", .. }),
        ));
        let no_engine = DieselVehicle { engine_size: Some(Litres::ZERO), ..baseline() };
        assert!(no_engine.emissions(&factors).is_err());
    }
}
