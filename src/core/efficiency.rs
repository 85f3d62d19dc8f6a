use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    core::result::VehicleKind,
    error::{Result, ensure_non_negative, ensure_positive},
    quantity::{KilowattHours, Kilometres, Litres},
};

/// Diesel fuel economy in one of the two units in common use.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "kebab-case")]
pub enum FuelEconomy {
    /// Miles per US gallon.
    MilesPerGallon(f64),

    /// Litres per 100 kilometres.
    LitresPer100Km(f64),
}

impl FuelEconomy {
    /// Rejects non-positive and non-finite figures.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::MilesPerGallon(value) => {
                ensure_positive("fuel_economy", value).map(Self::MilesPerGallon)
            }
            Self::LitresPer100Km(value) => {
                ensure_positive("fuel_economy", value).map(Self::LitresPer100Km)
            }
        }
    }

    /// Fuel burnt over the distance.
    pub fn fuel_for(self, distance: Kilometres) -> Result<Litres> {
        ensure_non_negative("annual_distance", distance.0)?;
        Ok(match self.validate()? {
            Self::MilesPerGallon(mpg) => Litres::from_us_gallons(distance.as_miles() / mpg),
            Self::LitresPer100Km(litres) => Litres::from(distance.0 / 100.0 * litres),
        })
    }

    #[must_use]
    pub fn to_litres_per_100_km(self) -> Self {
        match self {
            Self::MilesPerGallon(mpg) => Self::LitresPer100Km(Self::reciprocal_scale() / mpg),
            Self::LitresPer100Km(_) => self,
        }
    }

    #[must_use]
    pub fn to_miles_per_gallon(self) -> Self {
        match self {
            Self::LitresPer100Km(litres) => Self::MilesPerGallon(Self::reciprocal_scale() / litres),
            Self::MilesPerGallon(_) => self,
        }
    }

    pub const fn value(self) -> f64 {
        match self {
            Self::MilesPerGallon(value) | Self::LitresPer100Km(value) => value,
        }
    }

    /// `mpg × L/100 km`, the constant linking the two reciprocal units (≈ 235.21).
    const fn reciprocal_scale() -> f64 {
        100.0 * Litres::LITRES_PER_US_GALLON / Kilometres::KILOMETRES_PER_MILE
    }
}

impl Display for FuelEconomy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MilesPerGallon(mpg) => write!(f, "{mpg:.1} mpg"),
            Self::LitresPer100Km(litres) => write!(f, "{litres:.1} L/100 km"),
        }
    }
}

/// Electric vehicle energy consumption.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "kebab-case")]
pub enum EnergyConsumption {
    KilowattHoursPer100Miles(f64),
    KilowattHoursPer100Km(f64),
}

impl EnergyConsumption {
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::KilowattHoursPer100Miles(value) => {
                ensure_positive("energy_consumption", value).map(Self::KilowattHoursPer100Miles)
            }
            Self::KilowattHoursPer100Km(value) => {
                ensure_positive("energy_consumption", value).map(Self::KilowattHoursPer100Km)
            }
        }
    }

    /// Energy drawn from the battery over the distance, before any modifiers.
    pub fn energy_for(self, distance: Kilometres) -> Result<KilowattHours> {
        ensure_non_negative("annual_distance", distance.0)?;
        Ok(match self.validate()? {
            Self::KilowattHoursPer100Miles(kwh) => {
                KilowattHours::from(distance.as_miles() / 100.0 * kwh)
            }
            Self::KilowattHoursPer100Km(kwh) => KilowattHours::from(distance.0 / 100.0 * kwh),
        })
    }

    #[must_use]
    pub fn to_per_100_km(self) -> Self {
        match self {
            Self::KilowattHoursPer100Miles(kwh) => {
                Self::KilowattHoursPer100Km(kwh / Kilometres::KILOMETRES_PER_MILE)
            }
            Self::KilowattHoursPer100Km(_) => self,
        }
    }

    #[must_use]
    pub fn to_per_100_miles(self) -> Self {
        match self {
            Self::KilowattHoursPer100Km(kwh) => {
                Self::KilowattHoursPer100Miles(kwh * Kilometres::KILOMETRES_PER_MILE)
            }
            Self::KilowattHoursPer100Miles(_) => self,
        }
    }

    pub const fn value(self) -> f64 {
        match self {
            Self::KilowattHoursPer100Miles(value) | Self::KilowattHoursPer100Km(value) => value,
        }
    }
}

impl Display for EnergyConsumption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KilowattHoursPer100Miles(kwh) => write!(f, "{kwh:.1} kWh/100 mi"),
            Self::KilowattHoursPer100Km(kwh) => write!(f, "{kwh:.1} kWh/100 km"),
        }
    }
}

/// Efficiency of either kind of vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Efficiency {
    Fuel(FuelEconomy),
    Energy(EnergyConsumption),
}

impl Efficiency {
    pub const fn kind(self) -> VehicleKind {
        match self {
            Self::Fuel(_) => VehicleKind::Diesel,
            Self::Energy(_) => VehicleKind::Electric,
        }
    }

    pub const fn fuel_economy(self) -> Option<FuelEconomy> {
        match self {
            Self::Fuel(economy) => Some(economy),
            Self::Energy(_) => None,
        }
    }

    pub const fn energy_consumption(self) -> Option<EnergyConsumption> {
        match self {
            Self::Energy(consumption) => Some(consumption),
            Self::Fuel(_) => None,
        }
    }

    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Fuel(economy) => economy.validate().map(Self::Fuel),
            Self::Energy(consumption) => consumption.validate().map(Self::Energy),
        }
    }
}

impl From<FuelEconomy> for Efficiency {
    fn from(economy: FuelEconomy) -> Self {
        Self::Fuel(economy)
    }
}

impl From<EnergyConsumption> for Efficiency {
    fn from(consumption: EnergyConsumption) -> Self {
        Self::Energy(consumption)
    }
}

impl Display for Efficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fuel(economy) => Display::fmt(economy, f),
            Self::Energy(consumption) => Display::fmt(consumption, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::CalculationError;

    #[test]
    fn test_fuel_for_miles_per_gallon() {
        let litres =
            FuelEconomy::MilesPerGallon(30.0).fuel_for(Kilometres::from_miles(12_000.0)).unwrap();
        assert_relative_eq!(litres.0, 12_000.0 / 30.0 * 3.785_41, max_relative = 1e-12);
    }

    #[test]
    fn test_fuel_for_litres_per_100_km() {
        let litres = FuelEconomy::LitresPer100Km(6.5).fuel_for(Kilometres::from(15_000.0)).unwrap();
        assert_relative_eq!(litres.0, 975.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fuel_economy_round_trip() {
        let distance = Kilometres::from_miles(12_000.0);
        let entered = FuelEconomy::MilesPerGallon(30.0);
        let converted = entered.to_litres_per_100_km();
        assert_relative_eq!(converted.value(), 7.840_482, max_relative = 1e-6);
        assert_relative_eq!(
            converted.fuel_for(distance).unwrap().0,
            entered.fuel_for(distance).unwrap().0,
            max_relative = 1e-12,
        );
        assert_relative_eq!(converted.to_miles_per_gallon().value(), 30.0, max_relative = 1e-12);
    }

    #[test]
    fn test_energy_consumption_round_trip() {
        let distance = Kilometres::from_miles(12_000.0);
        let entered = EnergyConsumption::KilowattHoursPer100Miles(34.0);
        assert_relative_eq!(entered.energy_for(distance).unwrap().0, 4080.0, max_relative = 1e-12);
        let converted = entered.to_per_100_km();
        assert_relative_eq!(
            converted.energy_for(distance).unwrap().0,
            entered.energy_for(distance).unwrap().0,
            max_relative = 1e-12,
        );
        assert_relative_eq!(converted.to_per_100_miles().value(), 34.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_efficiency_is_rejected() {
        assert!(matches!(
            FuelEconomy::MilesPerGallon(0.0).fuel_for(Kilometres::from(100.0)),
            Err(CalculationError::InvalidParameter { name: "fuel_economy", .. }),
        ));
        assert!(matches!(
            EnergyConsumption::KilowattHoursPer100Km(-1.0).energy_for(Kilometres::from(100.0)),
            Err(CalculationError::InvalidParameter { name: "energy_consumption", .. }),
        ));
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        assert!(matches!(
            FuelEconomy::LitresPer100Km(5.0).fuel_for(Kilometres::from(-1.0)),
            Err(CalculationError::InvalidParameter { name: "annual_distance", .. }),
        ));
    }
}
