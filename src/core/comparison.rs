use std::fmt::{Display, Formatter};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        diesel::{DieselVehicle, EmissionStandard, FuelPathway},
        efficiency::{EnergyConsumption, FuelEconomy},
        electric::{ChargingType, DrivingPattern, ElectricVehicle},
        grid::GridSource,
        manufacturing::ManufacturingFootprint,
        result::EmissionResult,
    },
    quantity::{Kilograms, Kilometres, Litres},
};

/// Two vehicles driven the same way.
///
/// Modifiers default to neutral and only affect the vehicle they belong to.
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub annual_distance: Kilometres,
    pub energy_consumption: EnergyConsumption,
    pub fuel_economy: FuelEconomy,

    #[builder(into)]
    pub grid: GridSource,

    #[builder(default = 15)]
    pub lifetime_years: u32,

    #[builder(default)]
    #[serde(default)]
    pub driving_pattern: DrivingPattern,

    pub charging: Option<ChargingType>,

    #[builder(default)]
    #[serde(default)]
    pub cold_weather: bool,

    #[builder(default)]
    #[serde(default)]
    pub manufacturing: ManufacturingFootprint,

    #[builder(default)]
    #[serde(default)]
    pub fuel_pathway: FuelPathway,

    pub engine_size: Option<Litres>,
    pub emission_standard: Option<EmissionStandard>,

    #[builder(default)]
    #[serde(default)]
    pub turbocharged: bool,
}

impl ComparisonRequest {
    pub fn electric(&self) -> ElectricVehicle {
        ElectricVehicle {
            annual_distance: self.annual_distance,
            energy_consumption: self.energy_consumption,
            grid: self.grid.clone(),
            lifetime_years: self.lifetime_years,
            driving_pattern: self.driving_pattern,
            charging: self.charging,
            cold_weather: self.cold_weather,
            manufacturing: self.manufacturing,
        }
    }

    pub const fn diesel(&self) -> DieselVehicle {
        DieselVehicle {
            annual_distance: self.annual_distance,
            fuel_economy: self.fuel_economy,
            lifetime_years: self.lifetime_years,
            fuel_pathway: self.fuel_pathway,
            engine_size: self.engine_size,
            emission_standard: self.emission_standard,
            turbocharged: self.turbocharged,
        }
    }
}

/// Carbon payback of the electric vehicle's extra manufacturing footprint.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "years", rename_all = "kebab-case")]
pub enum Payback {
    Years(f64),

    /// The electric vehicle does not emit less per year, so the gap never closes.
    Never,
}

impl Payback {
    /// Extra manufacturing footprint divided by the annual savings.
    ///
    /// A cheaper-to-build electric vehicle pays back immediately.
    pub fn new(manufacturing_difference: Kilograms, annual_savings: Kilograms) -> Self {
        if annual_savings > Kilograms::ZERO {
            Self::Years((manufacturing_difference.0 / annual_savings.0).max(0.0))
        } else {
            Self::Never
        }
    }

    pub const fn years(self) -> Option<f64> {
        match self {
            Self::Years(years) => Some(years),
            Self::Never => None,
        }
    }
}

impl Display for Payback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{years:.1} years"),
            Self::Never => write!(f, "never"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    RawMaterials,

    /// Component production, assembly, and transport.
    Manufacturing,

    Operation,
    EndOfLife,
    Total,
}

impl Phase {
    pub const ALL: [Self; 5] =
        [Self::RawMaterials, Self::Manufacturing, Self::Operation, Self::EndOfLife, Self::Total];

    pub fn label(self, lifetime_years: u32) -> String {
        match self {
            Self::RawMaterials => "Raw material extraction".to_owned(),
            Self::Manufacturing => "Manufacturing".to_owned(),
            Self::Operation => format!("Operation ({lifetime_years} years)"),
            Self::EndOfLife => "End of life".to_owned(),
            Self::Total => "Total lifecycle".to_owned(),
        }
    }

    /// Emissions of the result attributed to the phase.
    pub fn of(self, result: &EmissionResult) -> Kilograms {
        let phases = &result.manufacturing_phases;
        match self {
            Self::RawMaterials => phases.raw_materials,
            Self::Manufacturing => phases.production(),
            Self::Operation => result.lifetime_operation,
            Self::EndOfLife => phases.end_of_life,
            Self::Total => result.total_lifecycle,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseRow {
    pub phase: Phase,

    #[serde(rename = "electric_kg")]
    pub electric: Kilograms,

    #[serde(rename = "diesel_kg")]
    pub diesel: Kilograms,
}

/// Lifecycle comparison of an electric and a diesel vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleComparison {
    pub electric: EmissionResult,
    pub diesel: EmissionResult,

    /// Diesel minus electric annual total, negative when the electric vehicle emits more.
    #[serde(rename = "annual_savings_kg")]
    pub annual_savings: Kilograms,

    /// Electric minus diesel manufacturing footprint.
    #[serde(rename = "manufacturing_difference_kg")]
    pub manufacturing_difference: Kilograms,

    pub payback: Payback,

    #[serde(rename = "lifetime_savings_kg")]
    pub lifetime_savings: Kilograms,

    /// Annual savings relative to the diesel annual total.
    pub relative_reduction: f64,

    pub phases: Vec<PhaseRow>,
}

impl LifecycleComparison {
    pub fn new(electric: EmissionResult, diesel: EmissionResult) -> Self {
        let annual_savings = diesel.annual_total - electric.annual_total;
        let manufacturing_difference = electric.manufacturing - diesel.manufacturing;
        let relative_reduction = if diesel.annual_total > Kilograms::ZERO {
            annual_savings.0 / diesel.annual_total.0
        } else {
            0.0
        };
        let phases = Phase::ALL
            .into_iter()
            .map(|phase| PhaseRow {
                phase,
                electric: phase.of(&electric),
                diesel: phase.of(&diesel),
            })
            .collect();
        Self {
            annual_savings,
            manufacturing_difference,
            payback: Payback::new(manufacturing_difference, annual_savings),
            lifetime_savings: annual_savings * f64::from(electric.lifetime_years),
            relative_reduction,
            phases,
            electric,
            diesel,
        }
    }

    /// Lifecycle total savings, manufacturing included.
    pub fn lifecycle_savings(&self) -> Kilograms {
        self.diesel.total_lifecycle - self.electric.total_lifecycle
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_payback() {
        let payback = Payback::new(Kilograms::from(1450.0), Kilograms::from(1000.0));
        assert_eq!(payback.years(), Some(1.45));
        assert_eq!(Payback::new(Kilograms::from(1450.0), Kilograms::ZERO), Payback::Never);
        assert_eq!(Payback::new(Kilograms::from(1450.0), Kilograms::from(-10.0)), Payback::Never);
        let cheaper_to_build = Payback::new(Kilograms::from(-500.0), Kilograms::from(100.0));
        assert_eq!(cheaper_to_build, Payback::Years(0.0));
    }

    #[test]
    fn test_payback_display() {
        assert_eq!(Payback::Years(1.234).to_string(), "1.2 years");
        assert_eq!(Payback::Never.to_string(), "never");
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Operation.label(15), "Operation (15 years)");
        assert_eq!(Phase::Total.label(15), "Total lifecycle");
    }

    #[test]
    fn test_request_shares_usage() {
        let request = ComparisonRequest::builder()
            .annual_distance(Kilometres::from(20_000.0))
            .energy_consumption(EnergyConsumption::KilowattHoursPer100Km(18.0))
            .fuel_economy(FuelEconomy::LitresPer100Km(5.5))
            .grid("Bayern (Wasser/Atom)")
            .lifetime_years(12)
            .turbocharged(true)
            .build();
        let (electric, diesel) = (request.electric(), request.diesel());
        assert_eq!(electric.annual_distance, diesel.annual_distance);
        assert_eq!(electric.lifetime_years, 12);
        assert_eq!(diesel.lifetime_years, 12);
        assert!(diesel.turbocharged);
        assert_relative_eq!(electric.consumption_multiplier(), 1.0);
    }
}
