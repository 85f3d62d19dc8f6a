use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    core::{grid::ResolvedGrid, manufacturing::ManufacturingPhases, pollutants::Pollutants},
    quantity::{Kilograms, KilowattHours, Litres},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleKind {
    Electric,
    Diesel,
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electric => write!(f, "Electric"),
            Self::Diesel => write!(f, "Diesel"),
        }
    }
}

/// What the vehicle consumes in a year.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnnualConsumption {
    Diesel {
        #[serde(rename = "litres")]
        fuel: Litres,
    },

    Electric {
        /// Energy drawn from the grid, charging losses included.
        #[serde(rename = "kwh")]
        energy: KilowattHours,

        grid: ResolvedGrid,
    },
}

/// Annual and lifetime emissions of a single vehicle.
///
/// «Annual» figures cover operation only, manufacturing is accounted once per lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub vehicle: VehicleKind,
    pub lifetime_years: u32,
    pub consumption: AnnualConsumption,

    /// Tailpipe for diesel, grid draw including transmission losses for electric.
    #[serde(rename = "annual_direct_kg")]
    pub annual_direct: Kilograms,

    /// Fuel cycle for diesel, grid infrastructure for electric.
    #[serde(rename = "annual_upstream_kg")]
    pub annual_upstream: Kilograms,

    #[serde(rename = "annual_total_kg")]
    pub annual_total: Kilograms,

    #[serde(rename = "lifetime_operation_kg")]
    pub lifetime_operation: Kilograms,

    pub manufacturing_phases: ManufacturingPhases,

    #[serde(rename = "manufacturing_kg")]
    pub manufacturing: Kilograms,

    #[serde(rename = "total_lifecycle_kg")]
    pub total_lifecycle: Kilograms,

    /// Annual pollutant masses.
    pub pollutants: Pollutants,
}

impl EmissionResult {
    /// Assemble the lifetime figures from the annual ones.
    pub(crate) fn new(
        vehicle: VehicleKind,
        lifetime_years: u32,
        consumption: AnnualConsumption,
        (annual_direct, annual_upstream): (Kilograms, Kilograms),
        manufacturing_phases: ManufacturingPhases,
        pollutants: Pollutants,
    ) -> Self {
        let annual_total = annual_direct + annual_upstream;
        let lifetime_operation = annual_total * f64::from(lifetime_years);
        let manufacturing = manufacturing_phases.total();
        Self {
            vehicle,
            lifetime_years,
            consumption,
            annual_direct,
            annual_upstream,
            annual_total,
            lifetime_operation,
            manufacturing_phases,
            manufacturing,
            total_lifecycle: lifetime_operation + manufacturing,
            pollutants,
        }
    }

    pub fn lifetime_direct(&self) -> Kilograms {
        self.annual_direct * f64::from(self.lifetime_years)
    }

    pub fn lifetime_upstream(&self) -> Kilograms {
        self.annual_upstream * f64::from(self.lifetime_years)
    }

    pub const fn fuel(&self) -> Option<Litres> {
        match self.consumption {
            AnnualConsumption::Diesel { fuel } => Some(fuel),
            AnnualConsumption::Electric { .. } => None,
        }
    }

    pub const fn energy(&self) -> Option<KilowattHours> {
        match self.consumption {
            AnnualConsumption::Electric { energy, .. } => Some(energy),
            AnnualConsumption::Diesel { .. } => None,
        }
    }

    pub const fn grid(&self) -> Option<ResolvedGrid> {
        match self.consumption {
            AnnualConsumption::Electric { grid, .. } => Some(grid),
            AnnualConsumption::Diesel { .. } => None,
        }
    }
}
