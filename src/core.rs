pub mod calculator;
pub mod catalog;
pub mod comparison;
pub mod cost;
pub mod diesel;
pub mod efficiency;
pub mod electric;
pub mod grid;
pub mod manufacturing;
pub mod pollutants;
pub mod projection;
pub mod reference;
pub mod result;
pub mod score;

pub use self::{
    calculator::EmissionCalculator,
    catalog::{VehicleCatalog, VehicleModel},
    comparison::{ComparisonRequest, LifecycleComparison, Payback, Phase},
    cost::CostComparison,
    diesel::{DieselVehicle, EmissionStandard, FuelPathway},
    efficiency::{Efficiency, EnergyConsumption, FuelEconomy},
    electric::{ChargingType, DrivingPattern, ElectricVehicle},
    grid::{GridProfile, GridRegion, GridSource, GridTable, ResolvedGrid},
    manufacturing::{ManufacturingFootprint, ManufacturingPhases},
    pollutants::{PollutantRatios, Pollutants},
    projection::{DecarbonizationPath, Projection},
    reference::ReferenceTables,
    result::{AnnualConsumption, EmissionResult, VehicleKind},
    score::{ImpactScore, Rating},
};
