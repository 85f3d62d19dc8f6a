use clap::Parser;
use ev_footprint::{
    core::{
        ChargingType,
        DrivingPattern,
        Efficiency,
        ElectricVehicle,
        ImpactScore,
        ManufacturingFootprint,
        VehicleKind,
    },
    quantity::KilowattHours,
};

use crate::{
    cli::{
        ContextArgs,
        usage::{EnergyConsumptionArgs, GridArgs, SaveArgs, UsageArgs, find_model},
    },
    history::CalculationRecord,
    prelude::*,
    tables::build_result_table,
};

#[derive(Parser)]
pub struct ElectricArgs {
    #[clap(flatten)]
    usage: UsageArgs,

    #[clap(flatten)]
    energy_consumption: EnergyConsumptionArgs,

    /// Catalog model to take the energy consumption and the label from, see `models`.
    #[clap(long = "model", group = "energy_consumption")]
    model: Option<String>,

    #[clap(flatten)]
    grid: GridArgs,

    #[clap(flatten)]
    modifiers: ElectricModifierArgs,

    #[clap(flatten)]
    save: SaveArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct ElectricModifierArgs {
    #[clap(long = "driving-pattern", value_enum, default_value = "mixed", env = "DRIVING_PATTERN")]
    pub driving_pattern: DrivingPattern,

    /// Account for charging losses of the given charger.
    #[clap(long = "charging", value_enum, env = "CHARGING")]
    pub charging: Option<ChargingType>,

    #[clap(long = "cold-weather")]
    pub cold_weather: bool,

    /// Scale the manufacturing footprint with the battery capacity in kilowatt-hours.
    #[clap(long = "battery-capacity", env = "BATTERY_CAPACITY")]
    pub battery_capacity: Option<f64>,
}

impl ElectricModifierArgs {
    pub fn manufacturing(&self) -> ManufacturingFootprint {
        self.battery_capacity.map_or(ManufacturingFootprint::Fixed, |capacity| {
            ManufacturingFootprint::BatteryScaled(KilowattHours::from(capacity))
        })
    }
}

impl ElectricArgs {
    pub fn run(self, context: &ContextArgs) -> Result {
        let calculator = context.calculator()?;
        let model =
            find_model(&calculator.tables().models, self.model.as_deref(), VehicleKind::Electric)?;
        let energy_consumption = self.energy_consumption.consumption(model)?;
        let vehicle = ElectricVehicle::builder()
            .annual_distance(self.usage.annual_distance())
            .energy_consumption(energy_consumption)
            .grid(self.grid.source_or_default(calculator.tables()))
            .lifetime_years(self.usage.lifetime_years)
            .driving_pattern(self.modifiers.driving_pattern)
            .maybe_charging(self.modifiers.charging)
            .cold_weather(self.modifiers.cold_weather)
            .manufacturing(self.modifiers.manufacturing())
            .build();
        let result = calculator.electric(&vehicle)?;
        println!("{}", build_result_table(&result, &ImpactScore::from(&result)));

        if self.save.save {
            context.history().append(CalculationRecord::new(
                context.session(),
                self.save.label_or_model(model),
                vehicle.annual_distance,
                Efficiency::Energy(energy_consumption),
                result,
            ))?;
        }
        Ok(())
    }
}
