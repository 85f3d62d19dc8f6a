use clap::Parser;
use ev_footprint::{
    core::{ComparisonRequest, CostComparison, VehicleKind},
    quantity::{KilowattHourRate, LitreRate},
};

use crate::{
    cli::{
        ContextArgs,
        diesel::DieselModifierArgs,
        electric::ElectricModifierArgs,
        usage::{EnergyConsumptionArgs, FuelEconomyArgs, GridArgs, UsageArgs, find_model},
    },
    prelude::*,
    tables::{build_comparison_summary_table, build_cost_table, build_phase_table},
};

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    usage: UsageArgs,

    #[clap(flatten)]
    energy_consumption: EnergyConsumptionArgs,

    #[clap(flatten)]
    fuel_economy: FuelEconomyArgs,

    /// Electric catalog model to take the energy consumption from.
    #[clap(long = "electric-model", group = "energy_consumption")]
    electric_model: Option<String>,

    /// Diesel catalog model to take the fuel economy from.
    #[clap(long = "diesel-model", group = "fuel_economy")]
    diesel_model: Option<String>,

    #[clap(flatten)]
    grid: GridArgs,

    #[clap(flatten)]
    electric: ElectricModifierArgs,

    #[clap(flatten)]
    diesel: DieselModifierArgs,

    #[clap(flatten)]
    prices: PriceArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct PriceArgs {
    /// Electricity price in euro per kilowatt-hour.
    #[clap(long = "electricity-price", default_value = "0.40", env = "ELECTRICITY_PRICE")]
    pub electricity: KilowattHourRate,

    /// Diesel price in euro per litre.
    #[clap(long = "fuel-price", default_value = "1.75", env = "FUEL_PRICE")]
    pub fuel: LitreRate,
}

impl CompareArgs {
    pub fn run(self, context: &ContextArgs) -> Result {
        let calculator = context.calculator()?;
        let models = &calculator.tables().models;
        let electric_model =
            find_model(models, self.electric_model.as_deref(), VehicleKind::Electric)?;
        let diesel_model = find_model(models, self.diesel_model.as_deref(), VehicleKind::Diesel)?;
        let request = ComparisonRequest::builder()
            .annual_distance(self.usage.annual_distance())
            .energy_consumption(self.energy_consumption.consumption(electric_model)?)
            .fuel_economy(self.fuel_economy.economy(diesel_model)?)
            .grid(self.grid.source_or_default(calculator.tables()))
            .lifetime_years(self.usage.lifetime_years)
            .driving_pattern(self.electric.driving_pattern)
            .maybe_charging(self.electric.charging)
            .cold_weather(self.electric.cold_weather)
            .manufacturing(self.electric.manufacturing())
            .fuel_pathway(self.diesel.fuel_pathway)
            .maybe_engine_size(self.diesel.engine_size())
            .maybe_emission_standard(self.diesel.emission_standard)
            .turbocharged(self.diesel.turbocharged)
            .build();
        let comparison = calculator.compare(&request)?;
        println!("{}", build_phase_table(&comparison));
        println!("{}", build_comparison_summary_table(&comparison));

        let (Some(fuel), Some(energy)) = (comparison.diesel.fuel(), comparison.electric.energy())
        else {
            bail!("the comparison is missing the annual consumption");
        };
        let costs = CostComparison::new(fuel, energy, self.prices.electricity, self.prices.fuel)?;
        println!("{}", build_cost_table(&costs));
        Ok(())
    }
}
