use clap::Parser;
use ev_footprint::{
    core::{DieselVehicle, Efficiency, EmissionStandard, FuelPathway, ImpactScore, VehicleKind},
    quantity::Litres,
};

use crate::{
    cli::{
        ContextArgs,
        usage::{FuelEconomyArgs, SaveArgs, UsageArgs, find_model},
    },
    history::CalculationRecord,
    prelude::*,
    tables::build_result_table,
};

#[derive(Parser)]
pub struct DieselArgs {
    #[clap(flatten)]
    usage: UsageArgs,

    #[clap(flatten)]
    fuel_economy: FuelEconomyArgs,

    /// Catalog model to take the fuel economy and the label from, see `models`.
    #[clap(long = "model", group = "fuel_economy")]
    model: Option<String>,

    #[clap(flatten)]
    modifiers: DieselModifierArgs,

    #[clap(flatten)]
    save: SaveArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct DieselModifierArgs {
    #[clap(long = "fuel-pathway", value_enum, default_value = "regular", env = "FUEL_PATHWAY")]
    pub fuel_pathway: FuelPathway,

    /// Engine displacement in litres.
    #[clap(long = "engine-size", env = "ENGINE_SIZE")]
    pub engine_size: Option<f64>,

    #[clap(long = "emission-standard", value_enum, env = "EMISSION_STANDARD")]
    pub emission_standard: Option<EmissionStandard>,

    #[clap(long)]
    pub turbocharged: bool,
}

impl DieselModifierArgs {
    pub fn engine_size(&self) -> Option<Litres> {
        self.engine_size.map(Litres::from)
    }
}

impl DieselArgs {
    pub fn run(self, context: &ContextArgs) -> Result {
        let calculator = context.calculator()?;
        let model =
            find_model(&calculator.tables().models, self.model.as_deref(), VehicleKind::Diesel)?;
        let fuel_economy = self.fuel_economy.economy(model)?;
        let vehicle = DieselVehicle::builder()
            .annual_distance(self.usage.annual_distance())
            .fuel_economy(fuel_economy)
            .lifetime_years(self.usage.lifetime_years)
            .fuel_pathway(self.modifiers.fuel_pathway)
            .maybe_engine_size(self.modifiers.engine_size())
            .maybe_emission_standard(self.modifiers.emission_standard)
            .turbocharged(self.modifiers.turbocharged)
            .build();
        let result = calculator.diesel(&vehicle)?;
        println!("{}", build_result_table(&result, &ImpactScore::from(&result)));

        if self.save.save {
            context.history().append(CalculationRecord::new(
                context.session(),
                self.save.label_or_model(model),
                vehicle.annual_distance,
                Efficiency::Fuel(fuel_economy),
                result,
            ))?;
        }
        Ok(())
    }
}
