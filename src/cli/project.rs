use clap::{Parser, ValueEnum};
use ev_footprint::core::{DecarbonizationPath, VehicleKind};

use crate::{
    cli::{
        ContextArgs,
        usage::{EnergyConsumptionArgs, UsageArgs, find_model},
    },
    prelude::*,
    tables::build_projection_table,
};

#[derive(Copy, Clone, ValueEnum)]
pub enum PathKind {
    Linear,
    Exponential,
}

#[derive(Parser)]
pub struct ProjectArgs {
    #[clap(flatten)]
    usage: UsageArgs,

    #[clap(flatten)]
    energy_consumption: EnergyConsumptionArgs,

    /// Catalog model to take the energy consumption from.
    #[clap(long = "model", group = "energy_consumption")]
    model: Option<String>,

    #[clap(long = "path", value_enum, default_value = "linear", env = "DECARBONIZATION_PATH")]
    path: PathKind,

    /// Fraction of today's intensity left in the final year of a linear path.
    #[clap(long = "final-fraction", default_value = "0.4", env = "DECARBONIZATION_FINAL_FRACTION")]
    final_fraction: f64,

    /// Relative intensity decline per year of an exponential path.
    #[clap(long = "annual-decline", default_value = "0.03", env = "DECARBONIZATION_ANNUAL_DECLINE")]
    annual_decline: f64,
}

impl ProjectArgs {
    const fn path(&self) -> DecarbonizationPath {
        match self.path {
            PathKind::Linear => DecarbonizationPath::Linear { final_fraction: self.final_fraction },
            PathKind::Exponential => {
                DecarbonizationPath::Exponential { annual_decline: self.annual_decline }
            }
        }
    }

    pub fn run(self, context: &ContextArgs) -> Result {
        let calculator = context.calculator()?;
        let model =
            find_model(&calculator.tables().models, self.model.as_deref(), VehicleKind::Electric)?;
        let projection = calculator.project(
            self.usage.annual_distance(),
            self.energy_consumption.consumption(model)?,
            self.usage.lifetime_years,
            self.path(),
        )?;
        println!("{}", build_projection_table(&projection));
        Ok(())
    }
}
