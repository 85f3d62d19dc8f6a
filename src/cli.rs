mod compare;
mod context;
mod diesel;
mod electric;
mod history;
mod project;
mod usage;

use clap::{Parser, Subcommand};
use ev_footprint::core::VehicleKind;

pub use self::context::ContextArgs;
use crate::{
    cli::{
        compare::CompareArgs,
        diesel::DieselArgs,
        electric::ElectricArgs,
        history::HistoryArgs,
        project::ProjectArgs,
    },
    prelude::*,
    tables::{build_models_table, build_regions_table},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub context: ContextArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Lifecycle emissions of a diesel vehicle.
    #[clap(name = "diesel")]
    Diesel(Box<DieselArgs>),

    /// Lifecycle emissions of an electric vehicle.
    #[clap(name = "electric")]
    Electric(Box<ElectricArgs>),

    /// Compare an electric and a diesel vehicle driven the same way.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),

    /// Project electric vehicle emissions onto decarbonizing grids.
    #[clap(name = "project")]
    Project(Box<ProjectArgs>),

    /// List the grid regions.
    #[clap(name = "regions")]
    Regions,

    /// List the vehicle models available through `--model`.
    #[clap(name = "models")]
    Models {
        #[clap(long, value_enum)]
        kind: Option<VehicleKind>,
    },

    /// Print the reference tables as TOML, a starting point for `--tables`.
    #[clap(name = "tables")]
    Tables,

    /// Saved calculations.
    #[clap(name = "history")]
    History(HistoryArgs),
}

impl Command {
    pub fn run(self, context: &ContextArgs) -> Result {
        match self {
            Self::Diesel(args) => args.run(context),
            Self::Electric(args) => args.run(context),
            Self::Compare(args) => args.run(context),
            Self::Project(args) => args.run(context),
            Self::Regions => {
                println!("{}", build_regions_table(&context.calculator()?.tables().grid));
                Ok(())
            }
            Self::Models { kind } => {
                let calculator = context.calculator()?;
                let models = calculator.tables().models.iter();
                let models = models.filter(|model| kind.is_none_or(|kind| model.kind() == kind));
                println!("{}", build_models_table(models));
                Ok(())
            }
            Self::Tables => {
                print!("{}", context.calculator()?.tables().to_toml()?);
                Ok(())
            }
            Self::History(args) => args.run(context),
        }
    }
}
