use clap::{Parser, Subcommand};

use crate::{
    cli::ContextArgs,
    history::{History, Summary},
    prelude::*,
    tables::{build_history_table, build_popular_models_table, build_summary_table},
};

#[derive(Parser)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Show the saved calculations, newest first.
    List {
        #[clap(long, default_value_t = History::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Show the mean figures per vehicle kind and the most calculated models.
    Summary,

    /// Remove the session's calculations, or all of them without `--session`.
    Clear,
}

impl HistoryArgs {
    pub fn run(self, context: &ContextArgs) -> Result {
        let history = context.history();
        match self.command {
            HistoryCommand::List { limit } => {
                let records = history.list(context.session, limit)?;
                info!(n_records = records.len(), "fetched");
                println!("{}", build_history_table(&records));
            }
            HistoryCommand::Summary => {
                let records = history.list(context.session, usize::MAX)?;
                let summary = Summary::new(&records);
                info!(n_records = summary.count, "summarized");
                println!("{}", build_summary_table(&summary));
                if !summary.popular_models.is_empty() {
                    println!("{}", build_popular_models_table(&summary.popular_models));
                }
            }
            HistoryCommand::Clear => {
                let n_removed = history.clear(context.session)?;
                info!(n_removed, "cleared");
            }
        }
        Ok(())
    }
}
