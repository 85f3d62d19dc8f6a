use std::{fs, path::PathBuf};

use clap::Parser;
use ev_footprint::core::{EmissionCalculator, ReferenceTables};
use uuid::Uuid;

use crate::{history::History, prelude::*};

#[derive(Parser)]
pub struct ContextArgs {
    /// TOML file overriding the built-in reference tables.
    #[clap(long = "tables", env = "EMISSION_TABLES")]
    pub tables_path: Option<PathBuf>,

    /// JSON file with the saved calculations.
    #[clap(long = "history", env = "HISTORY_PATH", default_value = "history.json")]
    pub history_path: PathBuf,

    /// Session to save the calculations under and to filter the history by.
    #[clap(long, env = "SESSION_ID")]
    pub session: Option<Uuid>,
}

impl ContextArgs {
    #[instrument(skip_all, name = "Loading reference tables…")]
    pub fn calculator(&self) -> Result<EmissionCalculator> {
        let Some(path) = &self.tables_path else {
            return Ok(EmissionCalculator::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let tables = ReferenceTables::from_toml(&text)
            .with_context(|| format!("failed to load `{}`", path.display()))?;
        info!(path = %path.display(), "loaded");
        Ok(EmissionCalculator::new(tables))
    }

    pub fn history(&self) -> History {
        History::new(&self.history_path)
    }

    /// The requested session, or a fresh one.
    pub fn session(&self) -> Uuid {
        self.session.unwrap_or_else(|| {
            let session = Uuid::new_v4();
            info!(%session, "starting a new session");
            session
        })
    }
}
