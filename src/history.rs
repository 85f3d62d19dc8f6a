use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use ev_footprint::{
    core::{Efficiency, EmissionResult, VehicleKind},
    quantity::{Kilograms, Kilometres},
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prelude::*;

/// Snapshot of a single calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub session: Uuid,
    pub vehicle: VehicleKind,

    /// Free-form brand and model.
    pub label: Option<String>,

    pub annual_distance: Kilometres,
    pub efficiency: Efficiency,
    pub grid_region: Option<String>,

    #[serde(rename = "annual_total_kg")]
    pub annual_total: Kilograms,

    #[serde(rename = "lifetime_operation_kg")]
    pub lifetime_operation: Kilograms,

    #[serde(rename = "manufacturing_kg")]
    pub manufacturing: Kilograms,

    #[serde(rename = "total_lifecycle_kg")]
    pub total_lifecycle: Kilograms,

    pub result: EmissionResult,
    pub created_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Decimal places of the persisted totals.
    const TOTAL_DECIMALS: i32 = 2;

    pub fn new(
        session: Uuid,
        label: Option<String>,
        annual_distance: Kilometres,
        efficiency: Efficiency,
        result: EmissionResult,
    ) -> Self {
        let grid_region = result.grid().map(|grid| {
            grid.region.map_or_else(|| grid.intensity.to_string(), |region| region.to_string())
        });
        Self {
            session,
            vehicle: result.vehicle,
            label,
            annual_distance,
            efficiency,
            grid_region,
            annual_total: result.annual_total.round_to(Self::TOTAL_DECIMALS),
            lifetime_operation: result.lifetime_operation.round_to(Self::TOTAL_DECIMALS),
            manufacturing: result.manufacturing.round_to(Self::TOTAL_DECIMALS),
            total_lifecycle: result.total_lifecycle.round_to(Self::TOTAL_DECIMALS),
            result,
            created_at: Utc::now(),
        }
    }
}

/// JSON file holding every saved calculation.
pub struct History {
    path: PathBuf,
}

impl History {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All records in insertion order, a missing file reads as empty history.
    #[instrument(skip_all, fields(path = %self.path.display()), name = "Reading history…")]
    pub fn read(&self) -> Result<Vec<CalculationRecord>> {
        if self.path.is_file() {
            let text = fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read `{}`", self.path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse `{}`", self.path.display()))
        } else {
            Ok(Vec::new())
        }
    }

    #[instrument(
        skip_all,
        fields(path = %self.path.display(), n_records = records.len()),
        name = "Writing history…",
    )]
    fn write(&self, records: &[CalculationRecord]) -> Result {
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write `{}`", self.path.display()))
    }

    pub fn append(&self, record: CalculationRecord) -> Result {
        let mut records = self.read()?;
        records.push(record);
        self.write(&records)?;
        info!(n_records = records.len(), "saved");
        Ok(())
    }

    /// Newest records first, optionally only those of the session.
    pub fn list(&self, session: Option<Uuid>, limit: usize) -> Result<Vec<CalculationRecord>> {
        Ok(self
            .read()?
            .into_iter()
            .filter(|record| session.is_none_or(|session| record.session == session))
            .sorted_by(|lhs, rhs| rhs.created_at.cmp(&lhs.created_at))
            .take(limit)
            .collect())
    }

    /// Remove the session's records, or every record without a session.
    ///
    /// # Returns
    ///
    /// Number of removed records.
    pub fn clear(&self, session: Option<Uuid>) -> Result<usize> {
        let records = self.read()?;
        let n_records = records.len();
        let kept: Vec<_> = records
            .into_iter()
            .filter(|record| session.is_some_and(|session| record.session != session))
            .collect();
        let n_removed = n_records - kept.len();
        if n_removed != 0 {
            self.write(&kept)?;
        }
        Ok(n_removed)
    }
}

/// Mean figures over the records of one vehicle kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KindSummary {
    pub count: usize,
    pub mean_annual_total: Kilograms,
    pub mean_lifetime_operation: Kilograms,
}

impl KindSummary {
    fn of<'a>(records: impl IntoIterator<Item = &'a CalculationRecord>) -> Option<Self> {
        let (count, annual, lifetime) = records.into_iter().fold(
            (0_usize, Kilograms::ZERO, Kilograms::ZERO),
            |(count, annual, lifetime), record| {
                (count + 1, annual + record.annual_total, lifetime + record.lifetime_operation)
            },
        );
        #[expect(clippy::cast_precision_loss)]
        let n = count as f64;
        (count != 0).then(|| Self {
            count,
            mean_annual_total: annual / n,
            mean_lifetime_operation: lifetime / n,
        })
    }
}

/// Labelled vehicle calculated the most often.
#[derive(Clone, Debug, PartialEq)]
pub struct PopularModel {
    pub vehicle: VehicleKind,
    pub label: String,
    pub summary: KindSummary,
}

impl PopularModel {
    /// Most frequent labels first, ties broken by the label.
    fn of<'a>(
        vehicle: VehicleKind,
        records: impl IntoIterator<Item = &'a CalculationRecord>,
        limit: usize,
    ) -> Vec<Self> {
        records
            .into_iter()
            .filter_map(|record| Some((record.label.as_deref()?, record)))
            .into_group_map()
            .into_iter()
            .filter_map(|(label, records)| {
                Some(Self { vehicle, label: label.to_owned(), summary: KindSummary::of(records)? })
            })
            .sorted_by(|lhs, rhs| {
                rhs.summary.count.cmp(&lhs.summary.count).then_with(|| lhs.label.cmp(&rhs.label))
            })
            .take(limit)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub electric: Option<KindSummary>,
    pub diesel: Option<KindSummary>,

    /// Electric models first, then diesel ones.
    pub popular_models: Vec<PopularModel>,
}

impl Summary {
    pub const POPULAR_MODELS_PER_KIND: usize = 3;

    pub fn new(records: &[CalculationRecord]) -> Self {
        let of_kind =
            |kind: VehicleKind| records.iter().filter(move |record| record.vehicle == kind);
        let popular_models = [VehicleKind::Electric, VehicleKind::Diesel]
            .into_iter()
            .flat_map(|kind| PopularModel::of(kind, of_kind(kind), Self::POPULAR_MODELS_PER_KIND))
            .collect();
        Self {
            count: records.len(),
            electric: KindSummary::of(of_kind(VehicleKind::Electric)),
            diesel: KindSummary::of(of_kind(VehicleKind::Diesel)),
            popular_models,
        }
    }

    /// Mean diesel minus mean electric annual and lifetime operation totals.
    pub fn mean_reductions(&self) -> Option<(Kilograms, Kilograms)> {
        let (electric, diesel) = (self.electric?, self.diesel?);
        Some((
            diesel.mean_annual_total - electric.mean_annual_total,
            diesel.mean_lifetime_operation - electric.mean_lifetime_operation,
        ))
    }
}
