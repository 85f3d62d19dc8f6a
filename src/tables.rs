use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use ev_footprint::{
    core::{
        CostComparison,
        AnnualConsumption,
        EmissionResult,
        GridTable,
        ImpactScore,
        LifecycleComparison,
        Payback,
        Projection,
        Rating,
        VehicleModel,
    },
    quantity::Kilograms,
};
use ordered_float::OrderedFloat;

use crate::{
    fmt::{FormattedMass, FormattedPercentage},
    history::{CalculationRecord, PopularModel, Summary},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

/// Green when the value is a saving, red otherwise.
fn saving(content: impl ToString, is_saving: bool) -> Cell {
    right(content).fg(if is_saving { Color::Green } else { Color::Red })
}

const fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Excellent => Color::Green,
        Rating::Good => Color::DarkYellow,
        Rating::Poor => Color::Red,
    }
}

pub fn build_result_table(result: &EmissionResult, score: &ImpactScore) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Annual", "Lifetime"]);
    let consumption = match result.consumption {
        AnnualConsumption::Diesel { fuel } => {
            format!("{fuel} ({:.1} US gal)", fuel.as_us_gallons())
        }
        AnnualConsumption::Electric { energy, grid } => format!("{energy} at {}", grid.intensity),
    };
    table.add_row(vec![
        Cell::new("Consumption").add_attribute(Attribute::Dim),
        right(consumption).add_attribute(Attribute::Dim),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Direct"),
        right(result.annual_direct),
        right(FormattedMass(result.lifetime_direct())),
    ]);
    table.add_row(vec![
        Cell::new("Upstream"),
        right(result.annual_upstream),
        right(FormattedMass(result.lifetime_upstream())),
    ]);
    table.add_row(vec![
        Cell::new("Operation").add_attribute(Attribute::Bold),
        right(result.annual_total).add_attribute(Attribute::Bold),
        right(FormattedMass(result.lifetime_operation)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Manufacturing"),
        Cell::new(""),
        right(FormattedMass(result.manufacturing)),
    ]);
    table.add_row(vec![
        Cell::new("Total lifecycle").add_attribute(Attribute::Bold),
        Cell::new(""),
        right(FormattedMass(result.total_lifecycle)).add_attribute(Attribute::Bold),
    ]);
    for (name, mass) in [
        ("NOx", result.pollutants.nox),
        ("PM2.5", result.pollutants.pm25),
        ("SO2", result.pollutants.so2),
    ] {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Dim),
            right(format!("{:.3} kg", mass.0)).add_attribute(Attribute::Dim),
            right(format!("{:.2} kg", (mass * f64::from(result.lifetime_years)).0))
                .add_attribute(Attribute::Dim),
        ]);
    }
    let rating = score.rating();
    table.add_row(vec![
        Cell::new("Impact score"),
        right(format!("{:.1}", score.value)).fg(rating_color(rating)),
        Cell::new(rating).fg(rating_color(rating)),
    ]);
    table
}

pub fn build_phase_table(comparison: &LifecycleComparison) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Phase", "Electric", "Diesel", "Difference"]);
    for row in &comparison.phases {
        let difference = row.diesel - row.electric;
        table.add_row(vec![
            Cell::new(row.phase.label(comparison.electric.lifetime_years)),
            right(FormattedMass(row.electric)),
            right(FormattedMass(row.diesel)),
            saving(FormattedMass(difference), difference >= Kilograms::ZERO),
        ]);
    }
    table
}

pub fn build_comparison_summary_table(comparison: &LifecycleComparison) -> Table {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Annual savings"),
        saving(comparison.annual_savings, comparison.annual_savings > Kilograms::ZERO),
    ]);
    table.add_row(vec![
        Cell::new("Relative reduction"),
        saving(
            format!("{:+}", FormattedPercentage(comparison.relative_reduction)),
            comparison.relative_reduction > 0.0,
        ),
    ]);
    table.add_row(vec![
        Cell::new("Manufacturing difference"),
        right(FormattedMass(comparison.manufacturing_difference)),
    ]);
    table.add_row(vec![
        Cell::new("Carbon payback"),
        saving(comparison.payback, matches!(comparison.payback, Payback::Years(_))),
    ]);
    table.add_row(vec![
        Cell::new(format!("Savings over {} years", comparison.electric.lifetime_years)),
        saving(
            FormattedMass(comparison.lifetime_savings),
            comparison.lifetime_savings > Kilograms::ZERO,
        ),
    ]);
    let lifecycle_savings = comparison.lifecycle_savings();
    table.add_row(vec![
        Cell::new("Lifecycle savings"),
        saving(FormattedMass(lifecycle_savings), lifecycle_savings > Kilograms::ZERO),
    ]);
    table
}

pub fn build_cost_table(costs: &CostComparison) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Annual cost", "Electric", "Diesel"]);
    table.add_row(vec![
        Cell::new("Energy"),
        right(costs.electric_energy),
        right(costs.diesel_fuel),
    ]);
    table.add_row(vec![
        Cell::new("Maintenance"),
        right(costs.electric_maintenance),
        right(costs.diesel_maintenance),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        right(costs.electric_total()).add_attribute(Attribute::Bold),
        right(costs.diesel_total()).add_attribute(Attribute::Bold),
    ]);
    let savings = costs.annual_savings();
    table.add_row(vec![
        Cell::new("Savings"),
        saving(savings, savings.0 > 0.0),
        Cell::new(""),
    ]);
    table
}

pub fn build_projection_table(projection: &Projection) -> Table {
    let cleanest = projection
        .totals()
        .min_by_key(|(_, total)| OrderedFloat(total.0))
        .map(|(region, _)| region);

    let mut table = new_table();
    table.set_header(vec!["Region", "First year", "Final year", "Lifetime"]);
    for (region, total) in projection.totals() {
        let series = &projection.regions[&region];
        let region_cell = if Some(region) == cleanest {
            Cell::new(region).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(region)
        };
        table.add_row(vec![
            region_cell,
            right(series.first().copied().unwrap_or_default()),
            right(series.last().copied().unwrap_or_default()).add_attribute(Attribute::Dim),
            right(FormattedMass(total)),
        ]);
    }
    table
}

pub fn build_regions_table(grid: &GridTable) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Region", "Intensity", "Renewable", "Coal", "Gas", "Nuclear"]);
    for profile in grid.profiles() {
        let region = if profile.region == grid.default_region() {
            Cell::new(format!("{} (default)", profile.region)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(profile.region)
        };
        table.add_row(vec![
            region,
            right(profile.intensity),
            right(format!("{:.0}%", profile.renewable_percent)).fg(Color::Green),
            right(format!("{:.0}%", profile.coal_percent)).fg(Color::Red),
            right(format!("{:.0}%", profile.gas_percent)).fg(Color::DarkYellow),
            right(format!("{:.0}%", profile.nuclear_percent)),
        ]);
    }
    table
}

pub fn build_history_table(records: &[CalculationRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Date", "Time", "Vehicle", "Label", "Distance", "Efficiency", "Grid", "Annual", "Lifecycle",
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.created_at.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(record.created_at.format("%H:%M")),
            Cell::new(record.vehicle),
            Cell::new(record.label.as_deref().unwrap_or("")),
            right(record.annual_distance),
            Cell::new(record.efficiency),
            Cell::new(record.grid_region.as_deref().unwrap_or("")).add_attribute(Attribute::Dim),
            right(record.annual_total),
            right(FormattedMass(record.total_lifecycle)),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Vehicle", "Count", "Mean annual", "Mean lifetime operation"]);
    for (name, kind) in [("Electric", summary.electric), ("Diesel", summary.diesel)] {
        if let Some(kind) = kind {
            table.add_row(vec![
                Cell::new(name),
                right(kind.count),
                right(kind.mean_annual_total),
                right(FormattedMass(kind.mean_lifetime_operation)),
            ]);
        }
    }
    if let Some((annual, lifetime)) = summary.mean_reductions() {
        table.add_row(vec![
            Cell::new("Reduction").add_attribute(Attribute::Bold),
            Cell::new(""),
            saving(annual, annual > Kilograms::ZERO),
            saving(FormattedMass(lifetime), lifetime > Kilograms::ZERO),
        ]);
    }
    table
}

pub fn build_popular_models_table(models: &[PopularModel]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Vehicle", "Model", "Count", "Mean annual", "Mean lifetime operation"]);
    for model in models {
        table.add_row(vec![
            Cell::new(model.vehicle).add_attribute(Attribute::Dim),
            Cell::new(&model.label).add_attribute(Attribute::Bold),
            right(model.summary.count),
            right(model.summary.mean_annual_total),
            right(FormattedMass(model.summary.mean_lifetime_operation)),
        ]);
    }
    table
}

pub fn build_models_table<'a>(models: impl IntoIterator<Item = &'a VehicleModel>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Vehicle", "Type", "Efficiency", "Range", "CO2", "Price"]);
    for model in models {
        table.add_row(vec![
            Cell::new(&model.id).add_attribute(Attribute::Dim),
            Cell::new(model.label()).add_attribute(Attribute::Bold),
            Cell::new(model.kind()),
            right(model.efficiency),
            right(model.range.map_or_else(String::new, |range| range.to_string())),
            right(
                model
                    .emissions_g_per_km
                    .map_or_else(String::new, |emissions| format!("{emissions:.0} g/km")),
            ),
            right(format!("{:.0} €", model.price.0)),
        ]);
    }
    table
}
