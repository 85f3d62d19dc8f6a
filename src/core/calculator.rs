use tracing::{debug, instrument};

use crate::{
    core::{
        comparison::{ComparisonRequest, LifecycleComparison},
        diesel::DieselVehicle,
        efficiency::EnergyConsumption,
        electric::ElectricVehicle,
        projection::{DecarbonizationPath, Projection},
        reference::ReferenceTables,
        result::EmissionResult,
    },
    error::Result,
    quantity::Kilometres,
};

/// Lifecycle emission calculator over fixed reference tables.
///
/// Every operation is a pure function of its arguments and the tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmissionCalculator {
    tables: ReferenceTables,
}

impl EmissionCalculator {
    pub const fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub const fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    #[instrument(
        skip_all,
        name = "Calculating diesel emissions…",
        fields(annual_distance = %vehicle.annual_distance, fuel_economy = %vehicle.fuel_economy),
    )]
    pub fn diesel(&self, vehicle: &DieselVehicle) -> Result<EmissionResult> {
        let result = vehicle.emissions(&self.tables.diesel)?;
        debug!(
            annual_total = %result.annual_total,
            total_lifecycle = %result.total_lifecycle,
            "calculated",
        );
        Ok(result)
    }

    #[instrument(
        skip_all,
        name = "Calculating electric emissions…",
        fields(
            annual_distance = %vehicle.annual_distance,
            consumption = %vehicle.energy_consumption,
        ),
    )]
    pub fn electric(&self, vehicle: &ElectricVehicle) -> Result<EmissionResult> {
        let result = vehicle.emissions(&self.tables.electric, &self.tables.grid)?;
        debug!(
            annual_total = %result.annual_total,
            total_lifecycle = %result.total_lifecycle,
            "calculated",
        );
        Ok(result)
    }

    #[instrument(
        skip_all,
        name = "Comparing lifecycles…",
        fields(years = request.lifetime_years),
    )]
    pub fn compare(&self, request: &ComparisonRequest) -> Result<LifecycleComparison> {
        let electric = self.electric(&request.electric())?;
        let diesel = self.diesel(&request.diesel())?;
        let comparison = LifecycleComparison::new(electric, diesel);
        debug!(
            annual_savings = %comparison.annual_savings,
            payback = %comparison.payback,
            "compared",
        );
        Ok(comparison)
    }

    /// Project the annual operational emissions of an electric vehicle onto every grid region.
    #[instrument(skip_all, name = "Projecting grid decarbonization…", fields(years = years))]
    pub fn project(
        &self,
        annual_distance: Kilometres,
        energy_consumption: EnergyConsumption,
        years: u32,
        path: DecarbonizationPath,
    ) -> Result<Projection> {
        let annual_energy = energy_consumption.energy_for(annual_distance)?;
        let projection = Projection::new(&self.tables.grid, annual_energy, years, path)?;
        debug!(%path, n_regions = projection.regions.len(), "projected");
        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{
        comparison::Payback,
        efficiency::FuelEconomy,
        grid::{GridRegion, GridSource},
        score::ImpactScore,
    };

    fn electric(miles: f64, years: u32) -> ElectricVehicle {
        ElectricVehicle::builder()
            .annual_distance(Kilometres::from_miles(miles))
            .energy_consumption(EnergyConsumption::KilowattHoursPer100Miles(34.0))
            .grid(GridRegion::Germany2025)
            .lifetime_years(years)
            .build()
    }

    fn diesel(miles: f64, years: u32) -> DieselVehicle {
        DieselVehicle::builder()
            .annual_distance(Kilometres::from_miles(miles))
            .fuel_economy(FuelEconomy::MilesPerGallon(30.0))
            .lifetime_years(years)
            .build()
    }

    fn request(grid: impl Into<GridSource>) -> ComparisonRequest {
        ComparisonRequest::builder()
            .annual_distance(Kilometres::from_miles(12_000.0))
            .energy_consumption(EnergyConsumption::KilowattHoursPer100Miles(34.0))
            .fuel_economy(FuelEconomy::MilesPerGallon(30.0))
            .grid(grid)
            .build()
    }

    #[test]
    fn test_scenario_electric() {
        let result = EmissionCalculator::default().electric(&electric(12_000.0, 15)).unwrap();
        let expected = 12_000.0 / 100.0 * 34.0 * 0.366 * 1.05 + 12_000.0 / 100.0 * 34.0 * 0.02;
        assert_relative_eq!(result.annual_total.0, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_scenario_diesel() {
        let result = EmissionCalculator::default().diesel(&diesel(12_000.0, 15)).unwrap();
        let expected =
            (12_000.0 / 30.0) * 3.785_41 * 2.68 + (12_000.0 / 30.0) * 3.785_41 * 1.35;
        assert_relative_eq!(result.annual_total.0, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_monotonic_in_distance_and_years() {
        let calculator = EmissionCalculator::default();
        let mut previous = (0.0, 0.0);
        for miles in [1_000.0, 5_000.0, 12_000.0, 30_000.0] {
            let electric = calculator.electric(&electric(miles, 15)).unwrap();
            let diesel = calculator.diesel(&diesel(miles, 15)).unwrap();
            assert!(electric.total_lifecycle.0 > previous.0);
            assert!(diesel.total_lifecycle.0 > previous.1);
            previous = (electric.total_lifecycle.0, diesel.total_lifecycle.0);
        }
        let mut previous = (0.0, 0.0);
        for years in [1, 5, 10, 20] {
            let electric = calculator.electric(&electric(12_000.0, years)).unwrap();
            let diesel = calculator.diesel(&diesel(12_000.0, years)).unwrap();
            assert!(electric.lifetime_operation.0 > previous.0);
            assert!(diesel.lifetime_operation.0 > previous.1);
            previous = (electric.lifetime_operation.0, diesel.lifetime_operation.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let calculator = EmissionCalculator::default();
        let vehicle = electric(12_000.0, 15);
        assert_eq!(calculator.electric(&vehicle).unwrap(), calculator.electric(&vehicle).unwrap());
        let request = request(GridRegion::Poland);
        assert_eq!(calculator.compare(&request).unwrap(), calculator.compare(&request).unwrap());
    }

    #[test]
    fn test_compare_pays_back() {
        let comparison =
            EmissionCalculator::default().compare(&request(GridRegion::Germany2025)).unwrap();
        assert!(comparison.annual_savings.0 > 0.0);
        assert_relative_eq!(comparison.manufacturing_difference.0, 1450.0);
        let years = comparison.payback.years().unwrap();
        assert_relative_eq!(years, 1450.0 / comparison.annual_savings.0);
        assert_relative_eq!(comparison.lifetime_savings.0, comparison.annual_savings.0 * 15.0);
        assert_eq!(comparison.phases.len(), 5);
        assert_relative_eq!(
            comparison.phases[4].electric.0,
            comparison.electric.total_lifecycle.0,
        );
    }

    #[test]
    fn test_compare_never_pays_back_on_dirty_grid() {
        let calculator = EmissionCalculator::default();
        for miles in [1_000.0, 12_000.0, 50_000.0] {
            let request = ComparisonRequest {
                annual_distance: Kilometres::from_miles(miles),
                grid: GridSource::Intensity(crate::quantity::Quantity(5.0)),
                ..request(GridRegion::Germany2025)
            };
            let comparison = calculator.compare(&request).unwrap();
            assert!(comparison.annual_savings.0 < 0.0);
            assert_eq!(comparison.payback, Payback::Never);
        }
    }

    #[test]
    fn test_unknown_region_uses_default_intensity() {
        let calculator = EmissionCalculator::default();
        let fallback = calculator.compare(&request("Nonexistent Region")).unwrap();
        let default = calculator.compare(&request(GridRegion::Germany2025)).unwrap();
        assert_relative_eq!(fallback.electric.annual_total.0, default.electric.annual_total.0);
        assert!(fallback.electric.grid().unwrap().fallback);
    }

    #[test]
    fn test_projection_single_year() {
        let calculator = EmissionCalculator::default();
        let projection = calculator
            .project(
                Kilometres::from_miles(12_000.0),
                EnergyConsumption::KilowattHoursPer100Miles(34.0),
                1,
                DecarbonizationPath::default(),
            )
            .unwrap();
        for (region, series) in &projection.regions {
            assert_eq!(series.len(), 1);
            let intensity = calculator.tables().grid.profile(*region).intensity.0;
            assert_relative_eq!(series[0].0, 4080.0 * intensity, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_impact_score_of_result() {
        let result = EmissionCalculator::default().diesel(&diesel(12_000.0, 15)).unwrap();
        let score = ImpactScore::from(&result);
        assert!(score.value > 0.0 && score.value <= 100.0);
    }
}
