use clap::{Args, Parser, ValueEnum};
use ev_footprint::{
    core::{
        EnergyConsumption,
        FuelEconomy,
        GridSource,
        ReferenceTables,
        VehicleCatalog,
        VehicleKind,
        VehicleModel,
    },
    quantity::{KilogramsPerKilowattHour, Kilometres, Quantity},
};

use crate::prelude::*;

#[derive(Copy, Clone, ValueEnum)]
pub enum DistanceUnit {
    Km,
    Miles,
}

#[derive(Copy, Clone, Parser)]
pub struct UsageArgs {
    /// Distance driven per year.
    #[clap(long = "annual-distance", env = "ANNUAL_DISTANCE")]
    pub annual_distance: f64,

    #[clap(long = "distance-unit", value_enum, default_value = "km", env = "DISTANCE_UNIT")]
    pub distance_unit: DistanceUnit,

    /// Expected service life.
    #[clap(long = "lifetime-years", default_value = "15", env = "LIFETIME_YEARS")]
    pub lifetime_years: u32,
}

impl UsageArgs {
    pub const fn annual_distance(&self) -> Kilometres {
        match self.distance_unit {
            DistanceUnit::Km => Quantity(self.annual_distance),
            DistanceUnit::Miles => Kilometres::from_miles(self.annual_distance),
        }
    }
}

/// Look up a catalog model of the given kind.
pub fn find_model<'a>(
    catalog: &'a VehicleCatalog,
    name: Option<&str>,
    kind: VehicleKind,
) -> Result<Option<&'a VehicleModel>> {
    let Some(name) = name else {
        return Ok(None);
    };
    let model = catalog
        .get(name)
        .with_context(|| format!("unknown vehicle model `{name}`, see `ev-footprint models`"))?;
    ensure!(model.kind() == kind, "`{}` is not a {} vehicle", model.label(), kind);
    info!(model = %model.label(), efficiency = %model.efficiency, "using the catalog model");
    Ok(Some(model))
}

/// Fuel economy as entered, or a diesel catalog model joining the group through its own option.
#[derive(Copy, Clone, Args)]
#[group(id = "fuel_economy", required = true, multiple = false)]
pub struct FuelEconomyArgs {
    /// Diesel fuel economy in miles per US gallon.
    #[clap(long = "mpg", env = "DIESEL_MPG")]
    pub miles_per_gallon: Option<f64>,

    /// Diesel fuel consumption in litres per 100 kilometres.
    #[clap(long = "litres-per-100-km", env = "DIESEL_LITRES_PER_100_KM")]
    pub litres_per_100_km: Option<f64>,
}

impl FuelEconomyArgs {
    pub fn economy(self, model: Option<&VehicleModel>) -> Result<FuelEconomy> {
        match (model.and_then(|model| model.efficiency.fuel_economy()), self) {
            (Some(economy), Self { miles_per_gallon: None, litres_per_100_km: None }) => {
                Ok(economy)
            }
            (None, Self { miles_per_gallon: Some(mpg), litres_per_100_km: None }) => {
                Ok(FuelEconomy::MilesPerGallon(mpg))
            }
            (None, Self { miles_per_gallon: None, litres_per_100_km: Some(litres) }) => {
                Ok(FuelEconomy::LitresPer100Km(litres))
            }
            _ => bail!("specify exactly one of the model, `--mpg` and `--litres-per-100-km`"),
        }
    }
}

/// Energy consumption as entered, or an electric catalog model joining the group.
#[derive(Copy, Clone, Args)]
#[group(id = "energy_consumption", required = true, multiple = false)]
pub struct EnergyConsumptionArgs {
    #[clap(long = "kwh-per-100-miles", env = "EV_KWH_PER_100_MILES")]
    pub per_100_miles: Option<f64>,

    #[clap(long = "kwh-per-100-km", env = "EV_KWH_PER_100_KM")]
    pub per_100_km: Option<f64>,
}

impl EnergyConsumptionArgs {
    pub fn consumption(self, model: Option<&VehicleModel>) -> Result<EnergyConsumption> {
        match (model.and_then(|model| model.efficiency.energy_consumption()), self) {
            (Some(consumption), Self { per_100_miles: None, per_100_km: None }) => Ok(consumption),
            (None, Self { per_100_miles: Some(kwh), per_100_km: None }) => {
                Ok(EnergyConsumption::KilowattHoursPer100Miles(kwh))
            }
            (None, Self { per_100_miles: None, per_100_km: Some(kwh) }) => {
                Ok(EnergyConsumption::KilowattHoursPer100Km(kwh))
            }
            _ => bail!(
                "specify exactly one of the model, `--kwh-per-100-miles` and `--kwh-per-100-km`"
            ),
        }
    }
}

#[derive(Clone, Args)]
#[group(multiple = false)]
pub struct GridArgs {
    /// Grid region name or id, unknown names fall back to the default region.
    #[clap(long = "grid-region", env = "GRID_REGION")]
    pub region: Option<String>,

    /// Explicit grid intensity in kilograms of CO2-equivalent per kilowatt-hour.
    #[clap(long = "grid-intensity", env = "GRID_INTENSITY")]
    pub intensity: Option<f64>,
}

impl GridArgs {
    /// `None` selects the default region of the tables.
    pub fn source(&self) -> Option<GridSource> {
        match (&self.region, self.intensity) {
            (_, Some(intensity)) => {
                Some(GridSource::Intensity(KilogramsPerKilowattHour::from(intensity)))
            }
            (Some(name), None) => Some(GridSource::Named(name.clone())),
            (None, None) => None,
        }
    }

    pub fn source_or_default(&self, tables: &ReferenceTables) -> GridSource {
        self.source().unwrap_or_else(|| GridSource::Region(tables.grid.default_region()))
    }
}

#[derive(Clone, Parser)]
pub struct SaveArgs {
    /// Append the calculation to the history.
    #[clap(long)]
    pub save: bool,

    /// Brand and model to save the calculation with, defaults to the catalog model.
    #[clap(long)]
    pub label: Option<String>,
}

impl SaveArgs {
    pub fn label_or_model(self, model: Option<&VehicleModel>) -> Option<String> {
        self.label.or_else(|| model.map(VehicleModel::label))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_annual_distance_units() {
        let km = UsageArgs {
            annual_distance: 15_000.0,
            distance_unit: DistanceUnit::Km,
            lifetime_years: 15,
        };
        assert_relative_eq!(km.annual_distance().0, 15_000.0);
        let miles = UsageArgs { distance_unit: DistanceUnit::Miles, ..km };
        assert_relative_eq!(miles.annual_distance().0, 15_000.0 * 1.609_344);
    }

    #[test]
    fn test_exactly_one_efficiency() {
        let economy = FuelEconomyArgs { miles_per_gallon: Some(30.0), litres_per_100_km: None };
        assert_eq!(economy.economy(None).unwrap(), FuelEconomy::MilesPerGallon(30.0));
        let both = FuelEconomyArgs { litres_per_100_km: Some(6.5), ..economy };
        assert!(both.economy(None).is_err());
        let none = EnergyConsumptionArgs { per_100_miles: None, per_100_km: None };
        assert!(none.consumption(None).is_err());
    }

    #[test]
    fn test_model_fills_efficiency_and_label() {
        let catalog = VehicleCatalog::default();
        let model = find_model(&catalog, Some("bmw-320d"), VehicleKind::Diesel).unwrap();
        let none = FuelEconomyArgs { miles_per_gallon: None, litres_per_100_km: None };
        assert_eq!(none.economy(model).unwrap(), FuelEconomy::LitresPer100Km(5.1));
        let both = FuelEconomyArgs { miles_per_gallon: Some(30.0), ..none };
        assert!(both.economy(model).is_err());

        let save = SaveArgs { save: true, label: None };
        assert_eq!(save.clone().label_or_model(model).as_deref(), Some("BMW 320d"));
        let save = SaveArgs { label: Some("Firmenwagen".to_owned()), ..save };
        assert_eq!(save.label_or_model(model).as_deref(), Some("Firmenwagen"));

        let model = find_model(&catalog, Some("BMW iX3"), VehicleKind::Electric).unwrap();
        let none = EnergyConsumptionArgs { per_100_miles: None, per_100_km: None };
        assert_eq!(
            none.consumption(model).unwrap(),
            EnergyConsumption::KilowattHoursPer100Km(29.0),
        );
    }

    #[test]
    fn test_find_model_errors() {
        let catalog = VehicleCatalog::default();
        assert_eq!(find_model(&catalog, None, VehicleKind::Diesel).unwrap(), None);
        assert!(find_model(&catalog, Some("bmw-ix3"), VehicleKind::Diesel).is_err());
        assert!(find_model(&catalog, Some("Trabant 601"), VehicleKind::Diesel).is_err());
    }

    #[test]
    fn test_grid_source() {
        let grid = GridArgs { region: Some("Polen".to_owned()), intensity: None };
        assert_eq!(grid.source(), Some(GridSource::Named("Polen".to_owned())));
        let grid = GridArgs { region: None, intensity: None };
        assert_eq!(grid.source(), None);
        assert_eq!(
            grid.source_or_default(&ReferenceTables::default()),
            GridSource::Region(ev_footprint::core::GridRegion::Germany2025),
        );
    }
}
