use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        efficiency::{Efficiency, EnergyConsumption, FuelEconomy},
        result::VehicleKind,
    },
    error::{CalculationError, Result},
    quantity::{Euros, Kilometres, Quantity},
};

/// A production car with its rated efficiency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    /// Kebab-case identifier, e.g. `bmw-ix3`.
    pub id: String,

    pub brand: String,
    pub model: String,

    /// Rated electric range.
    #[serde(rename = "range_km", default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Kilometres>,

    /// Rated tailpipe emissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissions_g_per_km: Option<f64>,

    /// List price.
    #[serde(rename = "price_eur")]
    pub price: Euros,

    pub efficiency: Efficiency,
}

impl VehicleModel {
    fn electric(
        id: &str,
        brand: &str,
        model: &str,
        kwh_per_100_km: f64,
        range_km: f64,
        price: f64,
    ) -> Self {
        Self {
            id: id.to_owned(),
            brand: brand.to_owned(),
            model: model.to_owned(),
            range: Some(Quantity(range_km)),
            emissions_g_per_km: None,
            price: Quantity(price),
            efficiency: Efficiency::Energy(EnergyConsumption::KilowattHoursPer100Km(
                kwh_per_100_km,
            )),
        }
    }

    fn diesel(
        id: &str,
        brand: &str,
        model: &str,
        litres_per_100_km: f64,
        emissions_g_per_km: f64,
        price: f64,
    ) -> Self {
        Self {
            id: id.to_owned(),
            brand: brand.to_owned(),
            model: model.to_owned(),
            range: None,
            emissions_g_per_km: Some(emissions_g_per_km),
            price: Quantity(price),
            efficiency: Efficiency::Fuel(FuelEconomy::LitresPer100Km(litres_per_100_km)),
        }
    }

    pub const fn kind(&self) -> VehicleKind {
        self.efficiency.kind()
    }

    /// Brand and model, e.g. `BMW iX3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    fn validate(&self) -> Result<()> {
        let id = &self.id;
        if id.trim().is_empty() {
            return Err(CalculationError::InvalidTables("a vehicle model has no id".to_owned()));
        }
        self.efficiency
            .validate()
            .map_err(|error| CalculationError::InvalidTables(format!("`{id}`: {error}")))?;
        let figures = [
            self.range.map(|range| range.0),
            self.emissions_g_per_km,
            Some(self.price.0),
        ];
        if figures.into_iter().flatten().any(|value| !value.is_finite() || value < 0.0) {
            return Err(CalculationError::InvalidTables(format!(
                "`{id}` has a negative or non-finite figure",
            )));
        }
        Ok(())
    }
}

/// Vehicle models offered as presets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VehicleModel>", into = "Vec<VehicleModel>")]
pub struct VehicleCatalog(Vec<VehicleModel>);

impl TryFrom<Vec<VehicleModel>> for VehicleCatalog {
    type Error = CalculationError;

    fn try_from(models: Vec<VehicleModel>) -> Result<Self> {
        Self::try_new(models)
    }
}

impl From<VehicleCatalog> for Vec<VehicleModel> {
    fn from(catalog: VehicleCatalog) -> Self {
        catalog.0
    }
}

impl VehicleCatalog {
    /// Build the catalog, requiring valid models with unique ids.
    pub fn try_new(models: Vec<VehicleModel>) -> Result<Self> {
        for model in &models {
            model.validate()?;
        }
        if let Some(id) = models.iter().map(|model| model.id.to_lowercase()).duplicates().next() {
            return Err(CalculationError::InvalidTables(format!("`{id}` is listed twice")));
        }
        Ok(Self(models))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleModel> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: VehicleKind) -> impl Iterator<Item = &VehicleModel> {
        self.iter().filter(move |model| model.kind() == kind)
    }

    /// Look a model up by its id or label, ignoring case and surrounding spaces.
    pub fn get(&self, name: &str) -> Option<&VehicleModel> {
        let name = name.trim().to_lowercase();
        self.iter()
            .find(|model| model.id.to_lowercase() == name || model.label().to_lowercase() == name)
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self(vec![
            VehicleModel::electric("bmw-ix3", "BMW", "iX3", 29.0, 460.0, 68_300.0),
            VehicleModel::electric("mercedes-eqc", "Mercedes", "EQC", 32.5, 417.0, 71_281.0),
            VehicleModel::electric("audi-e-tron", "Audi", "e-tron", 35.7, 436.0, 81_250.0),
            VehicleModel::electric("volkswagen-id4", "Volkswagen", "ID.4", 28.0, 520.0, 47_515.0),
            VehicleModel::electric("porsche-taycan", "Porsche", "Taycan", 38.2, 484.0, 105_607.0),
            VehicleModel::electric("bmw-i4", "BMW", "i4", 31.2, 590.0, 58_300.0),
            VehicleModel::electric("mercedes-eqs", "Mercedes", "EQS", 29.8, 770.0, 106_374.0),
            VehicleModel::electric("audi-q4-e-tron", "Audi", "Q4 e-tron", 33.1, 520.0, 52_900.0),
            VehicleModel::diesel("bmw-320d", "BMW", "320d", 5.1, 126.0, 46_850.0),
            VehicleModel::diesel("mercedes-c220d", "Mercedes", "C220d", 5.2, 131.0, 48_561.0),
            VehicleModel::diesel("audi-a4-tdi", "Audi", "A4 TDI", 5.3, 134.0, 49_400.0),
            VehicleModel::diesel(
                "volkswagen-passat-tdi",
                "Volkswagen",
                "Passat TDI",
                4.7,
                124.0,
                42_995.0,
            ),
            VehicleModel::diesel(
                "porsche-macan-diesel",
                "Porsche",
                "Macan Diesel",
                7.0,
                189.0,
                78_481.0,
            ),
            VehicleModel::diesel("bmw-x3-xdrive20d", "BMW", "X3 xDrive20d", 6.5, 155.0, 51_050.0),
            VehicleModel::diesel("mercedes-glc-220d", "Mercedes", "GLC 220d", 6.2, 148.0, 53_476.0),
            VehicleModel::diesel("audi-q5-tdi", "Audi", "Q5 TDI", 6.8, 162.0, 56_200.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = VehicleCatalog::default();
        let rebuilt = VehicleCatalog::try_new(catalog.0.clone()).unwrap();
        assert_eq!(rebuilt, catalog);
        assert_eq!(catalog.iter().count(), 16);
        assert_eq!(catalog.of_kind(VehicleKind::Electric).count(), 8);
        assert_eq!(catalog.of_kind(VehicleKind::Diesel).count(), 8);
    }

    #[test]
    fn test_get_by_id_or_label() {
        let catalog = VehicleCatalog::default();
        let ix3 = catalog.get("bmw-ix3").unwrap();
        assert_eq!(ix3.label(), "BMW iX3");
        assert_eq!(
            ix3.efficiency.energy_consumption(),
            Some(EnergyConsumption::KilowattHoursPer100Km(29.0)),
        );
        assert_eq!(ix3.kind(), VehicleKind::Electric);

        let passat = catalog.get("  volkswagen PASSAT tdi ").unwrap();
        assert_eq!(passat.id, "volkswagen-passat-tdi");
        assert_eq!(passat.efficiency.fuel_economy(), Some(FuelEconomy::LitresPer100Km(4.7)));
        assert_eq!(passat.emissions_g_per_km, Some(124.0));

        assert_eq!(catalog.get("Trabant 601"), None);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut models = VehicleCatalog::default().0;
        let mut duplicate = models[0].clone();
        duplicate.id = "BMW-iX3".to_owned();
        models.push(duplicate);
        assert!(matches!(
            VehicleCatalog::try_new(models),
            Err(CalculationError::InvalidTables(_)),
        ));
    }

    #[test]
    fn test_invalid_efficiency_is_rejected() {
        let mut models = VehicleCatalog::default().0;
        models[8].efficiency = Efficiency::Fuel(FuelEconomy::LitresPer100Km(0.0));
        assert!(VehicleCatalog::try_new(models).is_err());
    }
}
