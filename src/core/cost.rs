use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ensure_non_negative},
    quantity::{Euros, KilowattHourRate, KilowattHours, LitreRate, Litres, Quantity},
};

pub const DIESEL_MAINTENANCE: Euros = Quantity(1200.0);
pub const ELECTRIC_MAINTENANCE: Euros = Quantity(400.0);

/// Annual running costs of both vehicles.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    #[serde(rename = "diesel_fuel_eur")]
    pub diesel_fuel: Euros,

    #[serde(rename = "diesel_maintenance_eur")]
    pub diesel_maintenance: Euros,

    #[serde(rename = "electric_energy_eur")]
    pub electric_energy: Euros,

    #[serde(rename = "electric_maintenance_eur")]
    pub electric_maintenance: Euros,
}

impl CostComparison {
    pub fn new(
        diesel_fuel: Litres,
        electric_energy: KilowattHours,
        electricity_price: KilowattHourRate,
        fuel_price: LitreRate,
    ) -> Result<Self> {
        ensure_non_negative("diesel_fuel", diesel_fuel.0)?;
        ensure_non_negative("electric_energy", electric_energy.0)?;
        ensure_non_negative("electricity_price", electricity_price.0)?;
        ensure_non_negative("fuel_price", fuel_price.0)?;
        Ok(Self {
            diesel_fuel: diesel_fuel * fuel_price,
            diesel_maintenance: DIESEL_MAINTENANCE,
            electric_energy: electric_energy * electricity_price,
            electric_maintenance: ELECTRIC_MAINTENANCE,
        })
    }

    pub fn diesel_total(&self) -> Euros {
        self.diesel_fuel + self.diesel_maintenance
    }

    pub fn electric_total(&self) -> Euros {
        self.electric_energy + self.electric_maintenance
    }

    /// Positive when the electric vehicle is cheaper to run.
    pub fn annual_savings(&self) -> Euros {
        self.diesel_total() - self.electric_total()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::CalculationError;

    #[test]
    fn test_costs() {
        let costs = CostComparison::new(
            Litres::from(975.0),
            KilowattHours::from(3000.0),
            KilowattHourRate::from(0.40),
            LitreRate::from(1.75),
        )
        .unwrap();
        assert_relative_eq!(costs.diesel_fuel.0, 1706.25, max_relative = 1e-12);
        assert_relative_eq!(costs.electric_energy.0, 1200.0, max_relative = 1e-12);
        assert_relative_eq!(costs.diesel_total().0, 2906.25, max_relative = 1e-12);
        assert_relative_eq!(costs.electric_total().0, 1600.0, max_relative = 1e-12);
        assert_relative_eq!(costs.annual_savings().0, 1306.25, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        assert!(matches!(
            CostComparison::new(
                Litres::from(975.0),
                KilowattHours::from(3000.0),
                KilowattHourRate::from(-0.40),
                LitreRate::from(1.75),
            ),
            Err(CalculationError::InvalidParameter { name: "electricity_price", .. }),
        ));
    }
}
