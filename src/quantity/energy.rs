use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use crate::quantity::{
    Quantity,
    cost::Euros,
    mass::Kilograms,
    rate::{KilogramsPerKilowattHour, KilowattHourRate},
};

pub type KilowattHours = Quantity<f64, 0, 1, 0, 0, 0>;

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kWh", self.0)
    }
}

impl Mul<KilogramsPerKilowattHour> for KilowattHours {
    type Output = Kilograms;

    fn mul(self, rhs: KilogramsPerKilowattHour) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Euros;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_emissions_from_energy() {
        let emissions = KilowattHours::from(4080.0) * KilogramsPerKilowattHour::from(0.366);
        assert_abs_diff_eq!(emissions.0, 1493.28, epsilon = 1e-9);
    }

    #[test]
    fn test_cost_from_energy() {
        let cost = KilowattHours::from(100.0) * KilowattHourRate::from(0.4);
        assert_abs_diff_eq!(cost.0, 40.0, epsilon = 1e-9);
    }
}
