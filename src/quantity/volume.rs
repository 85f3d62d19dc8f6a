use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

use crate::quantity::{
    Quantity,
    cost::Euros,
    mass::Kilograms,
    rate::{KilogramsPerLitre, LitreRate},
};

/// Litres of fuel.
pub type Litres = Quantity<f64, 0, 0, 0, 1, 0>;

impl Litres {
    pub const LITRES_PER_US_GALLON: f64 = 3.785_41;

    pub const fn from_us_gallons(gallons: f64) -> Self {
        Self(gallons * Self::LITRES_PER_US_GALLON)
    }

    pub const fn as_us_gallons(self) -> f64 {
        self.0 / Self::LITRES_PER_US_GALLON
    }
}

impl Display for Litres {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} L", self.0)
    }
}

impl Mul<KilogramsPerLitre> for Litres {
    type Output = Kilograms;

    fn mul(self, rhs: KilogramsPerLitre) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<LitreRate> for Litres {
    type Output = Euros;

    fn mul(self, rhs: LitreRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn test_gallons_round_trip() {
        let volume = Litres::from_us_gallons(400.0);
        assert_relative_eq!(volume.0, 1514.164, max_relative = 1e-12);
        assert_relative_eq!(volume.as_us_gallons(), 400.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tailpipe_emissions() {
        let emissions = Litres::from(100.0) * KilogramsPerLitre::from(2.68);
        assert_abs_diff_eq!(emissions.0, 268.0, epsilon = 1e-9);
    }
}
