use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type Kilometres = Quantity<f64, 0, 0, 1, 0, 0>;

impl Kilometres {
    pub const KILOMETRES_PER_MILE: f64 = 1.609_344;

    pub const fn from_miles(miles: f64) -> Self {
        Self(miles * Self::KILOMETRES_PER_MILE)
    }

    pub const fn as_miles(self) -> f64 {
        self.0 / Self::KILOMETRES_PER_MILE
    }
}

impl Display for Kilometres {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} km", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_miles_round_trip() {
        let distance = Kilometres::from_miles(12_000.0);
        assert_relative_eq!(distance.0, 19_312.128, max_relative = 1e-12);
        assert_relative_eq!(distance.as_miles(), 12_000.0, max_relative = 1e-12);
    }
}
