use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

/// Kilograms of CO2-equivalent (or of a pollutant, where stated).
pub type Kilograms = Quantity<f64, 1, 0, 0, 0, 0>;

impl Kilograms {
    pub const fn as_tonnes(self) -> f64 {
        self.0 / 1000.0
    }
}

impl Display for Kilograms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kg", self.0)
    }
}
