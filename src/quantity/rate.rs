use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

/// Grid carbon intensity, or any other per-kilowatt-hour emission factor.
pub type KilogramsPerKilowattHour = Quantity<f64, 1, -1, 0, 0, 0>;

/// Per-litre fuel emission factor.
pub type KilogramsPerLitre = Quantity<f64, 1, 0, 0, -1, 0>;

/// Euro per kilowatt-hour.
pub type KilowattHourRate = Quantity<f64, 0, -1, 0, 0, 1>;

/// Euro per litre.
pub type LitreRate = Quantity<f64, 0, 0, 0, -1, 1>;

impl Display for KilogramsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} kg/kWh", self.0)
    }
}

impl Display for KilogramsPerLitre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kg/L", self.0)
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/kWh", self.0)
    }
}

impl Display for LitreRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/L", self.0)
    }
}
