use std::fmt::{Debug, Display, Formatter};

use ev_footprint::quantity::Kilograms;

/// Fraction rendered as a percentage, honouring the `+` flag.
pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.sign_plus() {
            write!(f, "{:+.1}%", self.0 * 100.0)
        } else {
            write!(f, "{:.1}%", self.0 * 100.0)
        }
    }
}

/// Mass in kilograms, switching to tonnes from one tonne on.
pub struct FormattedMass(pub Kilograms);

impl Display for FormattedMass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.0.abs() >= 1000.0 {
            write!(f, "{:.2} t", self.0.as_tonnes())
        } else {
            write!(f, "{:.1} kg", self.0.0)
        }
    }
}
