use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type Euros = Quantity<f64, 0, 0, 0, 0, 1>;

impl Display for Euros {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Euros::from(1234.5).to_string(), "1234.50 €");
    }
}
