pub mod cost;
pub mod distance;
pub mod energy;
pub mod mass;
pub mod rate;
pub mod volume;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

pub use self::{
    cost::Euros,
    distance::Kilometres,
    energy::KilowattHours,
    mass::Kilograms,
    rate::{KilogramsPerKilowattHour, KilogramsPerLitre, KilowattHourRate, LitreRate},
    volume::Litres,
};

/// Dimensioned scalar.
///
/// The const parameters are the exponents of CO2-equivalent mass (`M`), energy (`E`),
/// distance (`D`), fuel volume (`V`) and money (`C`). Products across dimensions are spelled
/// out in the unit modules.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<
    T,
    const M: isize,
    const E: isize,
    const D: isize,
    const V: isize,
    const C: isize,
>(
    pub T,
);

impl<T, const M: isize, const E: isize, const D: isize, const V: isize, const C: isize>
    Quantity<T, M, E, D, V, C>
where
    Self: PartialOrd,
{
    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }

    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }

    pub fn clamp(mut self, min: Self, max: Self) -> Self {
        if self < min {
            self = min;
        }
        if self > max {
            self = max;
        }
        self
    }
}

impl<const M: isize, const E: isize, const D: isize, const V: isize, const C: isize>
    Quantity<f64, M, E, D, V, C>
{
    pub const ZERO: Self = Self(0.0);

    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Round to the given number of decimal places, for display and persistence.
    #[must_use]
    pub fn round_to(self, decimals: i32) -> Self {
        let scale = 10_f64.powi(decimals);
        Self((self.0 * scale).round() / scale)
    }
}

impl<T, const M: isize, const E: isize, const D: isize, const V: isize, const C: isize>
    Mul<T> for Quantity<T, M, E, D, V, C>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, M, E, D, V, C>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const M: isize, const E: isize, const D: isize, const V: isize, const C: isize>
    Div<T> for Quantity<T, M, E, D, V, C>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, M, E, D, V, C>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}
