use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    core::{pollutants::Pollutants, result::EmissionResult},
    quantity::Kilograms,
};

/// Weighted 0–100 environmental impact score of a vehicle's annual emissions, lower is better.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactScore {
    pub co2: f64,
    pub nox: f64,
    pub pm25: f64,
    pub so2: f64,

    /// Weighted blend, rounded to one decimal.
    pub value: f64,
}

impl ImpactScore {
    const CO2_WEIGHT: f64 = 0.4;
    const NOX_WEIGHT: f64 = 0.2;
    const PM25_WEIGHT: f64 = 0.3;
    const SO2_WEIGHT: f64 = 0.1;

    const MAX_CO2: f64 = 8000.0;
    const MAX_NOX: f64 = 120.0;
    const MAX_PM25: f64 = 6.0;
    const MAX_SO2: f64 = 2.4;

    pub fn new(co2: Kilograms, pollutants: &Pollutants) -> Self {
        let co2 = Self::sub_score(co2, Self::MAX_CO2);
        let nox = Self::sub_score(pollutants.nox, Self::MAX_NOX);
        let pm25 = Self::sub_score(pollutants.pm25, Self::MAX_PM25);
        let so2 = Self::sub_score(pollutants.so2, Self::MAX_SO2);
        let blended = co2 * Self::CO2_WEIGHT
            + nox * Self::NOX_WEIGHT
            + pm25 * Self::PM25_WEIGHT
            + so2 * Self::SO2_WEIGHT;
        Self { co2, nox, pm25, so2, value: (blended * 10.0).round() / 10.0 }
    }

    /// Clamped to `[0, 100]` before weighting.
    fn sub_score(value: Kilograms, maximum: f64) -> f64 {
        (value.0 / maximum * 100.0).clamp(0.0, 100.0)
    }

    pub fn rating(&self) -> Rating {
        if self.value < 30.0 {
            Rating::Excellent
        } else if self.value < 60.0 {
            Rating::Good
        } else {
            Rating::Poor
        }
    }
}

impl From<&EmissionResult> for ImpactScore {
    fn from(result: &EmissionResult) -> Self {
        Self::new(result.annual_total, &result.pollutants)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Poor,
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_co2_at_reference_maximum() {
        let score = ImpactScore::new(Kilograms::from(8000.0), &Pollutants::default());
        assert_abs_diff_eq!(score.value, 40.0);
        assert_eq!(score.rating(), Rating::Good);
    }

    #[test]
    fn test_sub_scores_are_clamped() {
        let score = ImpactScore::new(Kilograms::from(1_000_000.0), &Pollutants::default());
        assert_abs_diff_eq!(score.co2, 100.0);
        assert_abs_diff_eq!(score.value, 40.0);

        let pollutants = Pollutants {
            nox: Kilograms::from(1e6),
            pm25: Kilograms::from(1e6),
            so2: Kilograms::from(1e6),
        };
        let score = ImpactScore::new(Kilograms::from(1e6), &pollutants);
        assert_abs_diff_eq!(score.value, 100.0);
        assert_eq!(score.rating(), Rating::Poor);
    }

    #[test]
    fn test_weighting_near_clamp_boundary() {
        let pollutants = Pollutants {
            nox: Kilograms::from(60.0),
            pm25: Kilograms::from(6.0),
            so2: Kilograms::ZERO,
        };
        let score = ImpactScore::new(Kilograms::from(7000.0), &pollutants);
        // 0.4 × 87.5 + 0.2 × 50 + 0.3 × 100
        assert_abs_diff_eq!(score.value, 75.0);
        assert_abs_diff_eq!(score.pm25, 100.0);
    }

    #[test]
    fn test_zero_emissions() {
        let score = ImpactScore::new(Kilograms::ZERO, &Pollutants::default());
        assert_abs_diff_eq!(score.value, 0.0);
        assert_eq!(score.rating(), Rating::Excellent);
    }
}
