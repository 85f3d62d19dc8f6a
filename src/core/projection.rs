use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::grid::{GridRegion, GridTable},
    error::{Result, ensure_fraction, ensure_years},
    quantity::{Kilograms, KilowattHours},
};

/// How grid intensity declines over the vehicle lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DecarbonizationPath {
    /// Straight line from today's intensity down to `final_fraction` of it in the last year.
    Linear { final_fraction: f64 },

    /// Constant relative decline per year.
    Exponential { annual_decline: f64 },
}

impl Default for DecarbonizationPath {
    fn default() -> Self {
        Self::Linear { final_fraction: 0.4 }
    }
}

impl DecarbonizationPath {
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Linear { final_fraction } => {
                ensure_fraction("final_fraction", final_fraction)?;
            }
            Self::Exponential { annual_decline } => {
                ensure_fraction("annual_decline", annual_decline)?;
            }
        }
        Ok(self)
    }

    /// Fraction of today's intensity remaining in the zero-based `year` of `years`.
    pub fn factor(self, year: u32, years: u32) -> f64 {
        match self {
            // Single-year horizons stay at today's intensity.
            Self::Linear { .. } if years <= 1 => 1.0,
            Self::Linear { final_fraction } => {
                1.0 - (1.0 - final_fraction) * f64::from(year) / f64::from(years - 1)
            }
            Self::Exponential { annual_decline } => {
                (1.0 - annual_decline).powf(f64::from(year))
            }
        }
    }
}

impl Display for DecarbonizationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear { final_fraction } => {
                write!(f, "linear to {:.0}%", final_fraction * 100.0)
            }
            Self::Exponential { annual_decline } => {
                write!(f, "−{:.1}% per year", annual_decline * 100.0)
            }
        }
    }
}

/// Per-year operational emissions of an electric vehicle in every grid region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub path: DecarbonizationPath,
    pub years: u32,
    pub regions: BTreeMap<GridRegion, Vec<Kilograms>>,
}

impl Projection {
    pub(crate) fn new(
        grid: &GridTable,
        annual_energy: KilowattHours,
        years: u32,
        path: DecarbonizationPath,
    ) -> Result<Self> {
        ensure_years("lifetime_years", years)?;
        let path = path.validate()?;
        let regions = grid
            .profiles()
            .map(|profile| {
                let series = (0..years)
                    .map(|year| {
                        let intensity = profile.intensity * path.factor(year, years);
                        (annual_energy * intensity).max(Kilograms::ZERO)
                    })
                    .collect();
                (profile.region, series)
            })
            .collect();
        Ok(Self { path, years, regions })
    }

    /// Cumulative operational emissions per region.
    pub fn totals(&self) -> impl Iterator<Item = (GridRegion, Kilograms)> + '_ {
        self.regions.iter().map(|(region, series)| (*region, series.iter().copied().sum()))
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn test_linear_factor() {
        let path = DecarbonizationPath::default();
        assert_abs_diff_eq!(path.factor(0, 15), 1.0);
        assert_abs_diff_eq!(path.factor(14, 15), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(path.factor(7, 15), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(path.factor(0, 1), 1.0);
    }

    #[test]
    fn test_exponential_factor() {
        let path = DecarbonizationPath::Exponential { annual_decline: 0.03 };
        assert_abs_diff_eq!(path.factor(0, 15), 1.0);
        assert_relative_eq!(path.factor(2, 15), 0.97 * 0.97, max_relative = 1e-12);
    }

    #[test]
    fn test_single_year_is_undiscounted() {
        let grid = GridTable::default();
        let projection =
            Projection::new(&grid, KilowattHours::from(4080.0), 1, DecarbonizationPath::default())
                .unwrap();
        let series = &projection.regions[&GridRegion::Germany2025];
        assert_eq!(series.len(), 1);
        assert_relative_eq!(series[0].0, 4080.0 * 0.366, max_relative = 1e-12);
    }

    #[test]
    fn test_every_region_is_projected() {
        let grid = GridTable::default();
        let projection =
            Projection::new(&grid, KilowattHours::from(4080.0), 15, DecarbonizationPath::default())
                .unwrap();
        assert_eq!(projection.regions.len(), grid.profiles().count());
        for series in projection.regions.values() {
            assert_eq!(series.len(), 15);
            assert!(series.windows(2).all(|pair| pair[1] <= pair[0]));
        }
        let poland = &projection.regions[&GridRegion::Poland];
        assert_relative_eq!(poland[14].0, 4080.0 * 0.69 * 0.4, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_path() {
        let grid = GridTable::default();
        let path = DecarbonizationPath::Linear { final_fraction: 1.5 };
        assert!(Projection::new(&grid, KilowattHours::from(1.0), 10, path).is_err());
        assert!(
            Projection::new(&grid, KilowattHours::from(1.0), 0, DecarbonizationPath::default())
                .is_err()
        );
    }
}
