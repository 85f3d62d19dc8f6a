use std::fmt::{Display, Formatter};

use enumset::EnumSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::{CalculationError, Result, ensure_non_negative},
    quantity::{KilogramsPerKilowattHour, Quantity},
};

/// Electricity grid regions known to the calculator.
#[derive(
    Debug,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    enumset::EnumSetType,
)]
#[serde(rename_all = "kebab-case")]
pub enum GridRegion {
    Germany2025,
    GermanyCoalExit2030,
    GermanyRenewable2035,
    Bavaria,
    NorthRhineWestphalia,
    SchleswigHolstein,
    BadenWuerttemberg,
    Austria,
    Poland,
    EuAverage,
}

impl GridRegion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Germany2025 => "Deutschland 2025",
            Self::GermanyCoalExit2030 => "Deutschland Kohleausstieg 2030",
            Self::GermanyRenewable2035 => "Deutschland Erneuerbar 2035",
            Self::Bavaria => "Bayern (Wasser/Atom)",
            Self::NorthRhineWestphalia => "Nordrhein-Westfalen (Kohle)",
            Self::SchleswigHolstein => "Schleswig-Holstein (Wind)",
            Self::BadenWuerttemberg => "Baden-Württemberg",
            Self::Austria => "Österreich",
            Self::Poland => "Polen",
            Self::EuAverage => "EU-Durchschnitt",
        }
    }

    const fn id(self) -> &'static str {
        match self {
            Self::Germany2025 => "germany-2025",
            Self::GermanyCoalExit2030 => "germany-coal-exit-2030",
            Self::GermanyRenewable2035 => "germany-renewable-2035",
            Self::Bavaria => "bavaria",
            Self::NorthRhineWestphalia => "north-rhine-westphalia",
            Self::SchleswigHolstein => "schleswig-holstein",
            Self::BadenWuerttemberg => "baden-wuerttemberg",
            Self::Austria => "austria",
            Self::Poland => "poland",
            Self::EuAverage => "eu-average",
        }
    }

    /// Look the region up by its label or kebab-case id, ignoring case and surrounding spaces.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        EnumSet::<Self>::all()
            .iter()
            .find(|region| region.label().to_lowercase() == name || region.id() == name)
    }
}

impl Display for GridRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Emission intensity and descriptive generation mix of a grid region.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridProfile {
    pub region: GridRegion,

    #[serde(rename = "intensity_kg_per_kwh")]
    pub intensity: KilogramsPerKilowattHour,

    #[serde(default)]
    pub renewable_percent: f64,

    #[serde(default)]
    pub coal_percent: f64,

    #[serde(default)]
    pub gas_percent: f64,

    #[serde(default)]
    pub nuclear_percent: f64,
}

impl GridProfile {
    const fn new(
        region: GridRegion,
        intensity: f64,
        [renewable_percent, coal_percent, gas_percent, nuclear_percent]: [f64; 4],
    ) -> Self {
        Self {
            region,
            intensity: Quantity(intensity),
            renewable_percent,
            coal_percent,
            gas_percent,
            nuclear_percent,
        }
    }

    fn validate(&self) -> Result<()> {
        let region = self.region;
        if !self.intensity.is_finite() || self.intensity < KilogramsPerKilowattHour::ZERO {
            return Err(CalculationError::InvalidTables(format!(
                "`{region}` has a negative or non-finite intensity",
            )));
        }
        let shares =
            [self.renewable_percent, self.coal_percent, self.gas_percent, self.nuclear_percent];
        for share in shares {
            if !(0.0..=100.0).contains(&share) {
                return Err(CalculationError::InvalidTables(format!(
                    "`{region}` has a generation share outside of [0, 100]: {share}",
                )));
            }
        }
        Ok(())
    }
}

/// Where the grid intensity of an electric vehicle calculation comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridSource {
    Region(GridRegion),

    /// Free-form region name, resolved through [`GridTable::resolve`].
    Named(String),

    /// Explicit intensity, bypassing the table.
    Intensity(KilogramsPerKilowattHour),
}

impl From<GridRegion> for GridSource {
    fn from(region: GridRegion) -> Self {
        Self::Region(region)
    }
}

impl From<KilogramsPerKilowattHour> for GridSource {
    fn from(intensity: KilogramsPerKilowattHour) -> Self {
        Self::Intensity(intensity)
    }
}

impl From<&str> for GridSource {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

/// Grid intensity used by a calculation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGrid {
    /// `None` when the caller supplied the intensity directly.
    pub region: Option<GridRegion>,

    #[serde(rename = "intensity_kg_per_kwh")]
    pub intensity: KilogramsPerKilowattHour,

    /// The requested name was unknown and the default region was substituted.
    pub fallback: bool,
}

/// Grid profiles of every [`GridRegion`], indexed by the region discriminant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridTable", into = "RawGridTable")]
pub struct GridTable {
    default_region: GridRegion,
    profiles: Vec<GridProfile>,
}

#[derive(Serialize, Deserialize)]
struct RawGridTable {
    default_region: GridRegion,
    profiles: Vec<GridProfile>,
}

impl TryFrom<RawGridTable> for GridTable {
    type Error = CalculationError;

    fn try_from(raw: RawGridTable) -> Result<Self> {
        Self::try_new(raw.default_region, raw.profiles)
    }
}

impl From<GridTable> for RawGridTable {
    fn from(table: GridTable) -> Self {
        Self { default_region: table.default_region, profiles: table.profiles }
    }
}

impl GridTable {
    /// Build the table, requiring exactly one valid profile per region.
    pub fn try_new(default_region: GridRegion, profiles: Vec<GridProfile>) -> Result<Self> {
        for profile in &profiles {
            profile.validate()?;
        }
        if let Some(region) = profiles.iter().map(|profile| profile.region).duplicates().next() {
            return Err(CalculationError::InvalidTables(format!("`{region}` is listed twice")));
        }
        let listed: EnumSet<GridRegion> = profiles.iter().map(|profile| profile.region).collect();
        if let Some(region) = (EnumSet::<GridRegion>::all() - listed).iter().next() {
            return Err(CalculationError::InvalidTables(format!("`{region}` has no profile")));
        }
        let profiles = profiles.into_iter().sorted_by_key(|profile| profile.region).collect();
        Ok(Self { default_region, profiles })
    }

    pub const fn default_region(&self) -> GridRegion {
        self.default_region
    }

    pub fn profile(&self, region: GridRegion) -> &GridProfile {
        &self.profiles[region as usize]
    }

    pub fn profiles(&self) -> impl Iterator<Item = &GridProfile> {
        self.profiles.iter()
    }

    /// Look up a region by name, falling back to the default region for unknown names.
    ///
    /// # Returns
    ///
    /// The profile and whether the fallback was applied.
    pub fn profile_by_name(&self, name: &str) -> (&GridProfile, bool) {
        GridRegion::from_name(name).map_or_else(
            || {
                warn!(region = name, default = %self.default_region, "unknown grid region");
                (self.profile(self.default_region), true)
            },
            |region| (self.profile(region), false),
        )
    }

    /// Resolve the intensity to use for a calculation.
    pub fn resolve(&self, source: &GridSource) -> Result<ResolvedGrid> {
        match source {
            GridSource::Region(region) => Ok(ResolvedGrid {
                region: Some(*region),
                intensity: self.profile(*region).intensity,
                fallback: false,
            }),
            GridSource::Named(name) => {
                let (profile, fallback) = self.profile_by_name(name);
                Ok(ResolvedGrid {
                    region: Some(profile.region),
                    intensity: profile.intensity,
                    fallback,
                })
            }
            GridSource::Intensity(intensity) => {
                ensure_non_negative("grid_intensity", intensity.0)?;
                Ok(ResolvedGrid { region: None, intensity: *intensity, fallback: false })
            }
        }
    }
}

impl Default for GridTable {
    fn default() -> Self {
        Self {
            default_region: GridRegion::Germany2025,
            profiles: vec![
                GridProfile::new(GridRegion::Germany2025, 0.366, [46.0, 24.0, 18.0, 12.0]),
                GridProfile::new(GridRegion::GermanyCoalExit2030, 0.280, [65.0, 5.0, 15.0, 15.0]),
                GridProfile::new(GridRegion::GermanyRenewable2035, 0.150, [80.0, 0.0, 10.0, 10.0]),
                GridProfile::new(GridRegion::Bavaria, 0.220, [55.0, 8.0, 12.0, 25.0]),
                GridProfile::new(GridRegion::NorthRhineWestphalia, 0.450, [25.0, 45.0, 20.0, 10.0]),
                GridProfile::new(GridRegion::SchleswigHolstein, 0.180, [75.0, 2.0, 13.0, 10.0]),
                GridProfile::new(GridRegion::BadenWuerttemberg, 0.250, [50.0, 15.0, 20.0, 15.0]),
                GridProfile::new(GridRegion::Austria, 0.140, [78.0, 2.0, 20.0, 0.0]),
                GridProfile::new(GridRegion::Poland, 0.690, [22.0, 68.0, 10.0, 0.0]),
                GridProfile::new(GridRegion::EuAverage, 0.295, [42.0, 18.0, 22.0, 18.0]),
            ],
        }
    }
}
