use std::fmt::{Display, Formatter};

use bon::bon;
use serde::Serialize;

use crate::{
    prelude::*,
    quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
};

/// Typical residential system.
pub const DEFAULT_SYSTEM_SIZE: Kilowatts = Kilowatts(3.0);

/// Heat, cabling and inverter losses.
pub const DEFAULT_EFFICIENCY: f64 = 0.8;

/// Insolation band by the absolute latitude.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum SunTier {
    /// `[0°, 25°]`.
    Tropical,

    /// `(25°, 45°]`.
    Temperate,

    /// `(45°, 60°]`.
    HighLatitude,

    /// Everything else, including invalid latitudes.
    Polar,
}

impl SunTier {
    #[must_use]
    pub fn at_latitude(latitude: f64) -> Self {
        let latitude = latitude.abs();
        if (0.0..=25.0).contains(&latitude) {
            Self::Tropical
        } else if (25.0..=45.0).contains(&latitude) {
            Self::Temperate
        } else if (45.0..=60.0).contains(&latitude) {
            Self::HighLatitude
        } else {
            Self::Polar
        }
    }

    /// Average daily [peak sun hours][1].
    ///
    /// [1]: https://en.wikipedia.org/wiki/Sun_hours
    #[must_use]
    pub const fn peak_sun_hours(self) -> Hours {
        match self {
            Self::Tropical => Hours(5.5),
            Self::Temperate => Hours(4.5),
            Self::HighLatitude => Hours(3.0),
            Self::Polar => Hours(2.0),
        }
    }
}

impl Display for SunTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tropical => write!(f, "Tropical"),
            Self::Temperate => write!(f, "Temperate"),
            Self::HighLatitude => write!(f, "High latitude"),
            Self::Polar => write!(f, "Polar"),
        }
    }
}

/// Estimate the yearly yield of a photovoltaic system by its latitude alone.
///
/// Clouds and orientation are deliberately ignored.
#[must_use]
pub fn estimate_annual_production(
    latitude: f64,
    system_size: Kilowatts,
    efficiency: f64,
) -> KilowattHours {
    system_size * SunTier::at_latitude(latitude).peak_sun_hours().per_year() * efficiency
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SolarPlant {
    system_size: Kilowatts,

    /// System derate factor, `(0, 1]`.
    efficiency: f64,
}

impl Default for SolarPlant {
    fn default() -> Self {
        Self { system_size: DEFAULT_SYSTEM_SIZE, efficiency: DEFAULT_EFFICIENCY }
    }
}

#[bon]
impl SolarPlant {
    #[builder]
    pub fn new(
        #[builder(default = DEFAULT_SYSTEM_SIZE)] system_size: Kilowatts,
        #[builder(default = DEFAULT_EFFICIENCY)] efficiency: f64,
    ) -> Result<Self> {
        if !system_size.is_finite() || system_size < Kilowatts::ZERO {
            bail!("invalid system size: {system_size}");
        }
        if !(efficiency > 0.0 && efficiency <= 1.0) {
            bail!("efficiency must be within (0, 1], got {efficiency}");
        }
        Ok(Self { system_size, efficiency })
    }
}

impl SolarPlant {
    pub const fn system_size(&self) -> Kilowatts {
        self.system_size
    }

    #[must_use]
    pub const fn efficiency(&self) -> f64 {
        self.efficiency
    }

    #[must_use]
    pub fn annual_production(&self, latitude: f64) -> KilowattHours {
        estimate_annual_production(latitude, self.system_size, self.efficiency)
    }

    pub fn estimate(self, latitude: f64) -> ProductionEstimate {
        let tier = SunTier::at_latitude(latitude);
        let estimate = ProductionEstimate {
            latitude,
            tier,
            peak_sun_hours: tier.peak_sun_hours(),
            plant: self,
            annual_production: self.annual_production(latitude),
        };
        debug!(?estimate.tier, ?estimate.annual_production, "estimated");
        estimate
    }
}

/// Annual production along with the figures it has been derived from.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct ProductionEstimate {
    pub latitude: f64,
    pub tier: SunTier,

    /// Daily average.
    pub peak_sun_hours: Hours,

    pub plant: SolarPlant,
    pub annual_production: KilowattHours,
}

impl ProductionEstimate {
    pub fn monthly_production(&self) -> KilowattHours {
        self.annual_production / 12.0
    }
}
