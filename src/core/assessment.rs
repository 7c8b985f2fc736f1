use std::fmt::{Display, Formatter};

use bon::builder;
use comfy_table::Color;
use serde::Serialize;

use crate::{
    core::{
        investment::{DEFAULT_HORIZON, break_even, validate_horizon},
        provider::EnergyProvider,
        solar::SolarPlant,
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, time::Years},
};

/// How quickly the installation pays for itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Verdict {
    /// Less than 8 years.
    Excellent,

    /// Less than 10 years.
    Good,

    /// Within the horizon.
    PaysBack,

    NeverPaysBack,
}

impl Verdict {
    const EXCELLENT: Years = Years(8.0);
    const GOOD: Years = Years(10.0);

    #[must_use]
    pub fn new(break_even: Years, horizon: Years) -> Self {
        if break_even >= horizon {
            Self::NeverPaysBack
        } else if break_even < Self::EXCELLENT {
            Self::Excellent
        } else if break_even < Self::GOOD {
            Self::Good
        } else {
            Self::PaysBack
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::DarkGreen,
            Self::PaysBack => Color::DarkYellow,
            Self::NeverPaysBack => Color::Red,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::PaysBack => write!(f, "Pays back"),
            Self::NeverPaysBack => write!(f, "Never pays back"),
        }
    }
}

/// Quick payback estimate against the single, already chosen provider.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct ProviderAssessment<'a> {
    pub provider: &'a EnergyProvider,
    pub annual_production: KilowattHours,

    /// Production actually consumed by the household.
    pub self_consumed: KilowattHours,

    pub budget: Cost,
    pub annual_savings: Cost,
    pub break_even: Years,
    pub horizon: Years,

    /// Savings over the horizon minus the budget.
    pub net_savings: Cost,

    pub verdict: Verdict,
}

impl ProviderAssessment<'_> {
    /// Actual payback period, [`None`] when the installation does not save anything.
    pub fn payback_period(&self) -> Option<Years> {
        (self.annual_savings > Cost::ZERO).then_some(self.break_even)
    }
}

/// Value the self-consumed solar energy at the provider's price.
///
/// Unlike [`crate::core::investment::Investment`], this does not switch providers and keeps the
/// standing charge out of the picture.
#[builder]
#[instrument(skip_all, fields(provider = %provider.name, latitude = latitude))]
pub fn assess_provider<'a>(
    provider: &'a EnergyProvider,
    #[builder(default)] plant: SolarPlant,
    annual_usage: KilowattHours,
    latitude: f64,
    budget: Cost,
    #[builder(default = DEFAULT_HORIZON)] horizon: Years,
) -> Result<ProviderAssessment<'a>> {
    ensure!(
        annual_usage.is_finite() && annual_usage >= KilowattHours::ZERO,
        "annual usage must not be negative, got {annual_usage}",
    );
    ensure!(latitude.is_finite(), "latitude must be a finite number");
    ensure!(
        budget.is_finite() && budget >= Cost::ZERO,
        "budget must not be negative, got {budget}",
    );
    validate_horizon(horizon)?;

    let annual_production = plant.annual_production(latitude);
    let self_consumed = annual_production.min(annual_usage);
    let annual_savings = self_consumed * provider.price_per_kwh;
    let break_even = break_even(budget, annual_savings);
    let assessment = ProviderAssessment {
        provider,
        annual_production,
        self_consumed,
        budget,
        annual_savings,
        break_even,
        horizon,
        net_savings: annual_savings * horizon - budget,
        verdict: Verdict::new(break_even, horizon),
    };
    info!(?assessment.break_even, %assessment.verdict, "assessed");
    Ok(assessment)
}
