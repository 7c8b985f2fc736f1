use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{period::BillingPeriod, provider::EnergyProvider},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Provider's price for the given usage over the billing period.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Quote<'a> {
    pub provider: &'a EnergyProvider,
    pub usage: KilowattHours,
    pub period: BillingPeriod,

    /// Consumption part of the cost.
    pub energy_cost: Cost,

    /// Standing charge already scaled to the period.
    pub standing_charge: Cost,

    pub total_cost: Cost,
}

impl Quote<'_> {
    /// Total cost scaled to a year.
    pub fn annualized(&self) -> Cost {
        self.period.annualize(self.total_cost)
    }
}

/// Quote every provider and order the quotes cheapest-first.
///
/// The sort is stable: equally priced providers keep their original order.
#[instrument(skip_all, fields(usage = ?usage, period = %period))]
pub fn rank(
    usage: KilowattHours,
    providers: &[EnergyProvider],
    period: BillingPeriod,
) -> Result<Vec<Quote<'_>>> {
    ensure!(usage.is_finite(), "usage must be a finite number, got {usage}");
    ensure!(usage >= KilowattHours::ZERO, "usage must not be negative, got {usage}");
    let quotes = providers
        .iter()
        .map(|provider| provider.quote(usage, period))
        .sorted_by_key(|quote| quote.total_cost)
        .collect_vec();
    debug!(n_quotes = quotes.len(), cheapest = ?quotes.first().map(|quote| quote.total_cost));
    Ok(quotes)
}
