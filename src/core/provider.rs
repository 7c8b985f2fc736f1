use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{period::BillingPeriod, quote::Quote},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Single fixed-price energy tariff.
#[must_use]
#[derive(Clone, Debug, PartialEq, Builder, Deserialize, Serialize)]
pub struct EnergyProvider {
    #[builder(into)]
    pub name: String,

    #[builder(into)]
    pub tariff_name: String,

    pub price_per_kwh: KilowattHourRate,

    /// Fixed charge **per month**, independent of the consumption.
    ///
    /// Use [`BillingPeriod::standing_charge`] to scale it to the billing period.
    pub standing_charge_per_month: Cost,
}

impl EnergyProvider {
    pub fn validate(&self) -> Result {
        ensure!(!self.name.trim().is_empty(), "provider name must not be empty");
        ensure!(
            self.price_per_kwh.is_finite() && self.price_per_kwh > KilowattHourRate::ZERO,
            "`{}`: price must be positive, got {}",
            self.name,
            self.price_per_kwh,
        );
        ensure!(
            self.standing_charge_per_month.is_finite()
                && self.standing_charge_per_month >= Cost::ZERO,
            "`{}`: standing charge must not be negative, got {}",
            self.name,
            self.standing_charge_per_month,
        );
        Ok(())
    }

    /// Price the usage over the billing period.
    pub fn quote(&self, usage: KilowattHours, period: BillingPeriod) -> Quote<'_> {
        let energy_cost = usage * self.price_per_kwh;
        let standing_charge = period.standing_charge(self.standing_charge_per_month);
        Quote {
            provider: self,
            usage,
            period,
            energy_cost,
            standing_charge,
            total_cost: energy_cost + standing_charge,
        }
    }
}
