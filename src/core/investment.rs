use bon::Builder;
use serde::Serialize;

use crate::{
    core::{catalog::Catalog, period::BillingPeriod, quote::Quote, solar::SolarPlant},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, time::Years},
};

pub const DEFAULT_HORIZON: Years = Years(20.0);

/// Years to recover the capital cost from the annual savings.
///
/// Returns [`Years::NEVER`] when there are no savings.
pub fn break_even(capex: Cost, annual_savings: Cost) -> Years {
    if annual_savings > Cost::ZERO { Years(capex / annual_savings) } else { Years::NEVER }
}

pub(crate) fn validate_horizon(horizon: Years) -> Result {
    ensure!(
        horizon.is_finite() && horizon > Years::ZERO && horizon < Years::NEVER,
        "horizon must be positive and shorter than {}, got {horizon}",
        Years::NEVER,
    );
    Ok(())
}

/// Residential solar investment to evaluate against the tariff catalog.
#[derive(Builder)]
pub struct Investment<'a> {
    catalog: &'a Catalog,

    #[builder(default)]
    plant: SolarPlant,

    /// Household consumption per year.
    annual_usage: KilowattHours,

    /// Decimal degrees, the sign is irrelevant.
    latitude: f64,

    /// Capital cost of the installation.
    capex: Cost,

    #[builder(default = DEFAULT_HORIZON)]
    horizon: Years,

    /// Granularity at which the bills get ranked.
    #[builder(default = BillingPeriod::MONTHLY)]
    period: BillingPeriod,

    /// Free-form label to print along with the report.
    #[builder(into)]
    location: Option<String>,
}

impl<'a> Investment<'a> {
    #[instrument(skip_all, fields(latitude = self.latitude, capex = ?self.capex))]
    pub fn evaluate(self) -> Result<SolarInvestmentReport<'a>> {
        self.validate()?;

        let per_year = self.period.per_year();
        let period_usage = self.annual_usage / per_year;
        let best_without_solar = self.catalog.cheapest(period_usage, self.period)?;
        let annual_bill_without_solar = best_without_solar.annualized();

        let annual_production = self.plant.annual_production(self.latitude);
        let net_usage = (period_usage - annual_production / per_year).max(KilowattHours::ZERO);
        let best_with_solar = self.catalog.cheapest(net_usage, self.period)?;
        let annual_bill_with_solar = best_with_solar.annualized();

        let annual_savings = annual_bill_without_solar - annual_bill_with_solar;
        let break_even = break_even(self.capex, annual_savings);

        let total_without_solar = annual_bill_without_solar * self.horizon;
        let total_with_solar = self.capex + annual_bill_with_solar * self.horizon;
        let net_savings = total_without_solar - total_with_solar;

        let annual_amortization = self.capex / self.horizon.0;
        let total_annual_cost_with_solar = annual_bill_with_solar + annual_amortization;

        let report = SolarInvestmentReport {
            location: self.location,
            latitude: self.latitude,
            plant: self.plant,
            annual_usage: self.annual_usage,
            annual_production,
            annual_net_usage: net_usage * per_year,
            is_off_grid: net_usage == KilowattHours::ZERO,
            best_without_solar,
            annual_bill_without_solar,
            best_with_solar,
            annual_bill_with_solar,
            capex: self.capex,
            annual_savings,
            break_even,
            horizon: self.horizon,
            total_without_solar,
            total_with_solar,
            net_savings,
            annual_amortization,
            total_annual_cost_with_solar,
            annual_net_savings: annual_bill_without_solar - total_annual_cost_with_solar,
            return_on_investment: (self.capex > Cost::ZERO).then(|| net_savings / self.capex),
            is_profitable: break_even < self.horizon,
        };
        info!(
            without_solar = ?report.annual_bill_without_solar,
            with_solar = ?report.annual_bill_with_solar,
            break_even = ?report.break_even,
            is_profitable = report.is_profitable,
            "evaluated",
        );
        Ok(report)
    }

    fn validate(&self) -> Result {
        ensure!(
            self.annual_usage.is_finite() && self.annual_usage >= KilowattHours::ZERO,
            "annual usage must not be negative, got {}",
            self.annual_usage,
        );
        ensure!(self.latitude.is_finite(), "latitude must be a finite number");
        ensure!(
            self.capex.is_finite() && self.capex >= Cost::ZERO,
            "capital cost must not be negative, got {}",
            self.capex,
        );
        validate_horizon(self.horizon)
    }
}

/// Outcome of a solar investment evaluation, all the money figures are in euros.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct SolarInvestmentReport<'a> {
    pub location: Option<String>,
    pub latitude: f64,
    pub plant: SolarPlant,
    pub annual_usage: KilowattHours,
    pub annual_production: KilowattHours,

    /// Energy still bought from the grid per year.
    pub annual_net_usage: KilowattHours,

    /// Solar covers the entire consumption.
    pub is_off_grid: bool,

    /// Cheapest quote for the original consumption, per billing period.
    pub best_without_solar: Quote<'a>,
    pub annual_bill_without_solar: Cost,

    /// Cheapest quote for the net consumption, per billing period.
    pub best_with_solar: Quote<'a>,
    pub annual_bill_with_solar: Cost,

    pub capex: Cost,

    /// Reduction of the utility bill.
    pub annual_savings: Cost,

    /// [`Years::NEVER`] when the installation does not save anything.
    pub break_even: Years,

    pub horizon: Years,
    pub total_without_solar: Cost,

    /// Capital cost plus all the bills over the horizon.
    pub total_with_solar: Cost,

    pub net_savings: Cost,

    /// Capital cost spread evenly over the horizon.
    pub annual_amortization: Cost,

    pub total_annual_cost_with_solar: Cost,
    pub annual_net_savings: Cost,

    /// Net savings relative to the capital cost, unless the installation was free.
    pub return_on_investment: Option<f64>,

    /// Breaks even within the horizon.
    pub is_profitable: bool,
}

impl SolarInvestmentReport<'_> {
    /// Actual payback period, [`None`] when the installation does not save anything.
    ///
    /// Unlike [`Self::break_even`], this never confuses a very long payback with the sentinel.
    pub fn payback_period(&self) -> Option<Years> {
        (self.annual_savings > Cost::ZERO).then_some(self.break_even)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::provider::EnergyProvider,
        quantity::{power::Kilowatts, rate::KilowattHourRate},
    };

    const TENERIFE: f64 = 28.4;
    const LONDON: f64 = 51.5;

    fn evaluate(catalog: &Catalog, latitude: f64, capex: f64) -> Result<SolarInvestmentReport<'_>> {
        Investment::builder()
            .catalog(catalog)
            .annual_usage(KilowattHours(3600.0))
            .latitude(latitude)
            .capex(Cost(capex))
            .build()
            .evaluate()
    }

    #[test]
    fn test_tenerife() -> Result {
        let catalog = Catalog::default();
        let report = evaluate(&catalog, TENERIFE, 5000.0)?;

        assert_eq!(report.best_without_solar.provider.name, "Volt-Age");
        assert_abs_diff_eq!(report.annual_bill_without_solar.0, 684.0, epsilon = 1e-9);

        // Production exceeds consumption, only the standing charge remains:
        assert_abs_diff_eq!(report.annual_production.0, 3942.0, epsilon = 1e-9);
        assert!(report.is_off_grid);
        assert_eq!(report.annual_net_usage, KilowattHours::ZERO);
        assert_eq!(report.best_with_solar.provider.name, "GreenSpark");
        assert_abs_diff_eq!(report.annual_bill_with_solar.0, 120.0, epsilon = 1e-9);

        assert_abs_diff_eq!(report.annual_savings.0, 564.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.break_even.0, 5000.0 / 564.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.total_without_solar.0, 13680.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.total_with_solar.0, 7400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.net_savings.0, 6280.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.annual_amortization.0, 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.annual_net_savings.0, 314.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.return_on_investment.unwrap(), 1.256, epsilon = 1e-9);
        assert!(report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_london() -> Result {
        let catalog = Catalog::default();
        let report = evaluate(&catalog, LONDON, 5000.0)?;

        assert_abs_diff_eq!(report.annual_production.0, 2628.0, epsilon = 1e-9);
        assert!(!report.is_off_grid);
        assert_abs_diff_eq!(report.annual_net_usage.0, 972.0, epsilon = 1e-9);
        assert_eq!(report.best_with_solar.provider.name, "GreenSpark");
        assert_abs_diff_eq!(report.annual_bill_with_solar.0, 294.96, epsilon = 1e-9);
        assert_abs_diff_eq!(report.annual_savings.0, 389.04, epsilon = 1e-9);
        assert_abs_diff_eq!(report.net_savings.0, 2780.8, epsilon = 1e-6);
        assert!(report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_tenerife_saves_more_than_london() -> Result {
        let catalog = Catalog::default();
        let tenerife = evaluate(&catalog, TENERIFE, 5000.0)?;
        let london = evaluate(&catalog, LONDON, 5000.0)?;
        assert!(tenerife.annual_savings > london.annual_savings);
        assert!(tenerife.break_even < london.break_even);
        Ok(())
    }

    #[test]
    fn test_expensive_installation_is_unprofitable() -> Result {
        let catalog = Catalog::default();
        let report = evaluate(&catalog, LONDON, 50_000.0)?;
        assert!(report.annual_savings > Cost::ZERO);
        assert!(report.payback_period().is_some());
        assert!(report.break_even > report.horizon);
        assert!(report.net_savings < Cost::ZERO);
        assert!(!report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_annual_period_matches_monthly() -> Result {
        let catalog = Catalog::default();
        let monthly = evaluate(&catalog, LONDON, 5000.0)?;
        let annual = Investment::builder()
            .catalog(&catalog)
            .annual_usage(KilowattHours(3600.0))
            .latitude(LONDON)
            .capex(Cost(5000.0))
            .period(BillingPeriod::ANNUAL)
            .build()
            .evaluate()?;
        assert_abs_diff_eq!(annual.annual_savings.0, monthly.annual_savings.0, epsilon = 1e-9);
        assert_eq!(annual.best_with_solar.period, BillingPeriod::ANNUAL);
        Ok(())
    }

    #[test]
    fn test_zero_usage() -> Result {
        let catalog = Catalog::default();
        let report = Investment::builder()
            .catalog(&catalog)
            .annual_usage(KilowattHours::ZERO)
            .latitude(TENERIFE)
            .capex(Cost(5000.0))
            .build()
            .evaluate()?;
        assert!(report.is_off_grid);
        assert_eq!(report.annual_savings, Cost::ZERO);
        assert_eq!(report.break_even, Years::NEVER);
        assert!(!report.is_profitable);
        assert_abs_diff_eq!(report.net_savings.0, -5000.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_zero_capex() -> Result {
        let catalog = Catalog::default();
        let report = evaluate(&catalog, TENERIFE, 0.0)?;
        assert_eq!(report.break_even, Years::ZERO);
        assert_eq!(report.return_on_investment, None);
        assert_eq!(report.annual_amortization, Cost::ZERO);
        assert!(report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_zero_production() -> Result {
        let catalog = Catalog::default();
        let report = Investment::builder()
            .catalog(&catalog)
            .plant(SolarPlant::builder().system_size(Kilowatts::ZERO).build()?)
            .annual_usage(KilowattHours(3600.0))
            .latitude(TENERIFE)
            .capex(Cost(5000.0))
            .build()
            .evaluate()?;
        assert_eq!(report.annual_production, KilowattHours::ZERO);
        assert_abs_diff_eq!(report.annual_savings.0, 0.0, epsilon = 1e-9);
        assert_eq!(report.break_even, Years::NEVER);
        assert!(!report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_alternate_catalog() -> Result {
        let catalog = Catalog::try_new(vec![
            EnergyProvider::builder()
                .name("Flat")
                .tariff_name("Flat")
                .price_per_kwh(KilowattHourRate(0.25))
                .standing_charge_per_month(Cost::ZERO)
                .build(),
        ])?;
        let report = evaluate(&catalog, LONDON, 2628.0 * 0.25)?;
        assert_abs_diff_eq!(report.annual_savings.0, 657.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.break_even.0, 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_location_is_kept() -> Result {
        let catalog = Catalog::default();
        let report = Investment::builder()
            .catalog(&catalog)
            .annual_usage(KilowattHours(3600.0))
            .latitude(TENERIFE)
            .capex(Cost(5000.0))
            .location("Tenerife")
            .build()
            .evaluate()?;
        assert_eq!(report.location.as_deref(), Some("Tenerife"));
        Ok(())
    }

    #[test]
    fn test_invariants_hold_across_inputs() -> Result {
        let catalog = Catalog::default();
        for usage in [0.0, 500.0, 1500.0, 3600.0, 8000.0, 25_000.0] {
            for latitude in [-70.0, -50.0, -30.0, 0.0, 20.0, 40.0, 55.0, 65.0] {
                for capex in [0.0, 1000.0, 5000.0, 20_000.0] {
                    for horizon in [5.0, 20.0] {
                        let report = Investment::builder()
                            .catalog(&catalog)
                            .annual_usage(KilowattHours(usage))
                            .latitude(latitude)
                            .capex(Cost(capex))
                            .horizon(Years(horizon))
                            .build()
                            .evaluate()?;
                        assert!(report.annual_net_usage >= KilowattHours::ZERO);
                        assert!(report.annual_bill_with_solar <= report.annual_bill_without_solar);
                        if report.annual_savings > Cost::ZERO {
                            assert_abs_diff_eq!(
                                report.break_even.0,
                                capex / report.annual_savings.0,
                                epsilon = 1e-9,
                            );
                        } else {
                            assert_eq!(report.break_even, Years::NEVER);
                        }
                        assert_eq!(report.is_profitable, report.break_even < report.horizon);
                        assert_abs_diff_eq!(
                            (report.annual_net_savings * report.horizon).0,
                            report.net_savings.0,
                            epsilon = 1e-6,
                        );
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_profitability_at_break_even_boundary() -> Result {
        let catalog = &Catalog::default();
        let horizon = Years(7.0);
        let evaluate = move |capex: f64| {
            Investment::builder()
                .catalog(catalog)
                .annual_usage(KilowattHours(1200.0))
                .latitude(10.0)
                .capex(Cost(capex))
                .horizon(horizon)
                .build()
                .evaluate()
        };
        let savings = evaluate(0.0)?.annual_savings;
        assert_abs_diff_eq!(savings.0, 216.0, epsilon = 1e-9);

        // Capital costs a few ULPs around the savings over the horizon:
        let boundary = (savings * horizon).0;
        for offset in -3_i64..=3 {
            let capex = f64::from_bits(boundary.to_bits().wrapping_add_signed(offset));
            let report = evaluate(capex)?;
            assert_eq!(report.is_profitable, report.break_even < horizon, "capex {capex}");
        }
        Ok(())
    }

    #[test]
    fn test_long_payback_is_not_never() -> Result {
        let catalog = Catalog::try_new(vec![
            EnergyProvider::builder()
                .name("Flat")
                .tariff_name("Flat")
                .price_per_kwh(KilowattHourRate(0.25))
                .standing_charge_per_month(Cost::ZERO)
                .build(),
        ])?;
        let report = evaluate(&catalog, LONDON, 999.0 * 657.0)?;
        assert!(report.annual_savings > Cost::ZERO);
        let payback_period = report.payback_period().context("expected a payback period")?;
        assert_abs_diff_eq!(payback_period.0, 999.0, epsilon = 1e-6);
        assert!(!report.is_profitable);
        Ok(())
    }

    #[test]
    fn test_no_savings_has_no_payback_period() -> Result {
        let catalog = Catalog::default();
        let report = Investment::builder()
            .catalog(&catalog)
            .annual_usage(KilowattHours::ZERO)
            .latitude(LONDON)
            .capex(Cost(5000.0))
            .build()
            .evaluate()?;
        assert_eq!(report.break_even, Years::NEVER);
        assert_eq!(report.payback_period(), None);
        Ok(())
    }

    #[test]
    fn test_rejects_negative_usage() {
        let catalog = Catalog::default();
        let result = Investment::builder()
            .catalog(&catalog)
            .annual_usage(KilowattHours(-1.0))
            .latitude(TENERIFE)
            .capex(Cost(5000.0))
            .build()
            .evaluate();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_capex() {
        let catalog = Catalog::default();
        assert!(evaluate(&catalog, TENERIFE, -1.0).is_err());
    }

    #[test]
    fn test_rejects_invalid_horizon() {
        let catalog = Catalog::default();
        for horizon in [Years::ZERO, Years(-5.0), Years::NEVER, Years(f64::INFINITY)] {
            let result = Investment::builder()
                .catalog(&catalog)
                .annual_usage(KilowattHours(3600.0))
                .latitude(TENERIFE)
                .capex(Cost(5000.0))
                .horizon(horizon)
                .build()
                .evaluate();
            assert!(result.is_err(), "{horizon:?}");
        }
    }

    #[test]
    fn test_break_even() {
        assert_abs_diff_eq!(break_even(Cost(5000.0), Cost(500.0)).0, 10.0);
        assert_eq!(break_even(Cost(5000.0), Cost::ZERO), Years::NEVER);
        assert_eq!(break_even(Cost(5000.0), Cost(-10.0)), Years::NEVER);
        assert_eq!(break_even(Cost::ZERO, Cost::ZERO), Years::NEVER);
    }
}
