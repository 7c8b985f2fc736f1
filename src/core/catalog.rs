use std::{fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        period::BillingPeriod,
        provider::EnergyProvider,
        quote::{Quote, rank},
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Immutable list of the tariffs to compare.
///
/// Provider order matters: it breaks ties when ranking.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    providers: Vec<EnergyProvider>,
}

/// TOML representation of the catalog.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    providers: Vec<EnergyProvider>,
}

impl Default for Catalog {
    fn default() -> Self {
        let provider = |name: &str, tariff_name: &str, price: f64, standing_charge: f64| {
            EnergyProvider::builder()
                .name(name)
                .tariff_name(tariff_name)
                .price_per_kwh(KilowattHourRate(price))
                .standing_charge_per_month(Cost(standing_charge))
                .build()
        };
        Self {
            providers: vec![
                provider("Volt-Age", "Standard Saver", 0.14, 15.00),
                provider("GreenSpark", "Eco-Friendly", 0.18, 10.00),
                provider("PowerPlus", "Fixed 12 Months", 0.16, 12.50),
                provider("BudgetEnergy", "No Frills", 0.13, 20.00),
            ],
        }
    }
}

impl Catalog {
    pub fn try_new(providers: Vec<EnergyProvider>) -> Result<Self> {
        ensure!(!providers.is_empty(), "the catalog must contain at least one provider");
        for provider in &providers {
            provider.validate()?;
        }
        // Names are unique ignoring the ASCII case, the same way `find` matches them:
        if let Some(name) = providers
            .iter()
            .map(|provider| provider.name.to_ascii_lowercase())
            .duplicates()
            .next()
        {
            bail!("duplicate provider `{name}`");
        }
        Ok(Self { providers })
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text).context("failed to parse the catalog")?;
        Self::try_new(file.providers)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read the catalog from `{}`", path.display()))?;
        let catalog = Self::from_toml(&text)
            .with_context(|| format!("invalid catalog in `{}`", path.display()))?;
        info!(n_providers = catalog.len(), "loaded the catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn providers(&self) -> &[EnergyProvider] {
        &self.providers
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.providers.len()
    }

    /// Find the provider by its name, ignoring the ASCII case.
    pub fn find(&self, name: &str) -> Result<&EnergyProvider> {
        self.providers
            .iter()
            .find(|provider| provider.name.eq_ignore_ascii_case(name))
            .with_context(|| {
                format!(
                    "unknown provider `{name}`, expected one of: {}",
                    self.providers.iter().map(|provider| &provider.name).join(", "),
                )
            })
    }

    /// Rank all the providers for the usage over the billing period, cheapest first.
    pub fn rank(&self, usage: KilowattHours, period: BillingPeriod) -> Result<Vec<Quote<'_>>> {
        rank(usage, &self.providers, period)
    }

    /// Cheapest quote for the usage over the billing period.
    pub fn cheapest(&self, usage: KilowattHours, period: BillingPeriod) -> Result<Quote<'_>> {
        self.rank(usage, period)?.into_iter().next().context("the catalog is empty")
    }
}
