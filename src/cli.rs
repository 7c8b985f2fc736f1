use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde::Serialize;

use crate::{
    core::{
        catalog::Catalog,
        investment::DEFAULT_HORIZON,
        period::BillingPeriod,
        solar::{DEFAULT_EFFICIENCY, DEFAULT_SYSTEM_SIZE, SolarPlant},
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, power::Kilowatts, time::Years},
};

/// Compare energy tariffs and estimate whether rooftop solar pays off.
///
/// Energy is in kilowatt-hours, power in kilowatts, money in euros, latitude in decimal degrees.
#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// TOML file with the tariffs to compare. The built-in catalog is used when omitted.
    #[clap(long = "catalog", env = "SUNPAY_CATALOG", global = true)]
    pub catalog_path: Option<PathBuf>,

    #[clap(long, env = "SUNPAY_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn catalog(&self) -> Result<Catalog> {
        if let Some(path) = &self.catalog_path {
            Catalog::read_from(path)
        } else {
            debug!("using the built-in catalog");
            Ok(Catalog::default())
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the tariffs.
    #[clap(name = "catalog")]
    Catalog,

    /// Rank the providers by the total cost of the consumption, cheapest first.
    #[clap(name = "rank")]
    Rank(RankArgs),

    /// Estimate the annual solar production by the latitude.
    #[clap(name = "solar")]
    Solar(SolarArgs),

    /// Evaluate a solar installation against the cheapest tariffs with and without it.
    #[clap(name = "invest")]
    Invest(Box<InvestArgs>),

    /// Quick payback estimate against the chosen provider.
    #[clap(name = "assess")]
    Assess(Box<AssessArgs>),
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn print<T: Serialize + ?Sized>(
        self,
        value: &T,
        build_tables: impl FnOnce(&T) -> Vec<Table>,
    ) -> Result {
        match self {
            Self::Table => {
                for table in build_tables(value) {
                    println!("{table}");
                }
            }
            Self::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Parser)]
pub struct PlantArgs {
    /// Peak power of the solar installation.
    #[clap(
        long = "system-size-kw",
        default_value_t = DEFAULT_SYSTEM_SIZE.0,
        env = "SYSTEM_SIZE_KW"
    )]
    pub system_size: f64,

    /// System derate factor for heat, cabling, and inverter losses, `(0, 1]`.
    #[clap(long = "efficiency", default_value_t = DEFAULT_EFFICIENCY, env = "SYSTEM_EFFICIENCY")]
    pub efficiency: f64,
}

impl PlantArgs {
    pub fn plant(self) -> Result<SolarPlant> {
        SolarPlant::builder()
            .system_size(Kilowatts(self.system_size))
            .efficiency(self.efficiency)
            .build()
    }
}

#[derive(Parser)]
pub struct RankArgs {
    /// Consumption over the billing period.
    #[clap(long = "usage-kwh", env = "USAGE_KWH")]
    pub usage: KilowattHours,

    /// Billing period the usage spans.
    #[clap(long = "period-months", default_value = "12", env = "PERIOD_MONTHS")]
    pub period_months: u32,
}

impl RankArgs {
    pub fn period(&self) -> Result<BillingPeriod> {
        BillingPeriod::try_from_months(self.period_months)
    }
}

#[derive(Parser)]
pub struct SolarArgs {
    /// Decimal degrees, southern latitudes are negative.
    #[clap(long, allow_negative_numbers = true, env = "LATITUDE")]
    pub latitude: f64,

    #[clap(flatten)]
    pub plant: PlantArgs,
}

#[derive(Parser)]
pub struct InvestArgs {
    /// Household consumption per year.
    #[clap(long = "annual-usage-kwh", env = "ANNUAL_USAGE_KWH")]
    pub annual_usage: KilowattHours,

    /// Decimal degrees, southern latitudes are negative.
    #[clap(long, allow_negative_numbers = true, env = "LATITUDE")]
    pub latitude: f64,

    /// Capital cost of the installation.
    #[clap(long, default_value = "5000", env = "SOLAR_CAPEX")]
    pub capex: Cost,

    #[clap(flatten)]
    pub horizon: HorizonArgs,

    /// Granularity of the bills the providers get ranked by.
    #[clap(long = "billing-period-months", default_value = "1", env = "BILLING_PERIOD_MONTHS")]
    pub billing_period_months: u32,

    /// Label to print along with the report, for example: `Tenerife`.
    #[clap(long, env = "LOCATION")]
    pub location: Option<String>,

    #[clap(flatten)]
    pub plant: PlantArgs,
}

#[derive(Parser)]
pub struct AssessArgs {
    /// Name of the provider from the catalog.
    #[clap(long, env = "PROVIDER")]
    pub provider: String,

    /// Household consumption per year.
    #[clap(long = "annual-usage-kwh", env = "ANNUAL_USAGE_KWH")]
    pub annual_usage: KilowattHours,

    /// Decimal degrees, southern latitudes are negative.
    #[clap(long, allow_negative_numbers = true, env = "LATITUDE")]
    pub latitude: f64,

    /// Money available for the installation.
    #[clap(long, default_value = "5000", env = "SOLAR_BUDGET")]
    pub budget: Cost,

    #[clap(flatten)]
    pub horizon: HorizonArgs,

    #[clap(flatten)]
    pub plant: PlantArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct HorizonArgs {
    /// Number of years to sum the costs and savings over.
    #[clap(long = "horizon-years", default_value_t = DEFAULT_HORIZON.0, env = "HORIZON_YEARS")]
    horizon: f64,
}

impl HorizonArgs {
    pub const fn years(self) -> Years {
        Years(self.horizon)
    }
}
