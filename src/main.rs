#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, AssessArgs, Command, InvestArgs},
    core::{
        assessment::assess_provider,
        catalog::Catalog,
        investment::Investment,
        period::BillingPeriod,
    },
    prelude::*,
    tables::{
        build_assessment_table,
        build_catalog_table,
        build_production_table,
        build_quotes_table,
        build_report_table,
        build_verdict_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let catalog = args.catalog()?;
    let output = args.output;

    match args.command {
        Command::Catalog => {
            output.print(&catalog, |catalog| vec![build_catalog_table(catalog)])?;
        }
        Command::Rank(args) => {
            let quotes = catalog.rank(args.usage, args.period()?)?;
            output.print(quotes.as_slice(), |quotes| vec![build_quotes_table(quotes)])?;
        }
        Command::Solar(args) => {
            let estimate = args.plant.plant()?.estimate(args.latitude);
            output.print(&estimate, |estimate| vec![build_production_table(estimate)])?;
        }
        Command::Invest(args) => {
            invest(&catalog, *args, output)?;
        }
        Command::Assess(args) => {
            assess(&catalog, &args, output)?;
        }
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all)]
fn invest(catalog: &Catalog, args: InvestArgs, output: cli::OutputFormat) -> Result {
    let report = Investment::builder()
        .catalog(catalog)
        .plant(args.plant.plant()?)
        .annual_usage(args.annual_usage)
        .latitude(args.latitude)
        .capex(args.capex)
        .horizon(args.horizon.years())
        .period(BillingPeriod::try_from_months(args.billing_period_months)?)
        .maybe_location(args.location)
        .build()
        .evaluate()?;
    output.print(&report, |report| vec![build_report_table(report), build_verdict_table(report)])
}

#[instrument(skip_all)]
fn assess(catalog: &Catalog, args: &AssessArgs, output: cli::OutputFormat) -> Result {
    let assessment = assess_provider()
        .provider(catalog.find(&args.provider)?)
        .plant(args.plant.plant()?)
        .annual_usage(args.annual_usage)
        .latitude(args.latitude)
        .budget(args.budget)
        .horizon(args.horizon.years())
        .call()?;
    output.print(&assessment, |assessment| vec![build_assessment_table(assessment)])
}
