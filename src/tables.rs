use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        assessment::ProviderAssessment,
        catalog::Catalog,
        investment::SolarInvestmentReport,
        quote::Quote,
        solar::ProductionEstimate,
    },
    fmt::{FormattedBreakEven, FormattedPercentage},
    quantity::cost::Cost,
};

const BAR_WIDTH: f64 = 20.0;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn savings_color(savings: Cost) -> Color {
    if savings.0 > 0.0 { Color::Green } else { Color::Red }
}

pub fn build_catalog_table(catalog: &Catalog) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Provider", "Tariff", "Price", "Standing charge\nper month"]);
    for provider in catalog.providers() {
        table.add_row(vec![
            Cell::new(&provider.name).add_attribute(Attribute::Bold),
            Cell::new(&provider.tariff_name),
            Cell::new(provider.price_per_kwh).set_alignment(CellAlignment::Right),
            Cell::new(provider.standing_charge_per_month).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_quotes_table(quotes: &[Quote]) -> Table {
    let cheapest = quotes.first().map_or(Cost::ZERO, |quote| quote.total_cost);
    let most_expensive = quotes.last().map_or(Cost::ZERO, |quote| quote.total_cost);

    let mut table = new_table();
    table.set_header(vec![
        "#", "Provider", "Tariff", "Usage", "Energy", "Standing", "Total", "Extra", "",
    ]);
    for (index, quote) in quotes.iter().enumerate() {
        let color = if quote.total_cost == cheapest {
            Color::Green
        } else if quote.total_cost == most_expensive {
            Color::Red
        } else {
            Color::DarkYellow
        };
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_length = if most_expensive > Cost::ZERO {
            (quote.total_cost / most_expensive * BAR_WIDTH).round() as usize
        } else {
            0
        };
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(&quote.provider.name).add_attribute(Attribute::Bold),
            Cell::new(&quote.provider.tariff_name),
            Cell::new(quote.usage).set_alignment(CellAlignment::Right),
            Cell::new(quote.energy_cost).set_alignment(CellAlignment::Right),
            Cell::new(quote.standing_charge).set_alignment(CellAlignment::Right),
            Cell::new(quote.total_cost).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(quote.total_cost - cheapest)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new("█".repeat(bar_length)).fg(color),
        ]);
    }
    table
}

pub fn build_production_table(estimate: &ProductionEstimate) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            "Latitude",
            "Tier",
            "Peak sun\nhours",
            "System",
            "Efficiency",
            "Per year",
            "Per month",
        ])
        .add_row(vec![
            Cell::new(format!("{:.2}°", estimate.latitude)),
            Cell::new(estimate.tier),
            Cell::new(estimate.peak_sun_hours).set_alignment(CellAlignment::Right),
            Cell::new(estimate.plant.system_size()).set_alignment(CellAlignment::Right),
            Cell::new(FormattedPercentage(estimate.plant.efficiency()))
                .set_alignment(CellAlignment::Right),
            Cell::new(estimate.annual_production)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(estimate.monthly_production()).set_alignment(CellAlignment::Right),
        ]);
    table
}

pub fn build_report_table(report: &SolarInvestmentReport) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new(report.location.as_deref().unwrap_or("")),
            Cell::new("Without solar"),
            Cell::new("With solar"),
        ])
        .add_row(vec![
            Cell::new("Best provider"),
            Cell::new(&report.best_without_solar.provider.name),
            Cell::new(&report.best_with_solar.provider.name),
        ])
        .add_row(vec![
            Cell::new("Grid usage per year"),
            Cell::new(report.annual_usage).set_alignment(CellAlignment::Right),
            Cell::new(report.annual_net_usage).set_alignment(CellAlignment::Right).fg(
                if report.is_off_grid { Color::Green } else { Color::Reset },
            ),
        ])
        .add_row(vec![
            Cell::new("Utility bill per year"),
            Cell::new(report.annual_bill_without_solar).set_alignment(CellAlignment::Right),
            Cell::new(report.annual_bill_with_solar).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new("Amortization per year"),
            Cell::new(""),
            Cell::new(report.annual_amortization).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new("Total per year"),
            Cell::new(report.annual_bill_without_solar).set_alignment(CellAlignment::Right),
            Cell::new(report.total_annual_cost_with_solar).set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new(format!("Total over {}", report.horizon)),
            Cell::new(report.total_without_solar).set_alignment(CellAlignment::Right),
            Cell::new(report.total_with_solar).set_alignment(CellAlignment::Right),
        ]);
    table
}

pub fn build_verdict_table(report: &SolarInvestmentReport) -> Table {
    let color = if report.is_profitable { Color::Green } else { Color::Red };
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Production\nper year"),
            Cell::new("Capital\ncost"),
            Cell::new("Savings\nper year"),
            Cell::new("Break-even"),
            Cell::new(format!("Net savings\nover {}", report.horizon)).fg(color),
            Cell::new("ROI"),
        ])
        .add_row(vec![
            Cell::new(report.annual_production),
            Cell::new(report.capex),
            Cell::new(report.annual_savings).fg(savings_color(report.annual_savings)),
            Cell::new(FormattedBreakEven(report.payback_period())).fg(color),
            Cell::new(report.net_savings).fg(color),
            Cell::new(
                report
                    .return_on_investment
                    .map_or_else(|| "n/a".to_string(), |roi| FormattedPercentage(roi).to_string()),
            ),
        ]);
    table
}

pub fn build_assessment_table(assessment: &ProviderAssessment) -> Table {
    let color = assessment.verdict.color();
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Provider"),
            Cell::new("Production\nper year"),
            Cell::new("Self-\nconsumed"),
            Cell::new("Budget"),
            Cell::new("Savings\nper year"),
            Cell::new("Break-even"),
            Cell::new(format!("Net savings\nover {}", assessment.horizon)),
            Cell::new("Verdict"),
        ])
        .add_row(vec![
            Cell::new(&assessment.provider.name).add_attribute(Attribute::Bold),
            Cell::new(assessment.annual_production),
            Cell::new(assessment.self_consumed),
            Cell::new(assessment.budget),
            Cell::new(assessment.annual_savings).fg(savings_color(assessment.annual_savings)),
            Cell::new(FormattedBreakEven(assessment.payback_period())).fg(color),
            Cell::new(assessment.net_savings).fg(savings_color(assessment.net_savings)),
            Cell::new(assessment.verdict).fg(color),
        ]);
    table
}
