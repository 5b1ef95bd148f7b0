use super::ui;
use crate::core::{AssumptionSet, Case, Currency, Engine, FinancialResult, InvestmentInputs};
use anyhow::Result;
use comfy_table::{Attribute, Cell};
use std::collections::BTreeMap;
use tracing::info;

fn display_benefits(results: &BTreeMap<Case, FinancialResult>, currency: Currency) -> String {
    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Benefit Category")];
    header.extend(results.keys().map(|case| ui::header_cell(case.label())));
    table.set_header(header);

    for (i, label) in [
        "Working Capital",
        "Error Reduction",
        "Leakage Prevention",
        "Labor Savings",
        "Capacity Increase",
    ]
    .iter()
    .enumerate()
    {
        let mut row = vec![Cell::new(label)];
        row.extend(
            results
                .values()
                .map(|r| ui::money_cell(r.benefits.categories()[i].1, currency)),
        );
        table.add_row(row);
    }

    let mut total_row = vec![Cell::new("Total Annual").add_attribute(Attribute::Bold)];
    total_row.extend(
        results
            .values()
            .map(|r| ui::total_cell(ui::format_money(r.benefits.total, currency))),
    );
    table.add_row(total_row);
    table.to_string()
}

fn display_metrics(results: &BTreeMap<Case, FinancialResult>, currency: Currency) -> String {
    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Metric")];
    header.extend(results.keys().map(|case| ui::header_cell(case.label())));
    table.set_header(header);

    let mut investment = vec![Cell::new("Year 1 Investment")];
    investment.extend(
        results
            .values()
            .map(|r| ui::money_cell(r.total_investment, currency)),
    );
    table.add_row(investment);

    let mut three_year_net = vec![Cell::new("3-Year Net Benefit")];
    three_year_net.extend(results.values().map(|r| {
        let net = r.projection.last().map_or(0.0, |y| y.cumulative_net);
        ui::money_cell(net, currency)
    }));
    table.add_row(three_year_net);

    let mut npv = vec![Cell::new("3-Year NPV")];
    npv.extend(results.values().map(|r| ui::money_cell(r.npv_3yr, currency)));
    table.add_row(npv);

    let mut payback = vec![Cell::new("Payback (months)")];
    payback.extend(results.values().map(|r| ui::payback_cell(r.payback)));
    table.add_row(payback);

    let mut roi_year1 = vec![Cell::new("Year 1 ROI")];
    roi_year1.extend(results.values().map(|r| ui::change_cell(r.roi_year1)));
    table.add_row(roi_year1);

    let mut roi_3yr = vec![Cell::new("3-Year ROI").add_attribute(Attribute::Bold)];
    roi_3yr.extend(results.values().map(|r| ui::change_cell(r.roi_3yr)));
    table.add_row(roi_3yr);

    table.to_string()
}

pub fn run(
    engine: &Engine,
    assumptions: &AssumptionSet,
    investment: &InvestmentInputs,
    currency: Currency,
    json: bool,
) -> Result<()> {
    info!(%currency, "Comparing all scenarios");
    let results = engine.compute_all_scenarios(assumptions, investment, currency)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "{}\n",
        ui::style_text("Benefits by Scenario", ui::StyleType::Title)
    );
    println!("{}", display_benefits(&results, currency));
    ui::print_separator();
    println!(
        "{}\n",
        ui::style_text("ROI Metrics by Scenario", ui::StyleType::Title)
    );
    println!("{}", display_metrics(&results, currency));
    Ok(())
}
