use super::ui;
use crate::core::{AssumptionSet, Case, Currency, Engine, FinancialResult, InvestmentInputs, resolve};
use anyhow::Result;
use comfy_table::{Attribute, Cell, CellAlignment};
use tracing::info;

impl FinancialResult {
    pub fn display_as_table(&self) -> String {
        let currency = self.currency;
        let mut output = format!(
            "Scenario: {}\n{}\n\n",
            ui::style_text(self.case.label(), ui::StyleType::Title),
            ui::style_text(resolve(self.case).description, ui::StyleType::Subtle)
        );

        let mut headline = ui::new_styled_table();
        headline.set_header(vec![
            ui::header_cell(&format!("Annual Benefit ({currency})")),
            ui::header_cell(&format!("3-Year NPV ({currency})")),
            ui::header_cell("Payback (months)"),
            ui::header_cell("Year 1 ROI"),
            ui::header_cell("3-Year ROI"),
        ]);
        headline.add_row(vec![
            ui::total_cell(ui::format_money(self.benefits.total, currency)),
            ui::money_cell(self.npv_3yr, currency),
            ui::payback_cell(self.payback),
            ui::change_cell(self.roi_year1),
            ui::change_cell(self.roi_3yr),
        ]);
        output.push_str(&headline.to_string());

        let mut benefits = ui::new_styled_table();
        benefits.set_header(vec![
            ui::header_cell("Benefit Category"),
            ui::header_cell(&format!("Annual Amount ({currency})")),
            ui::header_cell("Share"),
        ]);
        for (label, amount) in self.benefits.categories() {
            let share = if self.benefits.total > 0.0 {
                ui::format_percent(amount / self.benefits.total)
            } else {
                "N/A".to_string()
            };
            benefits.add_row(vec![
                Cell::new(label),
                ui::money_cell(amount, currency),
                Cell::new(share).set_alignment(CellAlignment::Right),
            ]);
        }
        benefits.add_row(vec![
            Cell::new("Total Annual").add_attribute(Attribute::Bold),
            ui::total_cell(ui::format_money(self.benefits.total, currency)),
            Cell::new(""),
        ]);
        output.push_str("\n\n");
        output.push_str(&benefits.to_string());

        for warning in &self.benefits.warnings {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(&format!("warning: {warning}"), ui::StyleType::Error)
            ));
        }

        let inv = &self.investment;
        let mut investment = ui::new_styled_table();
        investment.set_header(vec![
            ui::header_cell("Cost Category"),
            ui::header_cell(&format!("Amount ({currency})")),
        ]);
        for (label, amount) in [
            ("Platform (Annual)", inv.platform_annual),
            ("Implementation (One-time)", inv.implementation),
            ("Change Management (One-time)", inv.change_management),
            ("Year 1 Total", inv.year1_total()),
            ("Years 2-3 (Annual)", inv.recurring_annual()),
        ] {
            investment.add_row(vec![Cell::new(label), ui::money_cell(amount, currency)]);
        }
        output.push_str("\n\n");
        output.push_str(&investment.to_string());

        let ops = &self.operational;
        let mut operational = ui::new_styled_table();
        operational.set_header(vec![
            ui::header_cell("Metric"),
            ui::header_cell("Current State"),
            ui::header_cell("Target State"),
            ui::header_cell("Improvement"),
        ]);
        let rows = [
            (
                "DSO (Days)",
                format!("{:.0}", ops.current_dso_days),
                format!("{:.0}", ops.target_dso_days),
                format!("{:.0} days", ops.current_dso_days - ops.target_dso_days),
            ),
            (
                "Error Rate",
                ui::format_percent(ops.current_error_rate),
                ui::format_percent(ops.target_error_rate),
                ui::format_percent(ops.current_error_rate - ops.target_error_rate),
            ),
            (
                "Revenue Leakage",
                ui::format_percent(ops.current_leakage_rate),
                ui::format_percent(ops.target_leakage_rate),
                ui::format_percent(ops.current_leakage_rate - ops.target_leakage_rate),
            ),
            (
                "Order-to-Cash Cycle (Days)",
                format!("{:.1}", ops.current_cycle_time_days),
                format!("{:.1}", ops.target_cycle_time_days),
                format!(
                    "{:.1} days",
                    ops.current_cycle_time_days - ops.target_cycle_time_days
                ),
            ),
            (
                "Automation Rate",
                "-".to_string(),
                format!("+{}", ui::format_percent(ops.automation_uplift)),
                format!("+{}", ui::format_percent(ops.automation_uplift)),
            ),
        ];
        for (metric, current, target, improvement) in rows {
            operational.add_row(vec![
                Cell::new(metric),
                Cell::new(current).set_alignment(CellAlignment::Right),
                Cell::new(target).set_alignment(CellAlignment::Right),
                Cell::new(improvement).set_alignment(CellAlignment::Right),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&operational.to_string());

        let mut projection = ui::new_styled_table();
        projection.set_header(vec![
            ui::header_cell("Year"),
            ui::header_cell("Benefit"),
            ui::header_cell("Cost"),
            ui::header_cell("Net"),
            ui::header_cell("Cumulative Net"),
        ]);
        for year in &self.projection {
            projection.add_row(vec![
                Cell::new(format!("Year {}", year.year)),
                ui::money_cell(year.benefit, currency),
                ui::money_cell(year.cost, currency),
                ui::money_cell(year.net, currency),
                ui::money_cell(year.cumulative_net, currency),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&projection.to_string());

        output.push_str(&format!(
            "\n\nReleased Working Capital ({}): {}",
            ui::style_text(currency.code(), ui::StyleType::TotalLabel),
            ui::style_text(
                &ui::format_money(self.benefits.cash_released, currency),
                ui::StyleType::TotalValue
            )
        ));

        output
    }
}

pub fn run(
    engine: &Engine,
    assumptions: &AssumptionSet,
    investment: &InvestmentInputs,
    case: Case,
    currency: Currency,
    json: bool,
) -> Result<()> {
    info!(%case, %currency, "Computing business case");
    let result = engine.compute(assumptions, investment, case, currency)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{}",
            ui::style_text(
                &format!(
                    "Generated: {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M")
                ),
                ui::StyleType::Subtle
            )
        );
        println!("{}", result.display_as_table());
    }
    Ok(())
}
