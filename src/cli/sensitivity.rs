use super::ui;
use crate::core::sensitivity::{SensitivityEntry, SensitivityVariable};
use crate::core::{AssumptionSet, Case, Engine, InvestmentInputs};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use tracing::info;

fn format_value(variable: SensitivityVariable, value: f64) -> String {
    match variable {
        SensitivityVariable::PlatformCost => ui::format_number(value),
        _ => ui::format_percent(value),
    }
}

fn display_tornado(case: Case, band: f64, entries: &[SensitivityEntry]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Variable"),
        ui::header_cell("Base"),
        ui::header_cell(&format!("-{:.0}%", band * 100.0)),
        ui::header_cell(&format!("+{:.0}%", band * 100.0)),
        ui::header_cell("ROI Impact (low)"),
        ui::header_cell("ROI Impact (high)"),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.variable.label()),
            Cell::new(format_value(entry.variable, entry.base_value))
                .set_alignment(CellAlignment::Right),
            Cell::new(format_value(entry.variable, entry.low_value))
                .set_alignment(CellAlignment::Right),
            Cell::new(format_value(entry.variable, entry.high_value))
                .set_alignment(CellAlignment::Right),
            ui::change_cell(entry.low_delta),
            ui::change_cell(entry.high_delta),
        ]);
    }

    format!(
        "ROI Sensitivity to Key Variables ({})\n\n{table}\n{}",
        ui::style_text(case.label(), ui::StyleType::Title),
        ui::style_text(
            "Impact is the change in 3-year ROI, in percentage points.",
            ui::StyleType::Subtle
        )
    )
}

pub fn run(
    engine: &Engine,
    assumptions: &AssumptionSet,
    investment: &InvestmentInputs,
    case: Case,
    band: f64,
    json: bool,
) -> Result<()> {
    info!(%case, band, "Running sensitivity analysis");
    let entries = engine.compute_sensitivity(
        assumptions,
        investment,
        case,
        &SensitivityVariable::ALL,
        band,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", display_tornado(case, band, &entries));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sensitivity::DEFAULT_BAND;

    #[test]
    fn test_tornado_lists_every_variable() {
        let entries = Engine::standard()
            .compute_sensitivity(
                &AssumptionSet::default(),
                &InvestmentInputs::default(),
                Case::Base,
                &SensitivityVariable::ALL,
                DEFAULT_BAND,
            )
            .unwrap();
        let output = display_tornado(Case::Base, DEFAULT_BAND, &entries);
        for variable in SensitivityVariable::ALL {
            assert!(output.contains(variable.label()));
        }
        assert!(output.contains("-20%"));
        assert!(output.contains("250,000"));
    }
}
