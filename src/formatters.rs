use crate::indicators::Indicator;
use crate::report::{ClimateReport, YearOutcome};
use crate::sdg::SdgReport;

/// Formats a climate report into a human-readable string
pub fn format_climate_report(location: &str, report: &ClimateReport) -> String {
    let mut output = format!("Climate Indicators (CMIP6)\nLocation: {}\n", location);

    for (year, outcome) in &report.years {
        output.push_str(&format!("\n=== {} ===\n", year));
        match outcome {
            YearOutcome::Failed { error } => {
                output.push_str(&format!("  Data unavailable: {}\n", error));
            }
            YearOutcome::Report(models) if models.is_empty() => {
                output.push_str("  No model data returned.\n");
            }
            YearOutcome::Report(models) => {
                for (model, indicators) in models {
                    output.push_str(&format!("{}:\n", model));
                    for indicator in Indicator::ALL {
                        if let Some(value) = indicators.get(&indicator) {
                            output.push_str(&format!(
                                "  {}: {} {}\n",
                                indicator.name(),
                                value,
                                indicator.unit()
                            ));
                        }
                    }
                }
            }
        }
    }
    output
}

/// Formats SDG Goal 11 data into a short human-readable summary
pub fn format_sdg_report(report: &SdgReport) -> String {
    let mut output = format!("UN SDG Goal 11 Indicators\nArea code: {}\n\n", report.country_code);

    for (indicator, observations) in &report.data {
        output.push_str(&format!("{}: {} observations\n", indicator, observations.len()));
    }
    if !report.errors.is_empty() {
        output.push_str("\nErrors:\n");
        for (indicator, error) in &report.errors {
            output.push_str(&format!("  {}: {}\n", indicator, error));
        }
    }
    output
}
