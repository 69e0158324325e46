use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::benchmark::DeviationRow;
use crate::report::format_fixed;
use crate::types::*;

/// Emitted alone when no KPI deviates past the threshold.
pub const NO_DEVIATION_MESSAGE: &str = "Indicators are close to market averages.";

/// Default threshold, in percentage points, for a deviation to be reported.
pub const DEFAULT_INSIGHT_THRESHOLD: Percent = dec!(10);

/// One bullet per KPI whose deviation is strictly beyond `threshold_pct`,
/// in declaration order. Falls back to [`NO_DEVIATION_MESSAGE`].
pub fn generate_insights(rows: &[DeviationRow], threshold_pct: Percent) -> Vec<String> {
    let insights: Vec<String> = rows
        .iter()
        .filter_map(|row| row.deviation_pct.map(|d| (row.kpi, d)))
        .filter(|&(_, d)| d > threshold_pct || d < -threshold_pct)
        .map(|(kpi, d)| {
            if d > Decimal::ZERO {
                format!("{} above benchmark (+{}%)", kpi.label(), format_fixed(d, 1))
            } else {
                format!("{} below benchmark ({}%)", kpi.label(), format_fixed(d, 1))
            }
        })
        .collect();

    if insights.is_empty() {
        vec![NO_DEVIATION_MESSAGE.to_string()]
    } else {
        insights
    }
}
