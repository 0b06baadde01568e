//! Plain-text route breakdown for terminals.

use crate::RouteReport;

/// Render the total time and a step-by-step table.
///
/// ```text
/// Total travel time: 12.34 mins (congestion x1.50)
///
///  Step  From → To       Est. Time (min)
///     1  17 → 42                    3.10
/// ```
pub fn format_summary(report: &RouteReport) -> String {
    let mut out = format!(
        "Total travel time: {:.2} mins (congestion x{:.2})\n\n{:>5}  {:<14}  {:>15}\n",
        report.total_time_mins, report.congestion_factor, "Step", "From → To", "Est. Time (min)"
    );
    for leg in &report.legs {
        let hop = format!("{} → {}", leg.from_node, leg.to_node);
        out.push_str(&format!("{:>5}  {:<14}  {:>15.2}\n", leg.step, hop, leg.est_time_mins));
    }
    out
}
