//! Presentation of a detection run: text for terminals, JSON for machines.
//!
//! The detection core returns plain data; everything user-visible is
//! rendered here so the core stays free of console concerns.

use serde::Serialize;

use crate::data::Alert;
use crate::source::ValidationStats;

/// Everything a run produced: the alerts plus the validation tallies.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub alerts: Vec<Alert>,
    pub stats: ValidationStats,
}

impl RunReport {
    pub fn new(alerts: Vec<Alert>, stats: ValidationStats) -> Self {
        Self { alerts, stats }
    }

    /// Render the human-readable summary.
    ///
    /// ```text
    /// Found 1 alert(s):
    /// Service: email -> Alert at: 2025-01-01T10:03:00.000Z
    /// Skipped 2 invalid record(s)
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.alerts.is_empty() {
            out.push_str("No alerts detected\n");
        } else {
            out.push_str(&format!("Found {} alert(s):\n", self.alerts.len()));
            for alert in &self.alerts {
                out.push_str(&format!(
                    "Service: {} -> Alert at: {}\n",
                    alert.service,
                    alert.alert_at_text()
                ));
            }
        }

        if self.stats.invalid > 0 {
            out.push_str(&format!("Skipped {} invalid record(s)\n", self.stats.invalid));
        }

        out
    }

    /// Render the structured JSON report.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
