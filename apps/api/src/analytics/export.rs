use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::analytics::reports::{Report, ReportKind};

/// Downloadable wrapper around a report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub label: &'static str,
    pub generated_at: DateTime<Utc>,
    pub report: Report,
}

impl ExportDocument {
    pub fn new(kind: ReportKind, report: Report, generated_at: DateTime<Utc>) -> Self {
        Self {
            label: kind.export_label(),
            generated_at,
            report,
        }
    }

    pub fn filename(&self) -> String {
        export_filename(self.label, self.generated_at.date_naive())
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `<label>_<YYYY-MM-DD>.json`
pub fn export_filename(label: &str, date: NaiveDate) -> String {
    format!("{label}_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::reports::build_report;
    use chrono::TimeZone;

    #[test]
    fn test_filename_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            export_filename("analytics_report", date),
            "analytics_report_2024-03-07.json"
        );
    }

    #[test]
    fn test_document_carries_label_and_report() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        let doc = ExportDocument::new(
            ReportKind::Kpis,
            build_report(ReportKind::Kpis, &[], &[]),
            at,
        );
        assert_eq!(doc.filename(), "kpis_analytics_2024-12-31.json");

        let json: serde_json::Value = serde_json::from_str(&doc.to_pretty_json().unwrap()).unwrap();
        assert_eq!(json["label"], "kpis_analytics");
        assert_eq!(json["report"]["kind"], "kpis");
        assert_eq!(json["report"]["data"]["totalResources"], 0);
    }
}
