// Analytics: KPI summary, aggregate reports and JSON export.
// Everything here is a pure function of a dataset snapshot.

pub mod export;
pub mod handlers;
pub mod kpi;
pub mod reports;
