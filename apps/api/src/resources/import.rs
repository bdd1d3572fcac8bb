//! CSV import of resource records.
//!
//! Columns are mapped by header name, skills are `;`-separated inside their
//! cell. Import is permissive: a missing or unparseable cell never fails the
//! row, it is replaced by a fallback and the field name is recorded in the
//! row's `defaulted_fields` so the caller can see what was fabricated.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;
use crate::models::{ExperienceLevel, Resource, ResourceStatus, Role};
use crate::store::new_resource_id;

pub const SAMPLE_CSV: &str = "\
name,email,role,department,status,experience,skills,utilizationRate,performanceRating,hireDate,location,salary,currentProject,projectEndDate
John Doe,john.doe@company.com,Full Stack Developer,Engineering,Available,Senior,JavaScript;React;Node.js,85,4.5,2023-01-15,New York,120000,,
Jane Smith,jane.smith@company.com,Frontend Developer,Design,Assigned,Mid-Level,Figma;React;CSS,90,4.2,2023-03-20,San Francisco,95000,E-commerce Platform,2024-05-15
Mike Johnson,mike.johnson@company.com,Product Manager,Product,Available,Senior,Leadership;Agile;Scrum,75,4.8,2022-11-10,Remote,110000,,
Sarah Wilson,sarah.wilson@company.com,Data Analyst,Data,Training,Junior,Python;SQL;Tableau,60,3.9,2023-06-01,Chicago,85000,,
";

const DEFAULT_SKILLS: [&str; 2] = ["JavaScript", "React"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Add the imported rows after the existing pool.
    #[default]
    Append,
    /// Discard the existing pool (and every project link to it) first.
    Replace,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV input has no header row")]
    MissingHeader,

    #[error("CSV header could not be read: {0}")]
    Header(#[from] csv::Error),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err.to_string())
    }
}

/// One parsed row, before the store resolves its project reference.
#[derive(Debug, Clone)]
pub struct ImportedResource {
    pub resource: Resource,
    /// Project *name* from the `currentProject` column.
    pub current_project: Option<String>,
    pub defaulted_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub rows: Vec<ImportedResource>,
    /// Human-readable notes for records the CSV reader could not decode.
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    pub row: usize,
    pub resource_id: String,
    pub defaulted_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub mode: ImportMode,
    pub imported_count: usize,
    pub resources: Vec<Resource>,
    pub rows: Vec<RowReport>,
    pub skipped: Vec<String>,
}

impl ParsedImport {
    /// Row reports in row order; must be taken before the rows move into the store.
    pub fn row_reports(&self) -> Vec<RowReport> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| RowReport {
                row: i + 1,
                resource_id: row.resource.id.clone(),
                defaulted_fields: row.defaulted_fields.clone(),
            })
            .collect()
    }
}

/// Parses CSV text into resource records, filling gaps with fallbacks drawn
/// from `rng`. Only a missing header row is an error.
pub fn parse_resource_csv<R: Rng + ?Sized>(
    text: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Result<ParsedImport, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeader);
    }

    let mut parsed = ParsedImport::default();
    for (line_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable CSV record {}: {e}", line_idx + 1);
                parsed.skipped.push(format!("record {}: {e}", line_idx + 1));
                continue;
            }
        };
        if record.iter().all(|v| v.is_empty()) {
            continue;
        }

        let row_number = parsed.rows.len() + 1;
        let row = RowFields::new(&headers, &record);
        parsed.rows.push(build_resource(&row, row_number, today, rng));
    }

    Ok(parsed)
}

/// Header-keyed view over one CSV record.
struct RowFields<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> RowFields<'a> {
    fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Non-empty cell under `column`, if the header and the cell both exist.
    fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.record.get(idx).filter(|v| !v.is_empty())
    }
}

fn build_resource<R: Rng + ?Sized>(
    row: &RowFields<'_>,
    n: usize,
    today: NaiveDate,
    rng: &mut R,
) -> ImportedResource {
    let mut defaulted = Vec::new();

    let name = text_or(row.get("name"), "name", &mut defaulted, || format!("Employee {n}"));
    let email = text_or(row.get("email"), "email", &mut defaulted, || {
        format!("employee{n}@company.com")
    });
    let department = text_or(row.get("department"), "department", &mut defaulted, || {
        "Engineering".to_string()
    });
    let location = text_or(row.get("location"), "location", &mut defaulted, || {
        "Remote".to_string()
    });

    let role = enum_or_default::<Role>(row.get("role"), "role", n, &mut defaulted);
    let status = enum_or_default::<ResourceStatus>(row.get("status"), "status", n, &mut defaulted);
    let experience =
        enum_or_default::<ExperienceLevel>(row.get("experience"), "experience", n, &mut defaulted);

    let skills = match row.get("skills").map(split_skills) {
        Some(skills) if !skills.is_empty() => skills,
        _ => {
            defaulted.push("skills");
            DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
        }
    };

    let utilization_rate = match row
        .get("utilizationRate")
        .and_then(parse_int)
        .and_then(|v| i32::try_from(v).ok())
    {
        Some(v) => v,
        None => {
            defaulted.push("utilizationRate");
            rng.gen_range(60..100)
        }
    };

    let performance_rating = match row
        .get("performanceRating")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
    {
        Some(v) => v,
        None => {
            defaulted.push("performanceRating");
            rng.gen_range(3.0..5.0)
        }
    };

    let salary = match row.get("salary").and_then(parse_int) {
        Some(v) => v,
        None => {
            defaulted.push("salary");
            rng.gen_range(80_000..130_000)
        }
    };

    let hire_date = match row.get("hireDate").and_then(parse_date) {
        Some(d) => d,
        None => {
            defaulted.push("hireDate");
            today
        }
    };

    let project_end_date = row.get("projectEndDate").and_then(|v| {
        let parsed = parse_date(v);
        if parsed.is_none() {
            warn!("Row {n}: ignoring unparseable projectEndDate '{v}'");
        }
        parsed
    });

    ImportedResource {
        resource: Resource {
            id: new_resource_id(),
            name,
            email,
            department,
            role,
            experience,
            status,
            utilization_rate,
            skills,
            current_project_id: None,
            project_end_date,
            hire_date,
            location,
            salary,
            performance_rating,
        },
        current_project: row.get("currentProject").map(str::to_string),
        defaulted_fields: defaulted,
    }
}

fn text_or(
    value: Option<&str>,
    field: &'static str,
    defaulted: &mut Vec<&'static str>,
    fallback: impl FnOnce() -> String,
) -> String {
    match value {
        Some(v) => v.to_string(),
        None => {
            defaulted.push(field);
            fallback()
        }
    }
}

fn enum_or_default<T>(
    value: Option<&str>,
    field: &'static str,
    row: usize,
    defaulted: &mut Vec<&'static str>,
) -> T
where
    T: std::str::FromStr<Err = crate::models::resource::UnknownVariant> + Default,
{
    match value.map(str::parse::<T>) {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            warn!("Row {row}: {e}, using default");
            defaulted.push(field);
            T::default()
        }
        None => {
            defaulted.push(field);
            T::default()
        }
    }
}

fn split_skills(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Integers, or decimals truncated toward zero ("85.7" → 85).
fn parse_int(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        // Full ISO timestamps such as "2024-06-30T00:00:00.000Z".
        .or_else(|| value.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}
