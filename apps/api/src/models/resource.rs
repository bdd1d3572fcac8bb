use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    #[serde(rename = "Frontend Developer")]
    FrontendDeveloper,
    #[serde(rename = "Backend Developer")]
    BackendDeveloper,
    #[serde(rename = "Full Stack Developer")]
    FullStackDeveloper,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "Scrum Master")]
    ScrumMaster,
    #[serde(rename = "Product Manager")]
    ProductManager,
    #[serde(rename = "Engineering Manager")]
    EngineeringManager,
    #[serde(rename = "QA Engineer")]
    QaEngineer,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::FrontendDeveloper,
        Role::BackendDeveloper,
        Role::FullStackDeveloper,
        Role::DevOpsEngineer,
        Role::ScrumMaster,
        Role::ProductManager,
        Role::EngineeringManager,
        Role::QaEngineer,
        Role::DataAnalyst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FrontendDeveloper => "Frontend Developer",
            Role::BackendDeveloper => "Backend Developer",
            Role::FullStackDeveloper => "Full Stack Developer",
            Role::DevOpsEngineer => "DevOps Engineer",
            Role::ScrumMaster => "Scrum Master",
            Role::ProductManager => "Product Manager",
            Role::EngineeringManager => "Engineering Manager",
            Role::QaEngineer => "QA Engineer",
            Role::DataAnalyst => "Data Analyst",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum ExperienceLevel {
    Junior,
    #[default]
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Junior,
        ExperienceLevel::MidLevel,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
        }
    }
}

/// Allocation status. The only transition the service performs is
/// `Available -> Assigned`; nothing moves a resource back onto the bench.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceStatus {
    #[default]
    Available,
    Assigned,
    #[serde(rename = "On Leave")]
    OnLeave,
    Training,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 4] = [
        ResourceStatus::Available,
        ResourceStatus::Assigned,
        ResourceStatus::OnLeave,
        ResourceStatus::Training,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "Available",
            ResourceStatus::Assigned => "Assigned",
            ResourceStatus::OnLeave => "On Leave",
            ResourceStatus::Training => "Training",
        }
    }
}

/// Returned when a display name does not correspond to any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// Display names parse case-insensitively so CSV cells and query strings
// like "on leave" or "mid-level" resolve.
macro_rules! display_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: needle.to_string(),
                    })
            }
        }
    };
}

display_enum!(Role, "role");
display_enum!(ExperienceLevel, "experience level");
display_enum!(ResourceStatus, "status");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    pub experience: ExperienceLevel,
    pub status: ResourceStatus,
    pub utilization_rate: i32,
    pub skills: Vec<String>,
    /// Id of the project listing this resource in its `assignedResources`.
    pub current_project_id: Option<String>,
    pub project_end_date: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub location: String,
    pub salary: i64,
    pub performance_rating: f64,
}

impl Resource {
    pub fn is_available(&self) -> bool {
        self.status == ResourceStatus::Available
    }
}

/// Payload of the "add resource" operation. Everything except name and email
/// is optional and falls back to the defaults of a freshly hired resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    pub role: Option<Role>,
    pub experience: Option<ExperienceLevel>,
    pub status: Option<ResourceStatus>,
    pub utilization_rate: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub performance_rating: Option<f64>,
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    pub salary: Option<i64>,
}
