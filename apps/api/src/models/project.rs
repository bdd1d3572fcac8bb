use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    #[default]
    Active,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client_name: String,
    pub engineering_manager: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<i64>,
    pub required_skills: Vec<String>,
    /// Resource ids, in allocation order.
    pub assigned_resources: Vec<String>,
}

impl Project {
    pub fn has_assigned(&self, resource_id: &str) -> bool {
        self.assigned_resources.iter().any(|id| id == resource_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub engineering_manager: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<i64>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}
