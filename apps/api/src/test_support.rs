//! Fixture builders shared by the unit tests.

use chrono::NaiveDate;

use crate::models::{ExperienceLevel, Project, ProjectStatus, Resource, ResourceStatus, Role};

pub fn make_resource(
    id: &str,
    skills: &[&str],
    utilization_rate: i32,
    experience: ExperienceLevel,
) -> Resource {
    Resource {
        id: id.to_string(),
        name: format!("Resource {id}"),
        email: format!("{}@company.com", id.to_lowercase()),
        department: "Engineering".to_string(),
        role: Role::BackendDeveloper,
        experience,
        status: ResourceStatus::Available,
        utilization_rate,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        current_project_id: None,
        project_end_date: None,
        hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        location: "Remote".to_string(),
        salary: 100_000,
        performance_rating: 4.0,
    }
}

pub fn make_project(required_skills: &[&str]) -> Project {
    Project {
        id: "project-1".to_string(),
        name: "E-commerce Platform".to_string(),
        client_name: "Acme".to_string(),
        engineering_manager: "Jordan Lee".to_string(),
        description: None,
        status: ProjectStatus::Active,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
        budget: None,
        required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        assigned_resources: vec![],
    }
}
