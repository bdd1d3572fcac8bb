//! In-memory resource store.
//!
//! The whole dataset sits behind one `RwLock`. Reads share it; every mutation,
//! and allocation in particular, runs under a single write guard so the resource
//! and project sides of an update are never observed half-applied.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NewProject, NewResource, Project, Resource, ResourceStatus};
use crate::resources::filter::{filter_resources, ResourceFilter};
use crate::resources::import::{ImportMode, ImportedResource};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource {0} not found")]
    ResourceNotFound(String),

    #[error("project {0} not found")]
    ProjectNotFound(String),

    #[error("resource {resource_id} is {status}, only Available resources can be allocated")]
    NotAvailable {
        resource_id: String,
        status: ResourceStatus,
    },

    #[error("resource {resource_id} is already assigned to project {project_id}")]
    AlreadyAssigned {
        resource_id: String,
        project_id: String,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Result of a successful allocation: both sides as they now stand.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEvent {
    pub resource: Resource,
    pub project: Project,
    pub allocated_at: DateTime<Utc>,
}

/// Storage seam for the service. Carried in `AppState` as `Arc<dyn ResourceStore>`.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn list_resources(&self, filter: &ResourceFilter) -> Vec<Resource>;
    async fn get_resource(&self, id: &str) -> Result<Resource, StoreError>;
    async fn add_resource(&self, new: NewResource) -> Result<Resource, StoreError>;
    async fn import_resources(
        &self,
        rows: Vec<ImportedResource>,
        mode: ImportMode,
    ) -> Vec<Resource>;

    async fn list_projects(&self) -> Vec<Project>;
    async fn get_project(&self, id: &str) -> Result<Project, StoreError>;
    async fn add_project(&self, new: NewProject) -> Result<Project, StoreError>;

    /// Marks the resource Assigned, points it at the project and appends it to
    /// the project's `assigned_resources`, as one unit.
    async fn allocate(
        &self,
        resource_id: &str,
        project_id: &str,
    ) -> Result<AllocationEvent, StoreError>;

    /// Swaps in a freshly generated dataset.
    async fn replace_all(&self, resources: Vec<Resource>, projects: Vec<Project>);

    async fn snapshot(&self) -> Dataset;
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub resources: Vec<Resource>,
    pub projects: Vec<Project>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Dataset>,
}

impl InMemoryStore {
    pub fn new(resources: Vec<Resource>, projects: Vec<Project>) -> Self {
        Self {
            inner: RwLock::new(Dataset {
                resources,
                projects,
            }),
        }
    }
}

pub fn new_resource_id() -> String {
    format!("res-{}", Uuid::new_v4())
}

pub fn new_project_id() -> String {
    format!("project-{}", Uuid::new_v4())
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list_resources(&self, filter: &ResourceFilter) -> Vec<Resource> {
        let data = self.inner.read().await;
        filter_resources(&data.resources, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn get_resource(&self, id: &str) -> Result<Resource, StoreError> {
        let data = self.inner.read().await;
        data.resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ResourceNotFound(id.to_string()))
    }

    async fn add_resource(&self, new: NewResource) -> Result<Resource, StoreError> {
        require("name", &new.name)?;
        require("email", &new.email)?;

        let resource = Resource {
            id: new_resource_id(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_string(),
            department: new.department,
            role: new.role.unwrap_or_default(),
            experience: new.experience.unwrap_or_default(),
            status: new.status.unwrap_or_default(),
            utilization_rate: new.utilization_rate.unwrap_or(0),
            skills: new.skills,
            current_project_id: None,
            project_end_date: None,
            hire_date: new.hire_date.unwrap_or_else(|| Utc::now().date_naive()),
            location: new.location,
            salary: new.salary.unwrap_or(0),
            performance_rating: new.performance_rating.unwrap_or(3.0),
        };

        self.inner.write().await.resources.push(resource.clone());
        info!("Added resource {} ({})", resource.id, resource.name);
        Ok(resource)
    }

    async fn import_resources(
        &self,
        rows: Vec<ImportedResource>,
        mode: ImportMode,
    ) -> Vec<Resource> {
        let mut data = self.inner.write().await;

        if mode == ImportMode::Replace {
            data.resources.clear();
            for project in data.projects.iter_mut() {
                project.assigned_resources.clear();
            }
        }

        let mut imported = Vec::with_capacity(rows.len());
        for row in rows {
            let mut resource = row.resource;

            if let Some(project_name) = row.current_project {
                let project = data.projects.iter_mut().find(|p| p.name == project_name);
                match project {
                    // Only Assigned rows join a project's roster.
                    Some(project) if resource.status == ResourceStatus::Assigned => {
                        resource.current_project_id = Some(project.id.clone());
                        project.assigned_resources.push(resource.id.clone());
                    }
                    Some(_) => warn!(
                        "Imported resource {} is {} but names project '{project_name}'; left unlinked",
                        resource.id, resource.status
                    ),
                    None => warn!(
                        "Imported resource {} references unknown project '{project_name}'; left unlinked",
                        resource.id
                    ),
                }
            }

            data.resources.push(resource.clone());
            imported.push(resource);
        }

        info!("Imported {} resources ({mode:?})", imported.len());
        imported
    }

    async fn list_projects(&self) -> Vec<Project> {
        self.inner.read().await.projects.clone()
    }

    async fn get_project(&self, id: &str) -> Result<Project, StoreError> {
        let data = self.inner.read().await;
        data.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))
    }

    async fn add_project(&self, new: NewProject) -> Result<Project, StoreError> {
        require("name", &new.name)?;
        require("clientName", &new.client_name)?;
        require("engineeringManager", &new.engineering_manager)?;
        let start_date = new
            .start_date
            .ok_or_else(|| StoreError::Invalid("startDate is required".to_string()))?;
        if let Some(end_date) = new.end_date {
            if end_date < start_date {
                return Err(StoreError::Invalid(
                    "endDate must not be before startDate".to_string(),
                ));
            }
        }

        let project = Project {
            id: new_project_id(),
            name: new.name.trim().to_string(),
            client_name: new.client_name.trim().to_string(),
            engineering_manager: new.engineering_manager.trim().to_string(),
            description: new.description,
            status: new.status.unwrap_or_default(),
            start_date,
            end_date: new.end_date,
            budget: new.budget,
            required_skills: new.required_skills,
            assigned_resources: vec![],
        };

        self.inner.write().await.projects.push(project.clone());
        info!("Added project {} ({})", project.id, project.name);
        Ok(project)
    }

    async fn allocate(
        &self,
        resource_id: &str,
        project_id: &str,
    ) -> Result<AllocationEvent, StoreError> {
        let mut guard = self.inner.write().await;
        let data = &mut *guard;

        // Validate both sides before touching either.
        let project_idx = data
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;
        let resource_idx = data
            .resources
            .iter()
            .position(|r| r.id == resource_id)
            .ok_or_else(|| StoreError::ResourceNotFound(resource_id.to_string()))?;

        // A resource is rostered on at most one project.
        if let Some(holder) = data.projects.iter().find(|p| p.has_assigned(resource_id)) {
            return Err(StoreError::AlreadyAssigned {
                resource_id: resource_id.to_string(),
                project_id: holder.id.clone(),
            });
        }

        let resource = &mut data.resources[resource_idx];
        let project = &mut data.projects[project_idx];

        if !resource.is_available() {
            return Err(StoreError::NotAvailable {
                resource_id: resource_id.to_string(),
                status: resource.status,
            });
        }

        resource.status = ResourceStatus::Assigned;
        resource.current_project_id = Some(project.id.clone());
        resource.project_end_date = project.end_date;
        project.assigned_resources.push(resource.id.clone());

        info!(
            "Allocated {} ({}) to {} ({})",
            resource.id, resource.name, project.id, project.name
        );

        Ok(AllocationEvent {
            resource: resource.clone(),
            project: project.clone(),
            allocated_at: Utc::now(),
        })
    }

    async fn replace_all(&self, resources: Vec<Resource>, projects: Vec<Project>) {
        let mut data = self.inner.write().await;
        data.resources = resources;
        data.projects = projects;
    }

    async fn snapshot(&self) -> Dataset {
        self.inner.read().await.clone()
    }
}
