use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ExperienceLevel, Resource, ResourceStatus};

/// Criteria for narrowing the resource pool. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub department: Option<String>,
    pub status: Option<ResourceStatus>,
    pub experience: Option<ExperienceLevel>,
    pub search: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(department) = &self.department {
            if &resource.department != department {
                return false;
            }
        }
        if let Some(status) = self.status {
            if resource.status != status {
                return false;
            }
        }
        if let Some(experience) = self.experience {
            if resource.experience != experience {
                return false;
            }
        }
        match &self.search {
            Some(search) => matches_search(resource, &search.to_lowercase()),
            None => true,
        }
    }
}

/// Case-insensitive substring test over name, role and every skill.
fn matches_search(resource: &Resource, needle_lower: &str) -> bool {
    resource.name.to_lowercase().contains(needle_lower)
        || resource.role.as_str().to_lowercase().contains(needle_lower)
        || resource
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle_lower))
}

/// Returns the resources satisfying every criterion, in pool order.
pub fn filter_resources<'a>(pool: &'a [Resource], filter: &ResourceFilter) -> Vec<&'a Resource> {
    pool.iter().filter(|r| filter.matches(r)).collect()
}

/// Raw query-string form of `ResourceFilter`. Empty strings mean "no filter",
/// matching what an untouched dropdown submits.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceQuery {
    pub department: Option<String>,
    pub status: Option<String>,
    pub experience: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ResourceQuery> for ResourceFilter {
    type Error = AppError;

    fn try_from(query: ResourceQuery) -> Result<Self, Self::Error> {
        let status = non_empty(query.status)
            .map(|s| s.parse::<ResourceStatus>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let experience = non_empty(query.experience)
            .map(|s| s.parse::<ExperienceLevel>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(ResourceFilter {
            department: non_empty(query.department),
            status,
            experience,
            search: non_empty(query.search),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
