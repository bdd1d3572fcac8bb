pub mod project;
pub mod resource;

pub use project::{NewProject, Project, ProjectStatus};
pub use resource::{ExperienceLevel, NewResource, Resource, ResourceStatus, Role};
