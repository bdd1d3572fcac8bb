//! Mock dataset generation used at startup and by the periodic refresh.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    ExperienceLevel, Project, ProjectStatus, Resource, ResourceStatus, Role,
};

const DEPARTMENTS: &[&str] = &["Engineering", "Product", "Design", "QA", "Data", "DevOps"];

const LOCATIONS: &[&str] = &[
    "New York",
    "San Francisco",
    "London",
    "Berlin",
    "Toronto",
    "Remote",
];

pub const SKILLS: &[&str] = &[
    "React",
    "Node.js",
    "Python",
    "TypeScript",
    "AWS",
    "Docker",
    "Kubernetes",
    "MongoDB",
    "PostgreSQL",
    "GraphQL",
    "REST API",
    "Machine Learning",
    "Data Analysis",
    "UI/UX Design",
    "Agile",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Avery", "Quinn", "Blake", "Sage",
    "River", "Phoenix", "Rowan", "Parker", "Cameron", "Drew",
];

const LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
    "Gonzalez",
    "Wilson",
    "Anderson",
    "Thomas",
];

/// The default project catalogue.
pub fn seed_projects(today: NaiveDate) -> Vec<Project> {
    let catalogue: [(&str, &str, &str, &[&str]); 4] = [
        (
            "E-commerce Platform",
            "ShopMax",
            "Morgan Davis",
            &["React", "Node.js", "PostgreSQL", "AWS"],
        ),
        (
            "Mobile Banking App",
            "First Federal",
            "Riley Garcia",
            &["React", "TypeScript", "REST API", "Docker"],
        ),
        (
            "Healthcare Dashboard",
            "CareWell",
            "Quinn Wilson",
            &["TypeScript", "GraphQL", "MongoDB", "UI/UX Design"],
        ),
        (
            "AI Analytics Tool",
            "Insight Labs",
            "Avery Thomas",
            &["Python", "Machine Learning", "Data Analysis", "Kubernetes"],
        ),
    ];

    catalogue
        .iter()
        .enumerate()
        .map(|(i, (name, client, manager, skills))| Project {
            id: format!("project-{}", i + 1),
            name: name.to_string(),
            client_name: client.to_string(),
            engineering_manager: manager.to_string(),
            description: None,
            status: ProjectStatus::Active,
            start_date: today - Duration::days(30 * (i as i64 + 1)),
            end_date: Some(today + Duration::days(90 * (i as i64 + 1))),
            budget: Some(250_000 * (i as i64 + 1)),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            assigned_resources: vec![],
        })
        .collect()
}

/// Generates `count` random resources with ids `RES-001`, `RES-002`, ...
///
/// Every `Assigned` resource is attached to a random member of `projects`
/// (both sides updated), so the result honours the current-project invariant.
/// With no projects to attach to, nobody is generated as `Assigned`.
pub fn generate_resources<R: Rng + ?Sized>(
    count: usize,
    projects: &mut [Project],
    today: NaiveDate,
    rng: &mut R,
) -> Vec<Resource> {
    (0..count)
        .map(|index| {
            let first = pick(FIRST_NAMES, rng);
            let last = pick(LAST_NAMES, rng);

            let mut status = *ResourceStatus::ALL.choose(rng).unwrap_or(&ResourceStatus::Available);
            if status == ResourceStatus::Assigned && projects.is_empty() {
                status = ResourceStatus::Available;
            }

            let skill_count = rng.gen_range(2..=6);
            let skills = SKILLS
                .choose_multiple(rng, skill_count)
                .map(|s| s.to_string())
                .collect();

            let id = format!("RES-{:03}", index + 1);

            let (current_project_id, project_end_date) = if status == ResourceStatus::Assigned {
                let project_idx = rng.gen_range(0..projects.len());
                let project = &mut projects[project_idx];
                project.assigned_resources.push(id.clone());
                (
                    Some(project.id.clone()),
                    Some(today + Duration::days(rng.gen_range(0..90))),
                )
            } else {
                (None, None)
            };

            Resource {
                id,
                name: format!("{first} {last}"),
                email: format!("{}.{}@company.com", first.to_lowercase(), last.to_lowercase()),
                department: pick(DEPARTMENTS, rng).to_string(),
                role: *Role::ALL.choose(rng).unwrap_or(&Role::FrontendDeveloper),
                experience: *ExperienceLevel::ALL
                    .choose(rng)
                    .unwrap_or(&ExperienceLevel::MidLevel),
                status,
                utilization_rate: rng.gen_range(60..100),
                skills,
                current_project_id,
                project_end_date,
                hire_date: today - Duration::days(rng.gen_range(0..1095)),
                location: pick(LOCATIONS, rng).to_string(),
                salary: rng.gen_range(50_000..150_000),
                performance_rating: f64::from(rng.gen_range(3..=5_i32)),
            }
        })
        .collect()
}

/// Seed projects plus `count` resources allocated across them.
pub fn generate_dataset<R: Rng + ?Sized>(
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> (Vec<Resource>, Vec<Project>) {
    let mut projects = seed_projects(today);
    let resources = generate_resources(count, &mut projects, today, rng);
    (resources, projects)
}

fn pick<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}
