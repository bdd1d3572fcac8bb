//! Aggregate analytics reports.
//!
//! Each report is one variant of `Report`; the set is closed so every export
//! has a known shape.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::kpi::{compute_kpis, rounded_mean, KpiSummary};
use crate::models::{ExperienceLevel, Project, Resource, ResourceStatus};

const TOP_SKILLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Kpis,
    Departments,
    Skills,
    Experience,
    Performance,
    Overview,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Kpis,
        ReportKind::Departments,
        ReportKind::Skills,
        ReportKind::Experience,
        ReportKind::Performance,
        ReportKind::Overview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Kpis => "kpis",
            ReportKind::Departments => "departments",
            ReportKind::Skills => "skills",
            ReportKind::Experience => "experience",
            ReportKind::Performance => "performance",
            ReportKind::Overview => "overview",
        }
    }

    /// Filename stem used when the report is exported.
    pub fn export_label(&self) -> &'static str {
        match self {
            ReportKind::Overview => "analytics_report",
            ReportKind::Kpis => "kpis_analytics",
            ReportKind::Departments => "departments_analytics",
            ReportKind::Skills => "skills_analytics",
            ReportKind::Experience => "experience_analytics",
            ReportKind::Performance => "performance_analytics",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown report '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub department: String,
    pub total_resources: usize,
    pub available: usize,
    pub assigned: usize,
    pub on_leave: usize,
    pub training: usize,
    pub avg_utilization: i64,
    pub avg_salary: i64,
    pub avg_performance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillStats {
    pub skill: String,
    pub count: usize,
    pub avg_utilization: i64,
    pub avg_salary: i64,
    pub avg_performance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    pub level: ExperienceLevel,
    pub count: usize,
    pub avg_salary: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub name: String,
    pub performance: f64,
    /// Salary in thousands.
    pub salary_k: f64,
    pub utilization: i32,
    pub department: String,
    pub experience: ExperienceLevel,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub kpis: KpiSummary,
    pub departments: Vec<DepartmentStats>,
    pub skills: Vec<SkillStats>,
    pub experience: Vec<ExperienceStats>,
    pub performance: Vec<PerformancePoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Report {
    Kpis(KpiSummary),
    Departments(Vec<DepartmentStats>),
    Skills(Vec<SkillStats>),
    Experience(Vec<ExperienceStats>),
    Performance(Vec<PerformancePoint>),
    Overview(Box<OverviewReport>),
}

pub fn build_report(kind: ReportKind, resources: &[Resource], projects: &[Project]) -> Report {
    match kind {
        ReportKind::Kpis => Report::Kpis(compute_kpis(resources, projects)),
        ReportKind::Departments => Report::Departments(department_breakdown(resources)),
        ReportKind::Skills => Report::Skills(top_skills(resources)),
        ReportKind::Experience => Report::Experience(experience_distribution(resources)),
        ReportKind::Performance => Report::Performance(performance_vs_salary(resources)),
        ReportKind::Overview => Report::Overview(Box::new(OverviewReport {
            kpis: compute_kpis(resources, projects),
            departments: department_breakdown(resources),
            skills: top_skills(resources),
            experience: experience_distribution(resources),
            performance: performance_vs_salary(resources),
        })),
    }
}

/// Groups `resources` by `key`, keeping groups in order of first appearance.
fn group_by<'a, K>(
    resources: &'a [Resource],
    keys: impl Fn(&'a Resource) -> Vec<K>,
) -> Vec<(K, Vec<&'a Resource>)>
where
    K: std::hash::Hash + Eq + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&Resource>)> = Vec::new();
    for resource in resources {
        for key in keys(resource) {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((key.clone(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(resource);
        }
    }
    groups
}

fn one_decimal_mean(members: &[&Resource]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let mean = members.iter().map(|r| r.performance_rating).sum::<f64>() / members.len() as f64;
    (mean * 10.0).round() / 10.0
}

pub fn department_breakdown(resources: &[Resource]) -> Vec<DepartmentStats> {
    group_by(resources, |r| vec![r.department.clone()])
        .into_iter()
        .map(|(department, members)| {
            let count = |status: ResourceStatus| members.iter().filter(|r| r.status == status).count();
            DepartmentStats {
                total_resources: members.len(),
                available: count(ResourceStatus::Available),
                assigned: count(ResourceStatus::Assigned),
                on_leave: count(ResourceStatus::OnLeave),
                training: count(ResourceStatus::Training),
                avg_utilization: rounded_mean(members.iter().map(|r| f64::from(r.utilization_rate))),
                avg_salary: rounded_mean(members.iter().map(|r| r.salary as f64)),
                avg_performance: one_decimal_mean(&members),
                department,
            }
        })
        .collect()
}

/// The ten most common skills, most common first. Ties keep first-seen order.
pub fn top_skills(resources: &[Resource]) -> Vec<SkillStats> {
    let mut stats: Vec<SkillStats> = group_by(resources, |r| r.skills.clone())
        .into_iter()
        .map(|(skill, members)| SkillStats {
            skill,
            count: members.len(),
            avg_utilization: rounded_mean(members.iter().map(|r| f64::from(r.utilization_rate))),
            avg_salary: rounded_mean(members.iter().map(|r| r.salary as f64)),
            avg_performance: one_decimal_mean(&members),
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(TOP_SKILLS);
    stats
}

pub fn experience_distribution(resources: &[Resource]) -> Vec<ExperienceStats> {
    ExperienceLevel::ALL
        .iter()
        .filter_map(|&level| {
            let members: Vec<&Resource> = resources.iter().filter(|r| r.experience == level).collect();
            if members.is_empty() {
                return None;
            }
            Some(ExperienceStats {
                level,
                count: members.len(),
                avg_salary: rounded_mean(members.iter().map(|r| r.salary as f64)),
            })
        })
        .collect()
}

pub fn performance_vs_salary(resources: &[Resource]) -> Vec<PerformancePoint> {
    resources
        .iter()
        .map(|r| PerformancePoint {
            name: r.name.clone(),
            performance: r.performance_rating,
            salary_k: r.salary as f64 / 1000.0,
            utilization: r.utilization_rate,
            department: r.department.clone(),
            experience: r.experience,
        })
        .collect()
}
