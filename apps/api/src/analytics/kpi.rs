use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, Project, Resource, ResourceStatus};

/// Headline counters for the dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_resources: usize,
    /// Bench.
    pub available: usize,
    /// Billable.
    pub assigned: usize,
    pub on_leave: usize,
    /// Shadow.
    pub training: usize,
    /// Junior-level resources.
    pub associates: usize,
    pub total_projects: usize,
    pub average_utilization: i64,
    pub average_salary: i64,
    /// Salary cost of everyone currently Assigned.
    pub assigned_salary_cost: i64,
}

pub fn compute_kpis(resources: &[Resource], projects: &[Project]) -> KpiSummary {
    let count = |status: ResourceStatus| resources.iter().filter(|r| r.status == status).count();

    KpiSummary {
        total_resources: resources.len(),
        available: count(ResourceStatus::Available),
        assigned: count(ResourceStatus::Assigned),
        on_leave: count(ResourceStatus::OnLeave),
        training: count(ResourceStatus::Training),
        associates: resources
            .iter()
            .filter(|r| r.experience == ExperienceLevel::Junior)
            .count(),
        total_projects: projects.len(),
        average_utilization: rounded_mean(resources.iter().map(|r| f64::from(r.utilization_rate))),
        average_salary: rounded_mean(resources.iter().map(|r| r.salary as f64)),
        assigned_salary_cost: resources
            .iter()
            .filter(|r| r.status == ResourceStatus::Assigned)
            .map(|r| r.salary)
            .sum(),
    }
}

/// Mean rounded to the nearest integer; 0 for an empty input.
pub(crate) fn rounded_mean(values: impl Iterator<Item = f64>) -> i64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return 0;
    }
    (sum / n as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{make_project, make_resource};

    #[test]
    fn test_counts_by_status_sum_to_total() {
        let mut resources = vec![
            make_resource("RES-001", &[], 60, ExperienceLevel::Junior),
            make_resource("RES-002", &[], 70, ExperienceLevel::Senior),
            make_resource("RES-003", &[], 80, ExperienceLevel::Junior),
            make_resource("RES-004", &[], 91, ExperienceLevel::Lead),
        ];
        resources[1].status = ResourceStatus::Assigned;
        resources[1].salary = 120_000;
        resources[2].status = ResourceStatus::OnLeave;
        resources[3].status = ResourceStatus::Training;

        let kpis = compute_kpis(&resources, &[make_project(&[])]);
        assert_eq!(kpis.total_resources, 4);
        assert_eq!(
            kpis.available + kpis.assigned + kpis.on_leave + kpis.training,
            kpis.total_resources
        );
        assert_eq!(kpis.associates, 2);
        assert_eq!(kpis.total_projects, 1);
        // (60 + 70 + 80 + 91) / 4 = 75.25
        assert_eq!(kpis.average_utilization, 75);
        assert_eq!(kpis.average_salary, 105_000);
        assert_eq!(kpis.assigned_salary_cost, 120_000);
    }

    #[test]
    fn test_empty_pool_has_zero_averages() {
        let kpis = compute_kpis(&[], &[]);
        assert_eq!(kpis.total_resources, 0);
        assert_eq!(kpis.average_utilization, 0);
        assert_eq!(kpis.average_salary, 0);
    }
}
