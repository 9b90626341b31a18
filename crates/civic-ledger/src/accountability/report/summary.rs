use super::super::domain::{Leader, Project, ProjectStatus};
use super::super::metrics::{
    self, attendance_totals, efficiency_score, project_completion_rate, promise_fulfillment,
    utilization_rate, PromiseStatusCounts,
};
use super::views::{
    AccountabilityDashboard, AttendanceEntry, BudgetUtilizationEntry, CategoryBreakdownEntry,
    LeaderFulfillmentEntry, ProjectPortfolioSummary, PromiseTrackerSummary,
    StatusBreakdownEntry, TrackedPromise,
};
use std::collections::BTreeMap;

pub const TOP_PERFORMER_LIMIT: usize = 5;

/// Flattens every leader's promises and ranks leaders by fulfillment.
///
/// Ties keep dataset order. Leaders with no tracked promises are left out of
/// the ranking.
pub fn promise_tracker(leaders: &[Leader]) -> PromiseTrackerSummary {
    let mut counts = PromiseStatusCounts::default();
    let mut promises = Vec::new();
    let mut ranking = Vec::new();

    for leader in leaders {
        for promise in &leader.promises {
            counts.record(promise.status);
            promises.push(TrackedPromise {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                promise_id: promise.id.clone(),
                description: promise.description.clone(),
                category: promise.category.clone(),
                due_date: promise.due_date,
                status: promise.status,
                status_label: promise.status.label(),
                tone: promise.status.tone(),
            });
        }

        if leader.promises.is_empty() {
            continue;
        }

        let fulfillment = promise_fulfillment(leader);
        ranking.push(LeaderFulfillmentEntry {
            leader_id: leader.id.clone(),
            leader_name: leader.name.clone(),
            fulfilled: fulfillment.counts.fulfilled,
            total: fulfillment.counts.total(),
            fulfillment_rate: fulfillment.fulfillment_rate,
        });
    }

    ranking.sort_by(|a, b| b.fulfillment_rate.cmp(&a.fulfillment_rate));
    ranking.truncate(TOP_PERFORMER_LIMIT);

    PromiseTrackerSummary {
        total: counts.total(),
        overall_fulfillment_rate: counts.fulfillment_rate(),
        counts,
        promises,
        top_performers: ranking,
    }
}

pub fn attendance_ranking(leaders: &[Leader]) -> Vec<AttendanceEntry> {
    let mut entries: Vec<AttendanceEntry> = leaders
        .iter()
        .map(|leader| {
            let (present, total) = attendance_totals(leader);
            AttendanceEntry {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                present,
                total,
                attendance_rate: metrics::attendance_rate(leader),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.attendance_rate.cmp(&a.attendance_rate));
    entries
}

pub fn budget_utilization(leaders: &[Leader]) -> Vec<BudgetUtilizationEntry> {
    let mut entries: Vec<BudgetUtilizationEntry> = leaders
        .iter()
        .map(|leader| {
            let (allocated, spent) = leader
                .projects
                .iter()
                .fold((0.0, 0.0), |(allocated, spent), project| {
                    (
                        allocated + finite_or_zero(project.budget.allocated),
                        spent + finite_or_zero(project.budget.spent),
                    )
                });

            // Overspend keeps its raw ratio so it drags the efficiency score down.
            let raw_utilization = if allocated > 0.0 {
                spent / allocated * 100.0
            } else {
                0.0
            };
            let efficiency_rate = project_completion_rate(leader);

            BudgetUtilizationEntry {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                allocated,
                spent,
                utilization_rate: utilization_rate(allocated, spent),
                efficiency_rate,
                efficiency_score: efficiency_score(f64::from(efficiency_rate), raw_utilization),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.efficiency_score.cmp(&a.efficiency_score));
    entries
}

pub fn project_portfolio(projects: &[Project]) -> ProjectPortfolioSummary {
    let mut status_counts: BTreeMap<usize, usize> = BTreeMap::new();
    let mut categories: BTreeMap<String, CategoryBreakdownEntry> = BTreeMap::new();
    let mut total_allocated = 0.0;
    let mut total_spent = 0.0;
    let mut completion_sum = 0.0;
    let mut beneficiaries = 0u64;
    let mut citizen_reports = 0usize;

    for project in projects {
        let status_index = ProjectStatus::ordered()
            .iter()
            .position(|status| *status == project.status)
            .unwrap_or(ProjectStatus::ordered().len() - 1);
        *status_counts.entry(status_index).or_default() += 1;

        let allocated = finite_or_zero(project.budget.allocated);
        let spent = finite_or_zero(project.budget.spent);
        total_allocated += allocated;
        total_spent += spent;
        completion_sum += project.completion_percentage();
        beneficiaries += project
            .impact
            .as_ref()
            .map(|impact| impact.beneficiaries)
            .unwrap_or(0);
        citizen_reports += project.citizen_reports.len();

        let category = if project.category.trim().is_empty() {
            "Uncategorized".to_string()
        } else {
            project.category.trim().to_string()
        };
        let entry = categories
            .entry(category.clone())
            .or_insert_with(|| CategoryBreakdownEntry {
                category,
                projects: 0,
                allocated: 0.0,
                spent: 0.0,
                utilization_rate: 0,
            });
        entry.projects += 1;
        entry.allocated += allocated;
        entry.spent += spent;
    }

    let by_status = ProjectStatus::ordered()
        .into_iter()
        .enumerate()
        .filter_map(|(index, status)| {
            status_counts
                .get(&index)
                .map(|count| StatusBreakdownEntry {
                    status,
                    status_label: status.label(),
                    tone: status.tone(),
                    count: *count,
                })
        })
        .collect();

    let by_category = categories
        .into_values()
        .map(|mut entry| {
            entry.utilization_rate = utilization_rate(entry.allocated, entry.spent);
            entry
        })
        .collect();

    let average_completion = if projects.is_empty() {
        0
    } else {
        (completion_sum / projects.len() as f64)
            .round()
            .clamp(0.0, 100.0) as u8
    };

    ProjectPortfolioSummary {
        total_projects: projects.len(),
        active_projects: metrics::count_active_projects(projects),
        by_status,
        by_category,
        total_allocated,
        total_spent,
        utilization_rate: utilization_rate(total_allocated, total_spent),
        average_completion,
        beneficiaries,
        citizen_reports,
    }
}

impl AccountabilityDashboard {
    pub fn build(leaders: &[Leader], projects: &[Project]) -> Self {
        Self {
            promise_tracker: promise_tracker(leaders),
            attendance: attendance_ranking(leaders),
            budget_utilization: budget_utilization(leaders),
            projects: project_portfolio(projects),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
