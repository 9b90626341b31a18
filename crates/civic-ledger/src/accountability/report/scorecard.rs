use super::super::domain::{Leader, Project, PromiseStatus};
use super::super::metrics::{
    approval_percentage, attendance_rate, citizen_rating_summary, count_active_projects,
    format_kes, leader_tenure, milestone_progress, project_budget_utilization,
    project_completion_rate, promise_fulfillment, scandal_count, schedule_slip_days,
    total_declared_wealth, wealth_growth,
};
use super::views::{LeaderScorecard, PerformanceLevel, ProjectCard};
use chrono::NaiveDate;

const STRONG_THRESHOLD: f64 = 75.0;
const FAIR_THRESHOLD: f64 = 50.0;

/// Everything the leader card shows, computed in one pass.
pub fn leader_scorecard(leader: &Leader, today: NaiveDate) -> LeaderScorecard {
    let completion = project_completion_rate(leader);
    let fulfillment = promise_fulfillment(leader);
    let attendance = attendance_rate(leader);

    let overdue_promises = leader
        .promises
        .iter()
        .filter(|promise| {
            matches!(
                promise.status.bucket(),
                PromiseStatus::InProgress | PromiseStatus::Pending
            ) && promise.due_date < today
        })
        .count();

    let performance_level = performance_level(
        leader,
        completion,
        fulfillment.fulfillment_rate,
        attendance,
    );

    LeaderScorecard {
        leader_id: leader.id.clone(),
        name: leader.name.clone(),
        position: leader.position.clone(),
        party: leader.party.clone(),
        county: leader.county.clone(),
        tenure: leader_tenure(leader.elected_date, leader.end_date),
        project_completion_rate: completion,
        promise_fulfillment_rate: fulfillment.fulfillment_rate,
        attendance_rate: attendance,
        total_projects: leader.projects.len(),
        active_projects: count_active_projects(&leader.projects),
        overdue_promises,
        scandal_count: scandal_count(leader),
        declared_wealth: total_declared_wealth(&leader.wealth),
        wealth_growth: wealth_growth(&leader.wealth),
        approval_percentage: approval_percentage(&leader.approval_rating),
        approval_votes: leader.approval_rating.total_votes,
        performance_level,
        performance_label: performance_level.label(),
    }
}

/// Mean of the rates the leader actually has records for.
fn performance_level(
    leader: &Leader,
    completion: u8,
    fulfillment: u8,
    attendance: u8,
) -> PerformanceLevel {
    let tracked: Vec<f64> = [
        (!leader.projects.is_empty()).then_some(completion),
        (!leader.promises.is_empty()).then_some(fulfillment),
        leader
            .attendance
            .iter()
            .any(|record| record.total > 0)
            .then_some(attendance),
    ]
    .into_iter()
    .flatten()
    .map(f64::from)
    .collect();

    if tracked.is_empty() {
        return PerformanceLevel::InsufficientData;
    }

    let average = (tracked.iter().sum::<f64>() / tracked.len() as f64).round();
    if average >= STRONG_THRESHOLD {
        PerformanceLevel::Strong
    } else if average >= FAIR_THRESHOLD {
        PerformanceLevel::Fair
    } else {
        PerformanceLevel::Weak
    }
}

pub fn project_card(project: &Project, today: NaiveDate) -> ProjectCard {
    ProjectCard {
        project_id: project.id.clone(),
        name: project.name.clone(),
        category: project.category.clone(),
        county: project.county().map(str::to_string),
        status: project.status,
        status_label: project.status.label(),
        tone: project.status.tone(),
        completion: project.completion_percentage().round() as u8,
        allocated: format_kes(project.budget.allocated),
        spent: format_kes(project.budget.spent),
        budget_utilization: project_budget_utilization(project),
        milestone_progress: milestone_progress(project),
        schedule_slip_days: schedule_slip_days(project, today),
        citizen_rating: citizen_rating_summary(project),
    }
}
