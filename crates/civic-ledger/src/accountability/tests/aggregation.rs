use super::common::*;

use crate::accountability::domain::{ProjectStatus, PromiseStatus};
use crate::accountability::report::{
    attendance_ranking, budget_utilization, leader_scorecard, project_portfolio,
    promise_tracker, AccountabilityDashboard, PerformanceLevel, TOP_PERFORMER_LIMIT,
};

#[test]
fn promise_tracker_counts_sum_to_total() {
    let leaders = vec![
        with_promises(
            leader("l-1", "Akinyi"),
            &[
                PromiseStatus::Fulfilled,
                PromiseStatus::Broken,
                PromiseStatus::Unknown,
            ],
        ),
        with_promises(
            leader("l-2", "Barasa"),
            &[PromiseStatus::InProgress, PromiseStatus::Fulfilled],
        ),
    ];

    let summary = promise_tracker(&leaders);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.promises.len(), 5);
    assert_eq!(summary.counts.fulfilled, 2);
    assert_eq!(summary.counts.pending, 1);
    assert_eq!(
        summary.counts.fulfilled
            + summary.counts.in_progress
            + summary.counts.broken
            + summary.counts.pending,
        summary.total
    );
    assert_eq!(summary.overall_fulfillment_rate, 40);
}

#[test]
fn top_performers_are_capped_sorted_and_stable() {
    let mut leaders = Vec::new();
    for index in 0..7 {
        let statuses: Vec<PromiseStatus> = (0..4)
            .map(|slot| {
                if slot < index % 4 {
                    PromiseStatus::Fulfilled
                } else {
                    PromiseStatus::Pending
                }
            })
            .collect();
        leaders.push(with_promises(
            leader(&format!("l-{index}"), &format!("Leader {index}")),
            &statuses,
        ));
    }
    leaders.push(leader("l-silent", "No Promises"));

    let summary = promise_tracker(&leaders);
    let ranked: Vec<(&str, u8)> = summary
        .top_performers
        .iter()
        .map(|entry| (entry.leader_id.as_str(), entry.fulfillment_rate))
        .collect();

    assert_eq!(ranked.len(), TOP_PERFORMER_LIMIT);
    assert_eq!(
        ranked,
        vec![
            ("l-3", 75),
            ("l-2", 50),
            ("l-6", 50),
            ("l-1", 25),
            ("l-5", 25),
        ]
    );
    assert!(summary
        .top_performers
        .iter()
        .all(|entry| entry.leader_id != "l-silent"));
}

#[test]
fn attendance_ranking_sorts_descending_and_guards_empty_registers() {
    let mut diligent = leader("l-1", "Diligent");
    diligent.attendance = vec![attendance(19, 20)];
    let mut absent = leader("l-2", "Absent");
    absent.attendance = vec![attendance(5, 20)];
    let untracked = leader("l-3", "Untracked");

    let entries = attendance_ranking(&[absent, untracked, diligent]);

    let rates: Vec<u8> = entries.iter().map(|entry| entry.attendance_rate).collect();
    assert_eq!(rates, vec![95, 25, 0]);
    assert_eq!(entries[0].leader_id, "l-1");
    assert_eq!(entries[2].total, 0);
}

#[test]
fn overspending_lowers_budget_efficiency() {
    let mut on_budget = leader("l-1", "On Budget");
    on_budget.projects = vec![project(
        "p-1",
        "Water",
        ProjectStatus::InProgress,
        60.0,
        100.0,
        60.0,
    )];
    let mut overspent = leader("l-2", "Overspent");
    overspent.projects = vec![project(
        "p-2",
        "Water",
        ProjectStatus::InProgress,
        60.0,
        100.0,
        120.0,
    )];
    let idle = leader("l-3", "Idle");

    let entries = budget_utilization(&[overspent, idle, on_budget]);

    assert_eq!(entries[0].leader_id, "l-1");
    assert_eq!(entries[0].efficiency_score, 100);
    assert_eq!(entries[1].leader_id, "l-2");
    assert_eq!(entries[1].utilization_rate, 100);
    assert_eq!(entries[1].efficiency_score, 50);
    assert_eq!(entries[2].efficiency_score, 0);
    assert_eq!(entries[2].allocated, 0.0);
}

#[test]
fn project_portfolio_groups_by_status_and_category() {
    let projects = vec![
        project("p-1", "Water", ProjectStatus::InProgress, 50.0, 100.0, 40.0),
        project("p-2", "Water", ProjectStatus::Completed, 100.0, 200.0, 200.0),
        project("p-3", " ", ProjectStatus::Unknown, 0.0, 0.0, 0.0),
        project("p-4", "Health", ProjectStatus::InProgress, 30.0, 100.0, 10.0),
    ];

    let summary = project_portfolio(&projects);

    assert_eq!(summary.total_projects, 4);
    assert_eq!(summary.active_projects, 2);
    assert_eq!(summary.average_completion, 45);
    assert_eq!(summary.utilization_rate, 63);

    let statuses: Vec<(ProjectStatus, usize)> = summary
        .by_status
        .iter()
        .map(|entry| (entry.status, entry.count))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (ProjectStatus::InProgress, 2),
            (ProjectStatus::Completed, 1),
            (ProjectStatus::Unknown, 1),
        ]
    );

    let categories: Vec<(&str, usize, u8)> = summary
        .by_category
        .iter()
        .map(|entry| (entry.category.as_str(), entry.projects, entry.utilization_rate))
        .collect();
    assert_eq!(
        categories,
        vec![("Health", 1, 10), ("Uncategorized", 1, 0), ("Water", 2, 80)]
    );
}

#[test]
fn empty_dataset_produces_zeroed_dashboard() {
    let dashboard = AccountabilityDashboard::build(&[], &[]);

    assert_eq!(dashboard.promise_tracker.total, 0);
    assert_eq!(dashboard.promise_tracker.overall_fulfillment_rate, 0);
    assert!(dashboard.promise_tracker.top_performers.is_empty());
    assert!(dashboard.attendance.is_empty());
    assert!(dashboard.budget_utilization.is_empty());
    assert_eq!(dashboard.projects.total_projects, 0);
    assert_eq!(dashboard.projects.average_completion, 0);
    assert_eq!(dashboard.projects.utilization_rate, 0);
}

#[test]
fn scorecard_combines_leader_metrics() {
    let mut leader = with_promises(
        leader("l-1", "Akinyi"),
        &[PromiseStatus::Fulfilled, PromiseStatus::Pending],
    );
    leader.attendance = vec![attendance(18, 20)];
    leader.projects = vec![project(
        "p-1",
        "Water",
        ProjectStatus::InProgress,
        80.0,
        100.0,
        50.0,
    )];
    leader.wealth = vec![wealth(2022, 10_000_000.0), wealth(2024, 12_500_000.0)];

    let scorecard = leader_scorecard(&leader, date(2026, 1, 1));

    assert_eq!(scorecard.project_completion_rate, 80);
    assert_eq!(scorecard.promise_fulfillment_rate, 50);
    assert_eq!(scorecard.attendance_rate, 90);
    assert_eq!(scorecard.active_projects, 1);
    assert_eq!(scorecard.overdue_promises, 1);
    assert_eq!(scorecard.declared_wealth, "KES 12.5M");
    assert_eq!(scorecard.wealth_growth, 25);
    assert_eq!(scorecard.tenure, "2022 – Present");
    // (80 + 50 + 90) / 3 = 73
    assert_eq!(scorecard.performance_level, PerformanceLevel::Fair);
}

#[test]
fn scorecard_overdue_count_skips_settled_promises() {
    let leader = with_promises(
        leader("l-2", "Barasa"),
        &[
            PromiseStatus::Fulfilled,
            PromiseStatus::Broken,
            PromiseStatus::InProgress,
            PromiseStatus::Pending,
            PromiseStatus::Unknown,
        ],
    );

    assert_eq!(leader_scorecard(&leader, date(2026, 1, 1)).overdue_promises, 3);
    assert_eq!(leader_scorecard(&leader, date(2025, 1, 1)).overdue_promises, 0);
}

#[test]
fn performance_level_rounds_the_mean() {
    let mut leader = leader("l-3", "Chebet");
    leader.attendance = vec![attendance(75, 100)];
    leader.projects = vec![project(
        "p-1",
        "Clinic",
        ProjectStatus::InProgress,
        74.0,
        100.0,
        50.0,
    )];

    // (75 + 74) / 2 = 74.5
    let scorecard = leader_scorecard(&leader, date(2026, 1, 1));
    assert_eq!(scorecard.performance_level, PerformanceLevel::Strong);
}

#[test]
fn scorecard_without_records_reports_insufficient_data() {
    let scorecard = leader_scorecard(&leader("l-9", "Newcomer"), date(2026, 1, 1));

    assert_eq!(scorecard.performance_level, PerformanceLevel::InsufficientData);
    assert_eq!(scorecard.declared_wealth, "N/A");
    assert_eq!(scorecard.wealth_growth, 0);
    assert_eq!(scorecard.project_completion_rate, 0);
}
