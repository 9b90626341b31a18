mod comparison;
mod scorecard;
mod summary;
pub mod views;

pub use comparison::{
    compare_leaders, ComparisonMetric, LeaderSelection, UnknownMetricError, MAX_COMPARED_LEADERS,
};
pub use scorecard::{leader_scorecard, project_card};
pub use summary::{
    attendance_ranking, budget_utilization, project_portfolio, promise_tracker,
    TOP_PERFORMER_LIMIT,
};
pub use views::{
    AccountabilityDashboard, ComparisonPoint, LeaderScorecard, PerformanceLevel,
    ProjectCard,
};
