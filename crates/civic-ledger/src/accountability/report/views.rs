use super::super::domain::{ProjectStatus, PromiseStatus, StatusTone};
use super::super::metrics::{PromiseStatusCounts, RatingSummary};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TrackedPromise {
    pub leader_id: String,
    pub leader_name: String,
    pub promise_id: String,
    pub description: String,
    pub category: String,
    pub due_date: NaiveDate,
    pub status: PromiseStatus,
    pub status_label: &'static str,
    pub tone: StatusTone,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderFulfillmentEntry {
    pub leader_id: String,
    pub leader_name: String,
    pub fulfilled: usize,
    pub total: usize,
    pub fulfillment_rate: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromiseTrackerSummary {
    pub total: usize,
    pub counts: PromiseStatusCounts,
    pub overall_fulfillment_rate: u8,
    pub promises: Vec<TrackedPromise>,
    pub top_performers: Vec<LeaderFulfillmentEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    pub leader_id: String,
    pub leader_name: String,
    pub present: u64,
    pub total: u64,
    pub attendance_rate: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUtilizationEntry {
    pub leader_id: String,
    pub leader_name: String,
    pub allocated: f64,
    pub spent: f64,
    pub utilization_rate: u8,
    pub efficiency_rate: u8,
    pub efficiency_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBreakdownEntry {
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub tone: StatusTone,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdownEntry {
    pub category: String,
    pub projects: usize,
    pub allocated: f64,
    pub spent: f64,
    pub utilization_rate: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectPortfolioSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub by_status: Vec<StatusBreakdownEntry>,
    pub by_category: Vec<CategoryBreakdownEntry>,
    pub total_allocated: f64,
    pub total_spent: f64,
    pub utilization_rate: u8,
    pub average_completion: u8,
    pub beneficiaries: u64,
    pub citizen_reports: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Strong,
    Fair,
    Weak,
    InsufficientData,
}

impl PerformanceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Fair => "Fair",
            Self::Weak => "Needs Improvement",
            Self::InsufficientData => "Insufficient Data",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderScorecard {
    pub leader_id: String,
    pub name: String,
    pub position: String,
    pub party: String,
    pub county: String,
    pub tenure: String,
    pub project_completion_rate: u8,
    pub promise_fulfillment_rate: u8,
    pub attendance_rate: u8,
    pub total_projects: usize,
    pub active_projects: usize,
    pub overdue_promises: usize,
    pub scandal_count: usize,
    pub declared_wealth: String,
    pub wealth_growth: i64,
    pub approval_percentage: u8,
    pub approval_votes: u64,
    pub performance_level: PerformanceLevel,
    pub performance_label: &'static str,
}

/// Project tracker card with the derived progress figures.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub project_id: String,
    pub name: String,
    pub category: String,
    pub county: Option<String>,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub tone: StatusTone,
    pub completion: u8,
    pub allocated: String,
    pub spent: String,
    pub budget_utilization: u8,
    pub milestone_progress: u8,
    pub schedule_slip_days: i64,
    pub citizen_rating: RatingSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountabilityDashboard {
    pub promise_tracker: PromiseTrackerSummary,
    pub attendance: Vec<AttendanceEntry>,
    pub budget_utilization: Vec<BudgetUtilizationEntry>,
    pub projects: ProjectPortfolioSummary,
}
