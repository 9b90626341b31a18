//! Accountability metrics for elected leaders and public projects.
//!
//! `metrics` holds the per-entity calculations, `filters` the directory and
//! tracker searches, and `report` the cross-leader aggregates that back the
//! dashboard views.

pub mod citizen;
pub mod domain;
pub mod filters;
pub mod metrics;
pub mod report;
pub mod router;

#[cfg(test)]
mod tests;

pub use citizen::{
    validate_submission, CitizenReportSubmission, ReportValidationError, MAX_MEDIA_ATTACHMENTS,
};
pub use domain::{
    AttendanceRecord, CitizenReport, CitizenReportStatus, Leader, Project, ProjectStatus,
    Promise, PromiseStatus, StatusTone, WealthRecord,
};
pub use filters::{LeaderFilter, ProjectFilter};
pub use report::{
    compare_leaders, leader_scorecard, project_card, AccountabilityDashboard, ComparisonMetric,
    ComparisonPoint, LeaderScorecard, LeaderSelection, MAX_COMPARED_LEADERS,
};
pub use router::accountability_router;
