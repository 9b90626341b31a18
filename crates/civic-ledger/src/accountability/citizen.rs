//! Citizen report intake for the project tracker.
//!
//! Submissions are validated and echoed back as a [`CitizenReport`]; nothing
//! is stored.

use super::domain::{CitizenRating, CitizenReport, CitizenReportStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub const MAX_MEDIA_ATTACHMENTS: usize = 5;
const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenReportSubmission {
    pub username: String,
    pub status: CitizenReportStatus,
    pub description: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub rating: CitizenRating,
}

/// Validation errors raised before a report is accepted.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    #[error("a username is required")]
    MissingUsername,
    #[error("a description of what was observed is required")]
    MissingDescription,
    #[error("{axis} rating must be between 1 and 5 (found {found})")]
    RatingOutOfRange { axis: &'static str, found: u8 },
    #[error("at most {max} media attachments are allowed (found {found})")]
    TooManyAttachments { max: usize, found: usize },
}

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id(project_id: &str) -> String {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{project_id}-report-{id:06}")
}

pub fn validate_submission(
    project_id: &str,
    submission: CitizenReportSubmission,
    received_at: DateTime<Utc>,
) -> Result<CitizenReport, ReportValidationError> {
    let username = submission.username.trim();
    if username.is_empty() {
        return Err(ReportValidationError::MissingUsername);
    }

    let description = submission.description.trim();
    if description.is_empty() {
        return Err(ReportValidationError::MissingDescription);
    }

    for (axis, found) in [
        ("progress", submission.rating.progress),
        ("quality", submission.rating.quality),
        ("impact", submission.rating.impact),
    ] {
        if !RATING_RANGE.contains(&found) {
            return Err(ReportValidationError::RatingOutOfRange { axis, found });
        }
    }

    let media_urls: Vec<String> = submission
        .media_urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    if media_urls.len() > MAX_MEDIA_ATTACHMENTS {
        return Err(ReportValidationError::TooManyAttachments {
            max: MAX_MEDIA_ATTACHMENTS,
            found: media_urls.len(),
        });
    }

    Ok(CitizenReport {
        id: next_report_id(project_id),
        username: username.to_string(),
        timestamp: received_at,
        status: submission.status,
        description: description.to_string(),
        media_urls,
        rating: submission.rating,
        government_response: None,
    })
}
