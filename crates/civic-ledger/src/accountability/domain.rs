use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Visual treatment the dashboard applies to a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Positive,
    Progress,
    Caution,
    Critical,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[serde(alias = "Planning")]
    Planning,
    #[serde(alias = "Procurement")]
    Procurement,
    #[serde(
        alias = "ongoing",
        alias = "in-progress",
        alias = "In Progress",
        alias = "InProgress"
    )]
    InProgress,
    #[serde(alias = "on-hold", alias = "On Hold", alias = "OnHold")]
    OnHold,
    #[serde(alias = "Delayed")]
    Delayed,
    #[serde(alias = "Completed")]
    Completed,
    #[serde(alias = "Cancelled")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Planning,
            Self::Procurement,
            Self::InProgress,
            Self::OnHold,
            Self::Delayed,
            Self::Completed,
            Self::Cancelled,
            Self::Unknown,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Procurement => "procurement",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Procurement => "Procurement",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Delayed => "Delayed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn tone(self) -> StatusTone {
        match self {
            Self::Completed => StatusTone::Positive,
            Self::InProgress => StatusTone::Progress,
            Self::Planning | Self::Procurement | Self::OnHold => StatusTone::Caution,
            Self::Delayed | Self::Cancelled => StatusTone::Critical,
            Self::Unknown => StatusTone::Neutral,
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Matches the machine key ("in_progress"), the display label
    /// ("In Progress") or the run-together name ("InProgress"), ignoring ASCII
    /// case and separators. "ongoing" also matches `InProgress`.
    pub fn matches(self, value: &str) -> bool {
        let value = squash(value);
        value == squash(self.key()) || (self == Self::InProgress && value == "ongoing")
    }
}

/// Lowercases and drops spaces, dashes and underscores.
fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromiseStatus {
    Fulfilled,
    #[serde(alias = "in_progress", alias = "ongoing")]
    InProgress,
    Broken,
    Pending,
    #[serde(other)]
    Unknown,
}

impl PromiseStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Fulfilled, Self::InProgress, Self::Broken, Self::Pending]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fulfilled => "Fulfilled",
            Self::InProgress => "In Progress",
            Self::Broken => "Broken",
            Self::Pending => "Pending",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn tone(self) -> StatusTone {
        match self {
            Self::Fulfilled => StatusTone::Positive,
            Self::InProgress => StatusTone::Progress,
            Self::Pending => StatusTone::Caution,
            Self::Broken => StatusTone::Critical,
            Self::Unknown => StatusTone::Neutral,
        }
    }

    /// Bucket used by aggregate counts; unrecognized values are tracked as pending.
    pub const fn bucket(self) -> Self {
        match self {
            Self::Unknown => Self::Pending,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenReportStatus {
    #[serde(
        alias = "Work in Progress",
        alias = "work-in-progress",
        alias = "WorkInProgress"
    )]
    WorkInProgress,
    #[serde(alias = "No Activity", alias = "no-activity", alias = "NoActivity")]
    NoActivity,
    #[serde(alias = "Completed")]
    Completed,
    #[serde(alias = "Issue")]
    Issue,
    #[serde(other)]
    Unknown,
}

impl CitizenReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkInProgress => "Work in Progress",
            Self::NoActivity => "No Activity",
            Self::Completed => "Completed",
            Self::Issue => "Issue",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn tone(self) -> StatusTone {
        match self {
            Self::Completed => StatusTone::Positive,
            Self::WorkInProgress => StatusTone::Progress,
            Self::NoActivity => StatusTone::Caution,
            Self::Issue => StatusTone::Critical,
            Self::Unknown => StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRating {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_votes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPerception {
    #[serde(default)]
    pub trust_score: f64,
    #[serde(default)]
    pub satisfaction_score: f64,
    #[serde(default)]
    pub media_sentiment: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUtilization {
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub utilized: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentIndex {
    #[serde(default)]
    pub infrastructure: f64,
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub healthcare: f64,
    #[serde(default)]
    pub economy: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituencyEngagement {
    #[serde(default)]
    pub town_halls: u32,
    #[serde(default)]
    pub public_forums: u32,
    #[serde(default)]
    pub response_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegislativeRecord {
    #[serde(default)]
    pub bills_sponsored: u32,
    #[serde(default)]
    pub bills_passed: u32,
    #[serde(default)]
    pub motions: u32,
    #[serde(default)]
    pub questions_asked: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub county: String,
    pub elected_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub promises: Vec<Promise>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub wealth: Vec<WealthRecord>,
    #[serde(default)]
    pub scandals: Vec<Scandal>,
    #[serde(default)]
    pub approval_rating: ApprovalRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_perception: Option<PublicPerception>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_utilization: Option<BudgetUtilization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_index: Option<DevelopmentIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency_engagement: Option<ConstituencyEngagement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legislative_record: Option<LegislativeRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLocation {
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub constituency: String,
    #[serde(default)]
    pub ward: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimeline {
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub completion_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub label: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyExpenditure {
    pub quarter: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBudget {
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<BudgetLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funding_sources: Vec<BudgetLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quarterly_expenditures: Vec<QuarterlyExpenditure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub planned_date: NaiveDate,
    #[serde(default)]
    pub actual_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImpact {
    #[serde(default)]
    pub beneficiaries: u64,
    #[serde(default)]
    pub sdg_goals: Vec<u8>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ProjectLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<ProjectTimeline>,
    #[serde(default)]
    pub budget: ProjectBudget,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub citizen_reports: Vec<CitizenReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ProjectImpact>,
}

impl Project {
    /// Reported completion in [0, 100]; the flat `completion` field wins over
    /// the timeline figure, and a project with neither counts as 0.
    pub fn completion_percentage(&self) -> f64 {
        let raw = self
            .completion
            .or_else(|| {
                self.timeline
                    .as_ref()
                    .map(|timeline| timeline.completion_percentage)
            })
            .unwrap_or(0.0);

        if raw.is_finite() {
            raw.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn county(&self) -> Option<&str> {
        self.location
            .as_ref()
            .map(|location| location.county.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promise {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub made_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: PromiseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub period: String,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub absent: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthRecord {
    pub year: i32,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenRating {
    pub progress: u8,
    pub quality: u8,
    pub impact: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenReport {
    pub id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub status: CitizenReportStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub rating: CitizenRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scandal {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) if value.is_finite() => value,
        RawAmount::Number(_) => 0.0,
        RawAmount::Text(text) => super::metrics::parse_kes_amount(&text),
    };
    Ok(amount)
}
