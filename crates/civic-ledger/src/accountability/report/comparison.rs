use super::super::domain::Leader;
use super::super::metrics::{
    approval_percentage, attendance_rate, development_score, percentage,
    project_completion_rate, promise_fulfillment, scandal_count, utilization_rate,
    wealth_growth,
};
use super::views::ComparisonPoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side-by-side charts never show more than this many leaders.
pub const MAX_COMPARED_LEADERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    ProjectCompletion,
    PromiseFulfillment,
    Attendance,
    Scandals,
    WealthGrowth,
    ApprovalRating,
    PublicPerception,
    BudgetUtilization,
    DevelopmentIndex,
    ConstituencyEngagement,
    LegislativeActivity,
}

impl ComparisonMetric {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::ProjectCompletion,
            Self::PromiseFulfillment,
            Self::Attendance,
            Self::Scandals,
            Self::WealthGrowth,
            Self::ApprovalRating,
            Self::PublicPerception,
            Self::BudgetUtilization,
            Self::DevelopmentIndex,
            Self::ConstituencyEngagement,
            Self::LegislativeActivity,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ProjectCompletion => "project_completion",
            Self::PromiseFulfillment => "promise_fulfillment",
            Self::Attendance => "attendance",
            Self::Scandals => "scandals",
            Self::WealthGrowth => "wealth_growth",
            Self::ApprovalRating => "approval_rating",
            Self::PublicPerception => "public_perception",
            Self::BudgetUtilization => "budget_utilization",
            Self::DevelopmentIndex => "development_index",
            Self::ConstituencyEngagement => "constituency_engagement",
            Self::LegislativeActivity => "legislative_activity",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ProjectCompletion => "Project Completion (%)",
            Self::PromiseFulfillment => "Promise Fulfillment (%)",
            Self::Attendance => "Attendance (%)",
            Self::Scandals => "Scandals",
            Self::WealthGrowth => "Wealth Growth (%)",
            Self::ApprovalRating => "Approval Rating (%)",
            Self::PublicPerception => "Public Trust (%)",
            Self::BudgetUtilization => "Budget Utilization (%)",
            Self::DevelopmentIndex => "Development Index",
            Self::ConstituencyEngagement => "Constituent Response Rate (%)",
            Self::LegislativeActivity => "Legislative Activity",
        }
    }

    /// Value charted for one leader. Comparison-only sections that a leader
    /// lacks chart as zero.
    pub fn value_for(self, leader: &Leader) -> f64 {
        match self {
            Self::ProjectCompletion => f64::from(project_completion_rate(leader)),
            Self::PromiseFulfillment => f64::from(promise_fulfillment(leader).fulfillment_rate),
            Self::Attendance => f64::from(attendance_rate(leader)),
            Self::Scandals => scandal_count(leader) as f64,
            Self::WealthGrowth => wealth_growth(&leader.wealth) as f64,
            Self::ApprovalRating => f64::from(approval_percentage(&leader.approval_rating)),
            Self::PublicPerception => leader
                .public_perception
                .as_ref()
                .map(|perception| f64::from(percentage(perception.trust_score, 100.0)))
                .unwrap_or(0.0),
            Self::BudgetUtilization => leader
                .budget_utilization
                .as_ref()
                .map(|budget| f64::from(utilization_rate(budget.allocated, budget.utilized)))
                .unwrap_or(0.0),
            Self::DevelopmentIndex => leader
                .development_index
                .as_ref()
                .map(|index| f64::from(development_score(index)))
                .unwrap_or(0.0),
            Self::ConstituencyEngagement => leader
                .constituency_engagement
                .as_ref()
                .map(|engagement| f64::from(percentage(engagement.response_rate, 100.0)))
                .unwrap_or(0.0),
            Self::LegislativeActivity => leader
                .legislative_record
                .as_ref()
                .map(|record| {
                    [
                        record.bills_sponsored,
                        record.bills_passed,
                        record.motions,
                        record.questions_asked,
                    ]
                    .into_iter()
                    .map(f64::from)
                    .sum::<f64>()
                })
                .unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison metric '{0}'")]
pub struct UnknownMetricError(pub String);

impl FromStr for ComparisonMetric {
    type Err = UnknownMetricError;

    /// Accepts snake_case keys as well as the short and camelCase names the
    /// comparison dropdown sends ("wealth", "projectCompletion").
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let metric = match normalized.as_str() {
            "projectcompletion" | "projects" | "completion" => Self::ProjectCompletion,
            "promisefulfillment" | "promises" | "fulfillment" => Self::PromiseFulfillment,
            "attendance" | "attendancerate" => Self::Attendance,
            "scandals" | "scandalcount" => Self::Scandals,
            "wealth" | "wealthgrowth" => Self::WealthGrowth,
            "approval" | "approvalrating" => Self::ApprovalRating,
            "publicperception" | "perception" | "trust" => Self::PublicPerception,
            "budgetutilization" | "budget" => Self::BudgetUtilization,
            "developmentindex" | "development" => Self::DevelopmentIndex,
            "constituencyengagement" | "engagement" => Self::ConstituencyEngagement,
            "legislativeactivity" | "legislative" | "legislativerecord" => {
                Self::LegislativeActivity
            }
            _ => return Err(UnknownMetricError(raw.to_string())),
        };

        Ok(metric)
    }
}

/// Chart series for the selected leaders; an unrecognized metric key yields
/// an empty series and leaders past the comparison cap are ignored.
pub fn compare_leaders(leaders: &[&Leader], metric: &str) -> Vec<ComparisonPoint> {
    let Ok(metric) = metric.parse::<ComparisonMetric>() else {
        tracing::debug!(metric, "ignoring unknown comparison metric");
        return Vec::new();
    };

    leaders
        .iter()
        .take(MAX_COMPARED_LEADERS)
        .map(|leader| ComparisonPoint {
            name: leader.name.clone(),
            value: metric.value_for(leader),
        })
        .collect()
}

/// Bounded, insertion-ordered set of leader ids picked for comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderSelection {
    ids: Vec<String>,
}

impl LeaderSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection by replaying `select` for every id, so duplicates
    /// and anything past the cap are dropped.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.select(id.as_ref());
        }
        selection
    }

    /// Returns `true` when the selection changed. Selecting an id already
    /// present, or selecting while full, is a no-op.
    pub fn select(&mut self, leader_id: &str) -> bool {
        if self.is_full() || self.contains(leader_id) {
            return false;
        }
        self.ids.push(leader_id.to_string());
        true
    }

    /// Removing an id that is not selected is allowed and leaves the set as is.
    pub fn remove(&mut self, leader_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != leader_id);
        before != self.ids.len()
    }

    pub fn contains(&self, leader_id: &str) -> bool {
        self.ids.iter().any(|id| id == leader_id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARED_LEADERS
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Selected leaders in selection order; ids missing from `leaders` are skipped.
    pub fn resolve<'a>(&self, leaders: &'a [Leader]) -> Vec<&'a Leader> {
        self.ids
            .iter()
            .filter_map(|id| leaders.iter().find(|leader| &leader.id == id))
            .collect()
    }

    pub fn compare(&self, leaders: &[Leader], metric: &str) -> Vec<ComparisonPoint> {
        compare_leaders(&self.resolve(leaders), metric)
    }
}
