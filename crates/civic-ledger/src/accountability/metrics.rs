//! Per-entity accountability metrics.
//!
//! Every function here is total: empty collections, zero denominators and
//! missing optional sections produce `0` (or `"N/A"` for display strings),
//! never a panic or a non-finite value. Percentages are rounded to the
//! nearest integer and clamped to `[0, 100]`.

use super::domain::{
    ApprovalRating, CitizenRating, DevelopmentIndex, Leader, Project, ProjectStatus,
    PromiseStatus, WealthRecord,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

/// `numerator / denominator` as a rounded percentage in `[0, 100]`.
pub(crate) fn percentage(numerator: f64, denominator: f64) -> u8 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator <= 0.0 {
        return 0;
    }

    ((numerator / denominator) * 100.0).round().clamp(0.0, 100.0) as u8
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|value| value.is_finite())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn project_completion_rate(leader: &Leader) -> u8 {
    mean(leader.projects.iter().map(Project::completion_percentage))
        .map(|average| average.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PromiseStatusCounts {
    pub fulfilled: usize,
    pub in_progress: usize,
    pub broken: usize,
    pub pending: usize,
}

impl PromiseStatusCounts {
    pub fn record(&mut self, status: PromiseStatus) {
        match status.bucket() {
            PromiseStatus::Fulfilled => self.fulfilled += 1,
            PromiseStatus::InProgress => self.in_progress += 1,
            PromiseStatus::Broken => self.broken += 1,
            PromiseStatus::Pending | PromiseStatus::Unknown => self.pending += 1,
        }
    }

    pub fn get(&self, status: PromiseStatus) -> usize {
        match status.bucket() {
            PromiseStatus::Fulfilled => self.fulfilled,
            PromiseStatus::InProgress => self.in_progress,
            PromiseStatus::Broken => self.broken,
            PromiseStatus::Pending | PromiseStatus::Unknown => self.pending,
        }
    }

    pub fn total(&self) -> usize {
        self.fulfilled + self.in_progress + self.broken + self.pending
    }

    pub fn fulfillment_rate(&self) -> u8 {
        percentage(self.fulfilled as f64, self.total() as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromiseFulfillment {
    pub fulfillment_rate: u8,
    pub counts: PromiseStatusCounts,
}

pub fn promise_fulfillment(leader: &Leader) -> PromiseFulfillment {
    let mut counts = PromiseStatusCounts::default();
    for promise in &leader.promises {
        counts.record(promise.status);
    }

    PromiseFulfillment {
        fulfillment_rate: counts.fulfillment_rate(),
        counts,
    }
}

/// Attended sessions over tracked sessions across every period.
pub fn attendance_rate(leader: &Leader) -> u8 {
    let (present, total) = attendance_totals(leader);
    percentage(present as f64, total as f64)
}

pub(crate) fn attendance_totals(leader: &Leader) -> (u64, u64) {
    leader
        .attendance
        .iter()
        .fold((0u64, 0u64), |(present, total), record| {
            (
                present + u64::from(record.present),
                total + u64::from(record.total),
            )
        })
}

pub fn count_active_projects(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|project| project.status.is_active())
        .count()
}

pub fn scandal_count(leader: &Leader) -> usize {
    leader.scandals.len()
}

/// Most recent declaration formatted for display, or `"N/A"` with no records.
pub fn total_declared_wealth(records: &[WealthRecord]) -> String {
    records
        .iter()
        .max_by_key(|record| record.year)
        .map(|record| format_kes(record.amount))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Growth between the oldest and newest declaration, in whole percent.
///
/// Fewer than two records, or a zero/negative base year, yields `0`. The
/// result is not clamped: a shrinking declaration is negative and growth
/// beyond 100% is reported as-is.
pub fn wealth_growth(records: &[WealthRecord]) -> i64 {
    if records.len() < 2 {
        return 0;
    }

    let mut ordered: Vec<&WealthRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.year);

    let (Some(oldest), Some(newest)) = (ordered.first(), ordered.last()) else {
        return 0;
    };

    if !oldest.amount.is_finite() || !newest.amount.is_finite() || oldest.amount <= 0.0 {
        return 0;
    }

    (((newest.amount - oldest.amount) / oldest.amount) * 100.0).round() as i64
}

pub fn leader_tenure(elected_date: NaiveDate, end_date: Option<NaiveDate>) -> String {
    match end_date {
        Some(end) => format!("{} – {}", elected_date.year(), end.year()),
        None => format!("{} – Present", elected_date.year()),
    }
}

pub fn utilization_rate(allocated: f64, spent: f64) -> u8 {
    percentage(spent, allocated)
}

/// Completion achieved per unit of budget consumed, capped at 100.
///
/// A leader with no spend scores `0` rather than an unbounded ratio.
pub fn efficiency_score(completion_rate: f64, utilization_rate: f64) -> u8 {
    percentage(completion_rate, utilization_rate)
}

pub fn project_budget_utilization(project: &Project) -> u8 {
    utilization_rate(project.budget.allocated, project.budget.spent)
}

pub fn milestone_progress(project: &Project) -> u8 {
    let completed = project
        .milestones
        .iter()
        .filter(|milestone| milestone.completed)
        .count();
    percentage(completed as f64, project.milestones.len() as f64)
}

/// Days a project ran (or is running) past its planned end date.
pub fn schedule_slip_days(project: &Project, today: NaiveDate) -> i64 {
    let Some(timeline) = project.timeline.as_ref() else {
        return 0;
    };

    let reference = match (timeline.actual_end_date, project.status) {
        (Some(actual), _) => actual,
        (None, ProjectStatus::Completed | ProjectStatus::Cancelled) => return 0,
        (None, _) => today,
    };

    (reference - timeline.planned_end_date).num_days().max(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingSummary {
    pub reports: usize,
    pub progress: f64,
    pub quality: f64,
    pub impact: f64,
    pub overall: f64,
}

pub fn citizen_rating_summary(project: &Project) -> RatingSummary {
    let reports = &project.citizen_reports;
    if reports.is_empty() {
        return RatingSummary::default();
    }

    let axis = |pick: fn(&CitizenRating) -> u8| {
        let average = mean(
            reports
                .iter()
                .map(|report| f64::from(pick(&report.rating).clamp(1, 5))),
        )
        .unwrap_or(0.0);
        round_tenths(average)
    };

    let progress = axis(|rating| rating.progress);
    let quality = axis(|rating| rating.quality);
    let impact = axis(|rating| rating.impact);

    RatingSummary {
        reports: reports.len(),
        progress,
        quality,
        impact,
        overall: round_tenths((progress + quality + impact) / 3.0),
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Approval on the 0–5 star scale expressed as a percentage.
pub fn approval_percentage(rating: &ApprovalRating) -> u8 {
    percentage(rating.rating, 5.0)
}

pub fn development_score(index: &DevelopmentIndex) -> u8 {
    mean(
        [
            index.infrastructure,
            index.education,
            index.healthcare,
            index.economy,
        ]
        .into_iter(),
    )
    .map(|average| average.round().clamp(0.0, 100.0) as u8)
    .unwrap_or(0)
}

const KES_UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Compact shilling display: `12_500_000.0` becomes `"KES 12.5M"`.
pub fn format_kes(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "KES 0".to_string();
    }

    let mut scaled = amount.round();
    let mut suffix = "";
    for (index, (unit, label)) in KES_UNITS.iter().enumerate() {
        if amount >= *unit {
            scaled = round_tenths(amount / unit);
            suffix = label;
            // 999_960 rounds to 1000.0K; promote to the next unit instead.
            if scaled >= 1000.0 && index > 0 {
                let (bigger, bigger_label) = KES_UNITS[index - 1];
                scaled = round_tenths(amount / bigger);
                suffix = bigger_label;
            }
            break;
        }
    }

    let mut text = format!("{scaled:.1}");
    if text.ends_with(".0") {
        text.truncate(text.len() - 2);
    }
    format!("KES {text}{suffix}")
}

/// Parses the currency strings found in declaration fixtures
/// ("KES 12,500,000", "Ksh 3.2M", "1.1 billion"). Unparseable input is 0.
pub fn parse_kes_amount(raw: &str) -> f64 {
    let upper = raw.trim().to_ascii_uppercase();
    let stripped = upper
        .trim_start_matches("KES")
        .trim_start_matches("KSHS")
        .trim_start_matches("KSH")
        .replace([',', '_', ' '], "");
    let stripped = stripped.trim_start_matches('.');

    let (number, multiplier) = [
        ("BILLION", 1e9),
        ("MILLION", 1e6),
        ("BN", 1e9),
        ("B", 1e9),
        ("M", 1e6),
        ("K", 1e3),
    ]
    .iter()
    .find_map(|(suffix, multiplier)| {
        stripped
            .strip_suffix(suffix)
            .map(|number| (number, *multiplier))
    })
    .unwrap_or((stripped, 1.0));

    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| (value * multiplier).max(0.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accountability::domain::{
        ApprovalRating, AttendanceRecord, Leader, Milestone, ProjectBudget, ProjectTimeline,
        Promise,
    };

    fn leader() -> Leader {
        Leader {
            id: "l-1".to_string(),
            name: "Amina Odhiambo".to_string(),
            position: "Governor".to_string(),
            party: "ODM".to_string(),
            county: "Kisumu".to_string(),
            elected_date: NaiveDate::from_ymd_opt(2022, 8, 9).expect("valid date"),
            end_date: None,
            projects: Vec::new(),
            promises: Vec::new(),
            attendance: Vec::new(),
            wealth: Vec::new(),
            scandals: Vec::new(),
            approval_rating: ApprovalRating::default(),
            public_perception: None,
            budget_utilization: None,
            development_index: None,
            constituency_engagement: None,
            legislative_record: None,
        }
    }

    fn project(completion: f64, status: ProjectStatus) -> Project {
        Project {
            id: format!("p-{completion}"),
            name: "Ring road".to_string(),
            description: String::new(),
            category: "Infrastructure".to_string(),
            status,
            location: None,
            completion: Some(completion),
            timeline: None,
            budget: ProjectBudget::default(),
            milestones: Vec::new(),
            citizen_reports: Vec::new(),
            impact: None,
        }
    }

    fn promise(status: PromiseStatus) -> Promise {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        Promise {
            id: format!("{status:?}"),
            description: "Pave feeder roads".to_string(),
            category: "Infrastructure".to_string(),
            made_date: date,
            due_date: date,
            status,
            evidence: None,
        }
    }

    fn wealth(year: i32, amount: f64) -> WealthRecord {
        WealthRecord {
            year,
            amount,
            assets: Vec::new(),
        }
    }

    #[test]
    fn completion_rate_is_zero_without_projects() {
        assert_eq!(project_completion_rate(&leader()), 0);
    }

    #[test]
    fn completion_rate_averages_projects() {
        let mut leader = leader();
        leader.projects = vec![
            project(80.0, ProjectStatus::InProgress),
            project(40.0, ProjectStatus::InProgress),
        ];
        assert_eq!(project_completion_rate(&leader), 60);
    }

    #[test]
    fn attendance_rate_uses_summed_totals() {
        let mut leader = leader();
        leader.attendance = vec![
            AttendanceRecord {
                period: "2023 Q1".to_string(),
                present: 9,
                absent: 1,
                total: 10,
            },
            AttendanceRecord {
                period: "2023 Q2".to_string(),
                present: 18,
                absent: 2,
                total: 20,
            },
        ];
        assert_eq!(attendance_rate(&leader), 90);

        leader.attendance = vec![AttendanceRecord {
            period: "2024 Q1".to_string(),
            present: 0,
            absent: 0,
            total: 0,
        }];
        assert_eq!(attendance_rate(&leader), 0);
    }

    #[test]
    fn fulfillment_counts_only_fulfilled_promises() {
        let mut leader = leader();
        leader.promises = vec![
            promise(PromiseStatus::Fulfilled),
            promise(PromiseStatus::Fulfilled),
            promise(PromiseStatus::Broken),
            promise(PromiseStatus::Pending),
        ];

        let fulfillment = promise_fulfillment(&leader);
        assert_eq!(fulfillment.fulfillment_rate, 50);
        assert_eq!(fulfillment.counts.total(), 4);
        assert_eq!(fulfillment.counts.broken, 1);

        assert_eq!(
            promise_fulfillment(&self::leader()).fulfillment_rate,
            0,
            "no promises means no fulfillment"
        );
    }

    #[test]
    fn unknown_promise_status_counts_as_pending() {
        let mut leader = leader();
        leader.promises = vec![
            promise(PromiseStatus::Unknown),
            promise(PromiseStatus::Fulfilled),
        ];

        let fulfillment = promise_fulfillment(&leader);
        assert_eq!(fulfillment.counts.pending, 1);
        assert_eq!(fulfillment.counts.total(), leader.promises.len());
        assert_eq!(fulfillment.fulfillment_rate, 50);
    }

    #[test]
    fn active_projects_only_include_in_progress() {
        let projects = vec![
            project(10.0, ProjectStatus::InProgress),
            project(100.0, ProjectStatus::Completed),
            project(20.0, ProjectStatus::Unknown),
            project(30.0, ProjectStatus::InProgress),
        ];
        assert_eq!(count_active_projects(&projects), 2);
        assert_eq!(count_active_projects(&[]), 0);
    }

    #[test]
    fn declared_wealth_uses_latest_record() {
        assert_eq!(total_declared_wealth(&[]), "N/A");
        let records = vec![wealth(2023, 12_500_000.0), wealth(2017, 4_000_000.0)];
        assert_eq!(total_declared_wealth(&records), "KES 12.5M");
    }

    #[test]
    fn wealth_growth_guards_small_and_zero_bases() {
        assert_eq!(wealth_growth(&[wealth(2022, 5_000_000.0)]), 0);
        assert_eq!(
            wealth_growth(&[wealth(2017, 0.0), wealth(2022, 5_000_000.0)]),
            0
        );
        assert_eq!(
            wealth_growth(&[wealth(2022, 15_000_000.0), wealth(2017, 10_000_000.0)]),
            50
        );
        assert_eq!(
            wealth_growth(&[wealth(2017, 10_000_000.0), wealth(2022, 7_500_000.0)]),
            -25
        );
    }

    #[test]
    fn tenure_marks_serving_leaders_as_present() {
        let elected = NaiveDate::from_ymd_opt(2022, 8, 9).expect("valid date");
        assert_eq!(leader_tenure(elected, None), "2022 – Present");
        let ended = NaiveDate::from_ymd_opt(2027, 8, 9).expect("valid date");
        assert_eq!(leader_tenure(elected, Some(ended)), "2022 – 2027");
    }

    #[test]
    fn efficiency_score_is_capped_and_guarded() {
        assert_eq!(efficiency_score(60.0, 0.0), 0);
        assert_eq!(efficiency_score(60.0, 80.0), 75);
        assert_eq!(efficiency_score(90.0, 30.0), 100);
        assert_eq!(utilization_rate(0.0, 500.0), 0);
        assert_eq!(utilization_rate(100.0, 250.0), 100);
    }

    #[test]
    fn project_level_metrics_handle_partial_records() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid date");
        let mut project = project(45.0, ProjectStatus::Delayed);
        assert_eq!(milestone_progress(&project), 0);
        assert_eq!(schedule_slip_days(&project, today), 0);
        assert_eq!(citizen_rating_summary(&project), RatingSummary::default());

        project.timeline = Some(ProjectTimeline {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            planned_end_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            actual_end_date: None,
            completion_percentage: 45.0,
        });
        project.milestones = vec![
            Milestone {
                name: "Survey".to_string(),
                planned_date: NaiveDate::from_ymd_opt(2023, 2, 1).expect("valid date"),
                actual_date: NaiveDate::from_ymd_opt(2023, 2, 3),
                completed: true,
            },
            Milestone {
                name: "Tarmac".to_string(),
                planned_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                actual_date: None,
                completed: false,
            },
        ];

        assert_eq!(milestone_progress(&project), 50);
        assert_eq!(schedule_slip_days(&project, today), 9);

        project.status = ProjectStatus::Completed;
        assert_eq!(schedule_slip_days(&project, today), 0);
    }

    #[test]
    fn kes_formatting_and_parsing_agree() {
        assert_eq!(format_kes(0.0), "KES 0");
        assert_eq!(format_kes(950.0), "KES 950");
        assert_eq!(format_kes(12_000_000.0), "KES 12M");
        assert_eq!(format_kes(1_250_000_000.0), "KES 1.3B");
        assert_eq!(format_kes(999_960.0), "KES 1M");
        assert_eq!(format_kes(f64::NAN), "KES 0");

        assert_eq!(parse_kes_amount("KES 12,500,000"), 12_500_000.0);
        assert_eq!(parse_kes_amount("Ksh 3.2M"), 3_200_000.0);
        assert_eq!(parse_kes_amount("1.5 billion"), 1_500_000_000.0);
        assert_eq!(parse_kes_amount("undisclosed"), 0.0);
    }

    #[test]
    fn approval_and_development_are_percentages() {
        let rating = ApprovalRating {
            rating: 3.6,
            total_votes: 1200,
        };
        assert_eq!(approval_percentage(&rating), 72);
        assert_eq!(approval_percentage(&ApprovalRating::default()), 0);

        let index = DevelopmentIndex {
            infrastructure: 70.0,
            education: 60.0,
            healthcare: 50.0,
            economy: 140.0,
        };
        assert_eq!(development_score(&index), 80);
    }

    #[test]
    fn metrics_are_stable_across_calls() {
        let mut leader = leader();
        leader.projects = vec![project(33.0, ProjectStatus::InProgress)];
        leader.promises = vec![promise(PromiseStatus::Fulfilled)];
        assert_eq!(
            project_completion_rate(&leader),
            project_completion_rate(&leader)
        );
        assert_eq!(promise_fulfillment(&leader), promise_fulfillment(&leader));
    }
}
