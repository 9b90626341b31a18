use crate::infra::{load_dataset, DataArgs};
use chrono::{Local, NaiveDate};
use civic_ledger::accountability::filters::ProjectFilter;
use civic_ledger::accountability::metrics::format_kes;
use civic_ledger::accountability::report::{project_card, LeaderScorecard};
use civic_ledger::accountability::{
    leader_scorecard, AccountabilityDashboard, ComparisonMetric, LeaderSelection,
    MAX_COMPARED_LEADERS,
};
use civic_ledger::config::DataConfig;
use civic_ledger::dataset::Dataset;
use civic_ledger::error::AppError;
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// Leader id as it appears in the dataset
    #[arg(long)]
    pub(crate) leader: String,
    /// Reporting date used for overdue promises (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Leader ids to compare; repeated flags beyond the third are ignored
    #[arg(long = "leader", required = true)]
    pub(crate) leaders: Vec<String>,
    /// Metric key, e.g. attendance, wealth_growth, promise_fulfillment
    #[arg(long, default_value = "project_completion")]
    pub(crate) metric: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ProjectsArgs {
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) status: Option<String>,
    #[arg(long)]
    pub(crate) county: Option<String>,
    /// Case-insensitive search over project names and descriptions
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

fn open_dataset(args: DataArgs) -> Result<Dataset, AppError> {
    load_dataset(&args.merged_with(&DataConfig::default()))
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let ScorecardArgs {
        leader,
        today,
        data,
    } = args;

    let dataset = open_dataset(data)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let record = dataset
        .leader(&leader)
        .ok_or_else(|| AppError::NotFound(format!("leader '{leader}'")))?;

    render_scorecard(&leader_scorecard(record, today));
    Ok(())
}

pub(crate) fn render_scorecard(card: &LeaderScorecard) {
    println!("{} ({}, {})", card.name, card.position, card.party);
    println!("- County: {} | Tenure: {}", card.county, card.tenure);
    println!(
        "- Projects: {}% complete across {} ({} active)",
        card.project_completion_rate, card.total_projects, card.active_projects
    );
    println!(
        "- Promises: {}% fulfilled | {} overdue",
        card.promise_fulfillment_rate, card.overdue_promises
    );
    println!("- Attendance: {}%", card.attendance_rate);
    println!(
        "- Declared wealth: {} ({:+}% since first declaration)",
        card.declared_wealth, card.wealth_growth
    );
    println!(
        "- Approval: {}% from {} votes | Scandals: {}",
        card.approval_percentage, card.approval_votes, card.scandal_count
    );
    println!("- Overall: {}", card.performance_label);
}

pub(crate) fn run_dashboard(args: DataArgs) -> Result<(), AppError> {
    let dataset = open_dataset(args)?;
    let dashboard = AccountabilityDashboard::build(&dataset.leaders, &dataset.projects);

    let tracker = &dashboard.promise_tracker;
    println!("Promise tracker");
    println!(
        "- {} promises | {} fulfilled | {} in progress | {} broken | {} pending",
        tracker.total,
        tracker.counts.fulfilled,
        tracker.counts.in_progress,
        tracker.counts.broken,
        tracker.counts.pending
    );
    println!("- Overall fulfillment: {}%", tracker.overall_fulfillment_rate);
    println!("Top performers:");
    for entry in &tracker.top_performers {
        println!(
            "  - {}: {}/{} fulfilled ({}%)",
            entry.leader_name, entry.fulfilled, entry.total, entry.fulfillment_rate
        );
    }

    println!("\nAttendance");
    for entry in &dashboard.attendance {
        println!(
            "  - {}: {}% ({} of {} sittings)",
            entry.leader_name, entry.attendance_rate, entry.present, entry.total
        );
    }

    println!("\nBudget utilization");
    for entry in &dashboard.budget_utilization {
        println!(
            "  - {}: {} of {} spent ({}%) | efficiency {}",
            entry.leader_name,
            format_kes(entry.spent),
            format_kes(entry.allocated),
            entry.utilization_rate,
            entry.efficiency_score
        );
    }

    let projects = &dashboard.projects;
    println!("\nProjects");
    println!(
        "- {} tracked | {} active | {}% average completion",
        projects.total_projects, projects.active_projects, projects.average_completion
    );
    println!(
        "- {} of {} spent ({}%) | {} beneficiaries | {} citizen reports",
        format_kes(projects.total_spent),
        format_kes(projects.total_allocated),
        projects.utilization_rate,
        projects.beneficiaries,
        projects.citizen_reports
    );
    for entry in &projects.by_status {
        println!("  - {}: {}", entry.status_label, entry.count);
    }

    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        leaders,
        metric,
        data,
    } = args;

    let dataset = open_dataset(data)?;
    if leaders.len() > MAX_COMPARED_LEADERS {
        println!(
            "Only the first {} leaders are compared; ignoring {}",
            MAX_COMPARED_LEADERS,
            leaders[MAX_COMPARED_LEADERS..].join(", ")
        );
    }

    let selection = LeaderSelection::from_ids(&leaders);
    let label = match metric.parse::<ComparisonMetric>() {
        Ok(parsed) => parsed.label(),
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    println!("{label}");
    for point in selection.compare(&dataset.leaders, &metric) {
        println!("  - {}: {}", point.name, point.value);
    }
    Ok(())
}

pub(crate) fn run_projects(args: ProjectsArgs) -> Result<(), AppError> {
    let ProjectsArgs {
        category,
        status,
        county,
        query,
        today,
        data,
    } = args;

    let dataset = open_dataset(data)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let filter = ProjectFilter {
        category,
        status,
        county,
        query,
    };

    let matches = filter.apply(&dataset.projects);
    println!("{} matching projects", matches.len());
    for project in matches {
        let card = project_card(project, today);
        println!(
            "- {} [{}] {}% complete | {} of {} spent",
            card.name, card.status_label, card.completion, card.spent, card.allocated
        );
        if card.schedule_slip_days > 0 {
            println!("  {} days behind schedule", card.schedule_slip_days);
        }
        if card.citizen_rating.reports > 0 {
            println!(
                "  Citizen rating {:.1}/5 from {} reports",
                card.citizen_rating.overall, card.citizen_rating.reports
            );
        }
    }
    Ok(())
}
