use crate::infra::DataArgs;
use crate::report::{
    run_compare, run_dashboard, run_projects, run_scorecard, CompareArgs, ProjectsArgs,
    ScorecardArgs,
};
use crate::server;
use civic_ledger::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Civic Ledger",
    about = "Serve and report accountability metrics for elected leaders and public projects",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print one leader's scorecard
    Scorecard(ScorecardArgs),
    /// Print the promise, attendance, budget and project overview
    Dashboard(DataArgs),
    /// Chart up to three leaders on a single metric
    Compare(CompareArgs),
    /// List tracked projects with optional filters
    Projects(ProjectsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scorecard(args) => run_scorecard(args),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Compare(args) => run_compare(args),
        Command::Projects(args) => run_projects(args),
    }
}
