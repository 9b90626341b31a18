use chrono::NaiveDate;
use civic_ledger::config::DataConfig;
use civic_ledger::dataset::Dataset;
use civic_ledger::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line overrides for where the dataset is read from.
#[derive(clap::Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Dataset JSON with leaders and projects (defaults to the bundled sample)
    #[arg(long = "data")]
    pub(crate) dataset_path: Option<PathBuf>,
    /// Attendance register CSV merged into the dataset after loading
    #[arg(long)]
    pub(crate) attendance_csv: Option<PathBuf>,
}

impl DataArgs {
    pub(crate) fn merged_with(self, config: &DataConfig) -> DataConfig {
        DataConfig {
            dataset_path: self.dataset_path.or_else(|| config.dataset_path.clone()),
            attendance_csv: self
                .attendance_csv
                .or_else(|| config.attendance_csv.clone()),
        }
    }
}

pub(crate) fn load_dataset(config: &DataConfig) -> Result<Dataset, AppError> {
    let mut dataset = Dataset::load(config.dataset_path.as_deref())?;

    if let Some(path) = config.attendance_csv.as_ref() {
        let file = std::fs::File::open(path)?;
        let import = dataset.apply_attendance_csv(file)?;
        info!(
            path = %path.display(),
            applied = import.applied,
            adjusted_totals = import.adjusted_totals,
            "merged attendance register"
        );
    }

    Ok(dataset)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_paths_override_configured_ones() {
        let config = DataConfig {
            dataset_path: Some(PathBuf::from("/srv/configured.json")),
            attendance_csv: Some(PathBuf::from("/srv/register.csv")),
        };
        let args = DataArgs {
            dataset_path: Some(PathBuf::from("./local.json")),
            attendance_csv: None,
        };

        let merged = args.merged_with(&config);
        assert_eq!(merged.dataset_path, Some(PathBuf::from("./local.json")));
        assert_eq!(merged.attendance_csv, Some(PathBuf::from("/srv/register.csv")));
    }

    #[test]
    fn bundled_dataset_loads_without_paths() {
        let dataset = load_dataset(&DataConfig::default()).expect("sample loads");
        assert!(!dataset.leaders.is_empty());
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2024-02-30").is_err());
        assert_eq!(
            parse_date(" 2024-02-29 ").expect("leap day"),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid")
        );
    }
}
