//! Static dataset loading.
//!
//! The dashboard ships its leaders and projects as JSON snapshots. A dataset
//! is loaded once and handed to the metric functions by reference.

mod attendance;

use crate::accountability::domain::{Leader, Project};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const SAMPLE_DATASET: &str = include_str!("../../fixtures/dataset.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid attendance register CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub leaders: Vec<Leader>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Outcome of merging an attendance register into a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceImport {
    pub applied: usize,
    pub adjusted_totals: usize,
    pub unmatched_leaders: Vec<String>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            leaders = dataset.leaders.len(),
            projects = dataset.projects.len(),
            "loaded accountability dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// The bundled demo snapshot.
    pub fn sample() -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(SAMPLE_DATASET)?)
    }

    /// Loads `path` when given, otherwise the bundled snapshot.
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::sample(),
        }
    }

    pub fn leader(&self, id: &str) -> Option<&Leader> {
        self.leaders.iter().find(|leader| leader.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Appends register rows to the matching leaders' attendance history.
    pub fn apply_attendance_csv<R: Read>(
        &mut self,
        reader: R,
    ) -> Result<AttendanceImport, DatasetError> {
        let mut import = AttendanceImport::default();
        let mut unmatched = BTreeSet::new();

        for row in attendance::parse_rows(reader)? {
            let Some(leader) = self
                .leaders
                .iter_mut()
                .find(|leader| attendance::normalize_key(&leader.id) == row.leader_key)
            else {
                unmatched.insert(row.leader_key);
                continue;
            };

            if row.adjusted_total {
                import.adjusted_totals += 1;
            }
            leader.attendance.push(row.record);
            import.applied += 1;
        }

        import.unmatched_leaders = unmatched.into_iter().collect();
        if !import.unmatched_leaders.is_empty() {
            warn!(
                unmatched = ?import.unmatched_leaders,
                "attendance rows reference unknown leaders"
            );
        }

        Ok(import)
    }
}
