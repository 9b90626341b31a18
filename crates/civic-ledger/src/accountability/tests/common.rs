use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::accountability::domain::{
    ApprovalRating, AttendanceRecord, Leader, Project, ProjectBudget, ProjectLocation,
    ProjectStatus, Promise, PromiseStatus, WealthRecord,
};
use crate::accountability::router::accountability_router;
use crate::dataset::Dataset;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn leader(id: &str, name: &str) -> Leader {
    Leader {
        id: id.to_string(),
        name: name.to_string(),
        position: "MP".to_string(),
        party: "ODM".to_string(),
        county: "Kisumu".to_string(),
        elected_date: date(2022, 8, 9),
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

pub(super) fn promise(id: &str, status: PromiseStatus) -> Promise {
    Promise {
        id: id.to_string(),
        description: format!("Promise {id}"),
        category: "Infrastructure".to_string(),
        made_date: date(2022, 6, 1),
        due_date: date(2025, 6, 30),
        status,
        evidence: None,
    }
}

pub(super) fn with_promises(mut leader: Leader, statuses: &[PromiseStatus]) -> Leader {
    leader.promises = statuses
        .iter()
        .enumerate()
        .map(|(index, status)| promise(&format!("{}-p{index}", leader.id), *status))
        .collect();
    leader
}

pub(super) fn attendance(present: u32, total: u32) -> AttendanceRecord {
    AttendanceRecord {
        period: "2023 Q1".to_string(),
        present,
        absent: total - present,
        total,
    }
}

pub(super) fn wealth(year: i32, amount: f64) -> WealthRecord {
    WealthRecord {
        year,
        amount,
        assets: Vec::new(),
    }
}

pub(super) fn project(
    id: &str,
    category: &str,
    status: ProjectStatus,
    completion: f64,
    allocated: f64,
    spent: f64,
) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        description: String::new(),
        category: category.to_string(),
        status,
        location: Some(ProjectLocation {
            county: "Kisumu".to_string(),
            constituency: "Kisumu Central".to_string(),
            ward: "Market Milimani".to_string(),
        }),
        completion: Some(completion),
        timeline: None,
        budget: ProjectBudget {
            allocated,
            spent,
            ..ProjectBudget::default()
        },
        milestones: Vec::new(),
        citizen_reports: Vec::new(),
        impact: None,
    }
}

pub(super) fn sample_dataset() -> Dataset {
    Dataset::sample().expect("bundled dataset parses")
}

pub(super) fn router() -> axum::Router {
    accountability_router(Arc::new(sample_dataset()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
