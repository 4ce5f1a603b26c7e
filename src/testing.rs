//! Shared fixtures for unit tests.

use crate::api::ApiClient;
use crate::config::Config;
use crate::confirm::{AlertLog, FixedAnswer};
use crate::domain::models::{Announcement, Employee, ShiftCoverRequest, Task, TimeOffRequest};
use crate::state::{AppState, SharedState};
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn state_for(uri: &str, answer: bool) -> (SharedState, Arc<AlertLog>) {
    let config = Config::new(Url::parse(uri).unwrap());
    let client = ApiClient::new(&config).unwrap();
    let alerts = Arc::new(AlertLog::new());
    let state = AppState::shared(config, client, Arc::new(FixedAnswer(answer)), alerts.clone());
    (state, alerts)
}

pub fn employee(id: i64, admin: bool) -> Employee {
    serde_json::from_value(json!({"employee_id": id, "name": format!("Employee {id}"), "admin": admin})).unwrap()
}

pub fn cover_request_json(id: i64, requester: i64, status: &str) -> Value {
    json!({
        "cover_request_id": id,
        "shift_id": 4,
        "requested_employee_id": requester,
        "accepted_employee_id": null,
        "status": status,
        "date": "2025-03-08",
        "start_time": "09:00:00",
        "section_id": 2
    })
}

pub fn cover_request(id: i64, requester: i64, status: &str) -> ShiftCoverRequest {
    serde_json::from_value(cover_request_json(id, requester, status)).unwrap()
}

pub fn time_off_json(id: i64, employee_id: i64, status: &str) -> Value {
    json!({
        "request_id": id,
        "employee_id": employee_id,
        "start_date": "2025-03-04",
        "end_date": "2025-03-06",
        "reason": "Family trip",
        "status": status
    })
}

pub fn time_off(id: i64, employee_id: i64, status: &str) -> TimeOffRequest {
    serde_json::from_value(time_off_json(id, employee_id, status)).unwrap()
}

pub fn task_json(id: i64, complete: bool) -> Value {
    json!({
        "task_id": id,
        "title": format!("Task {id}"),
        "description": "Wipe down counters",
        "section_id": 2,
        "due_date": "2025-03-04",
        "complete": complete
    })
}

pub fn task(id: i64, complete: bool) -> Task {
    serde_json::from_value(task_json(id, complete)).unwrap()
}

pub fn announcement_json(id: i64, author: i64) -> Value {
    json!({
        "announcement_id": id,
        "author_id": author,
        "role_id": null,
        "title": format!("Announcement {id}"),
        "description": "Staff meeting moved to Friday",
        "timestamp": "2025-03-01T15:30:00Z"
    })
}

pub fn announcement(id: i64, author: i64) -> Announcement {
    serde_json::from_value(announcement_json(id, author)).unwrap()
}
