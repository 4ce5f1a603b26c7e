use crate::domain::status::RequestStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

pub type Id = i64;

/// Backend IDs arrive either as JSON numbers or numeric strings; both decode to `Id`.
pub mod id {
    use super::Id;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(Id),
        Text(String),
    }

    fn coerce<E: Error>(raw: RawId) -> Result<Id, E> {
        match raw {
            RawId::Number(n) => Ok(n),
            RawId::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected numeric id, got '{s}'"))),
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(de: D) -> Result<Id, D::Error> {
        coerce(RawId::deserialize(de)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Id>, D::Error> {
        match Option::<RawId>::deserialize(de)? {
            None => Ok(None),
            Some(RawId::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => coerce(raw).map(Some),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    #[serde(deserialize_with = "id::required")]
    pub employee_id: Id,
    pub name: String,
    #[serde(default)]
    pub wage: Option<f64>,
    #[serde(default, alias = "is_admin")]
    pub admin: bool,
    #[serde(default, deserialize_with = "id::optional")]
    pub primary_role_id: Option<Id>,
    #[serde(default, deserialize_with = "id::optional")]
    pub secondary_role_id: Option<Id>,
    #[serde(default, deserialize_with = "id::optional")]
    pub tertiary_role_id: Option<Id>,
}

impl Employee {
    pub fn role_ids(&self) -> Vec<Id> {
        [self.primary_role_id, self.secondary_role_id, self.tertiary_role_id]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewEmployee {
    pub name: Option<String>,
    pub wage: Option<f64>,
    pub admin: bool,
    pub primary_role_id: Option<Id>,
    pub secondary_role_id: Option<Id>,
    pub tertiary_role_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shift {
    #[serde(deserialize_with = "id::required")]
    pub shift_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub employee_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub section_id: Id,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewShift {
    pub employee_id: Option<Id>,
    pub section_id: Option<Id>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftCoverRequest {
    #[serde(deserialize_with = "id::required")]
    pub cover_request_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub shift_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub requested_employee_id: Id,
    #[serde(default, deserialize_with = "id::optional")]
    pub accepted_employee_id: Option<Id>,
    pub status: RequestStatus,
    // Joined from the shift when the backend includes it.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "id::optional")]
    pub section_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewShiftCoverRequest {
    pub shift_id: Option<Id>,
    pub requested_employee_id: Option<Id>,
    pub status: RequestStatus,
}

impl NewShiftCoverRequest {
    pub fn for_shift(shift_id: Id, requested_employee_id: Id) -> Self {
        Self {
            shift_id: Some(shift_id),
            requested_employee_id: Some(requested_employee_id),
            status: RequestStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoverRequestPatch {
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_employee_id: Option<Id>,
}

/// Body of `/scr/approve/{id}`; the backend also moves the shift to `accepted_employee_id`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoverApproval {
    pub status: RequestStatus,
    pub shift_id: Id,
    pub accepted_employee_id: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeOffRequest {
    #[serde(deserialize_with = "id::required")]
    pub request_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub employee_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTimeOffRequest {
    pub employee_id: Option<Id>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub status: RequestStatus,
}

impl Default for NewTimeOffRequest {
    fn default() -> Self {
        Self {
            employee_id: None,
            start_date: None,
            end_date: None,
            reason: None,
            status: RequestStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeOffPatch {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(deserialize_with = "id::required")]
    pub task_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "id::optional")]
    pub section_id: Option<Id>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub section_id: Option<Id>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdayFlags {
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,
}

impl WeekdayFlags {
    pub fn days(&self) -> Vec<Weekday> {
        [
            (self.monday, Weekday::Mon),
            (self.tuesday, Weekday::Tue),
            (self.wednesday, Weekday::Wed),
            (self.thursday, Weekday::Thu),
            (self.friday, Weekday::Fri),
            (self.saturday, Weekday::Sat),
            (self.sunday, Weekday::Sun),
        ]
        .into_iter()
        .filter_map(|(set, day)| set.then_some(day))
        .collect()
    }

    pub fn includes(&self, day: Weekday) -> bool {
        self.days().contains(&day)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTask {
    #[serde(deserialize_with = "id::required")]
    pub recurring_task_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "id::optional")]
    pub section_id: Option<Id>,
    #[serde(flatten)]
    pub days: WeekdayFlags,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRecurringTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub section_id: Option<Id>,
    #[serde(flatten)]
    pub days: WeekdayFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    #[serde(deserialize_with = "id::required")]
    pub announcement_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub author_id: Id,
    #[serde(default, deserialize_with = "id::optional")]
    pub role_id: Option<Id>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewAnnouncement {
    pub author_id: Option<Id>,
    pub role_id: Option<Id>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    #[serde(deserialize_with = "id::required")]
    pub announcement_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub employee_id: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    #[serde(deserialize_with = "id::required")]
    pub role_id: Id,
    pub role_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRole {
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    #[serde(deserialize_with = "id::required")]
    pub section_id: Id,
    pub section_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSection {
    pub section_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    #[serde(deserialize_with = "id::required")]
    pub availability_id: Id,
    #[serde(deserialize_with = "id::required")]
    pub employee_id: Id,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewAvailability {
    pub employee_id: Option<Id>,
    pub day_of_week: Option<Weekday>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    #[serde(deserialize_with = "id::required")]
    pub schedule_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSchedule {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_coerce_from_strings() {
        let scr: ShiftCoverRequest = serde_json::from_value(json!({
            "cover_request_id": "12",
            "shift_id": 3,
            "requested_employee_id": " 7 ",
            "accepted_employee_id": null,
            "status": "Pending"
        }))
        .unwrap();
        assert_eq!(scr.cover_request_id, 12);
        assert_eq!(scr.requested_employee_id, 7);
        assert_eq!(scr.accepted_employee_id, None);
        assert_eq!(scr.date, None);
    }

    #[test]
    fn test_bad_id_is_rejected() {
        let result = serde_json::from_value::<Role>(json!({"role_id": "abc", "role_name": "Cook"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_recurring_task_flags() {
        let task: RecurringTask = serde_json::from_value(json!({
            "recurring_task_id": 1,
            "title": "Restock napkins",
            "section_id": "2",
            "monday": true,
            "friday": true
        }))
        .unwrap();
        assert_eq!(task.days.days(), vec![Weekday::Mon, Weekday::Fri]);
        assert!(task.days.includes(Weekday::Fri));
        assert!(!task.days.includes(Weekday::Sun));
        assert_eq!(task.section_id, Some(2));
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = CoverRequestPatch {
            status: RequestStatus::Denied,
            accepted_employee_id: None,
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"status": "Denied"}));

        let task_patch = TaskPatch {
            complete: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&task_patch).unwrap(), json!({"complete": true}));
    }
}
