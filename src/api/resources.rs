//! One marker type per backend resource, tying its path to its record, filter and insert payload.

use crate::api::query::{
    AcknowledgementFilter, AnnouncementFilter, AvailabilityFilter, EmployeeFilter, ListFilter,
    NoFilter, RecurringTaskFilter, ScheduleFilter, ShiftCoverFilter, ShiftFilter, TaskFilter,
    TimeOffFilter,
};
use crate::domain::models::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Resource: Send + Sync + 'static {
    /// Path prefix, e.g. `/tor`; verbs hang off it as `/insert`, `/update/{id}`, `/delete/{id}`.
    const PATH: &'static str;
    /// Human-readable name used in logs and validation errors.
    const NAME: &'static str;
    /// Keys an insert payload must carry with a non-null value.
    const REQUIRED: &'static [&'static str];

    type Record: DeserializeOwned + Clone + Send + Sync + 'static;
    type Filter: ListFilter + Clone + PartialEq + Send + Sync + 'static;
    type Draft: Serialize + Send + Sync;
}

macro_rules! resource {
    ($marker:ident, $path:literal, $name:literal, [$($req:literal),*], $record:ty, $filter:ty, $draft:ty) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Resource for $marker {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
            const REQUIRED: &'static [&'static str] = &[$($req),*];

            type Record = $record;
            type Filter = $filter;
            type Draft = $draft;
        }
    };
}

resource!(Employees, "/employee", "employee", ["name"], Employee, EmployeeFilter, NewEmployee);
resource!(
    Announcements,
    "/announcement",
    "announcement",
    ["author_id", "title", "description"],
    Announcement,
    AnnouncementFilter,
    NewAnnouncement
);
resource!(
    Tasks,
    "/task",
    "task",
    ["title", "description", "section_id", "due_date"],
    Task,
    TaskFilter,
    NewTask
);
resource!(
    RecurringTasks,
    "/recurring-task",
    "recurring task",
    ["title", "description", "section_id"],
    RecurringTask,
    RecurringTaskFilter,
    NewRecurringTask
);
resource!(
    ShiftCoverRequests,
    "/scr",
    "shift cover request",
    ["shift_id", "requested_employee_id", "status"],
    ShiftCoverRequest,
    ShiftCoverFilter,
    NewShiftCoverRequest
);
resource!(
    TimeOffRequests,
    "/tor",
    "time off request",
    ["employee_id", "start_date", "end_date", "reason", "status"],
    TimeOffRequest,
    TimeOffFilter,
    NewTimeOffRequest
);
resource!(
    Shifts,
    "/shift",
    "shift",
    ["employee_id", "section_id", "date", "start_time"],
    Shift,
    ShiftFilter,
    NewShift
);
resource!(
    Schedules,
    "/schedule",
    "schedule",
    ["start_date", "end_date"],
    Schedule,
    ScheduleFilter,
    NewSchedule
);
resource!(Roles, "/role", "role", ["role_name"], Role, NoFilter, NewRole);
resource!(Sections, "/section", "section", ["section_name"], Section, NoFilter, NewSection);
resource!(
    Availabilities,
    "/availability",
    "availability",
    ["employee_id", "day_of_week", "start_time", "end_time"],
    Availability,
    AvailabilityFilter,
    NewAvailability
);
