use crate::domain::models::Id;
use crate::domain::status::RequestStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of query pairs. Repeated keys are kept, which is how array filters go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn opt<V: fmt::Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn many<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Any list filter that can be flattened into query pairs.
pub trait ListFilter {
    fn to_query(&self) -> QueryParams;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateSort {
    Newest,
    Oldest,
}

impl fmt::Display for DateSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSort::Newest => f.write_str("Newest"),
            DateSort::Oldest => f.write_str("Oldest"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;

impl ListFilter for NoFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub employee_id: Option<Id>,
    pub role_id: Option<Id>,
}

impl ListFilter for EmployeeFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("employee_id", self.employee_id).opt("role_id", self.role_id);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementFilter {
    pub role_id: Option<Id>,
    pub author_id: Option<Id>,
    pub date_sort: Option<DateSort>,
}

impl ListFilter for AnnouncementFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("role_id", self.role_id)
            .opt("author_id", self.author_id)
            .opt("date_sort", self.date_sort);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcknowledgementFilter {
    pub employee_id: Option<Id>,
    pub announcement_id: Option<Id>,
}

impl ListFilter for AcknowledgementFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("employee_id", self.employee_id)
            .opt("announcement_id", self.announcement_id);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub section_id: Option<Id>,
    pub due_date: Option<NaiveDate>,
    pub complete: Option<bool>,
    pub date_sort: Option<DateSort>,
}

impl ListFilter for TaskFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("section_id", self.section_id)
            .opt("due_date", self.due_date)
            .opt("complete", self.complete)
            .opt("date_sort", self.date_sort);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringTaskFilter {
    pub section_id: Option<Id>,
}

impl ListFilter for RecurringTaskFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("section_id", self.section_id);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFilter {
    pub employee_id: Option<Id>,
    pub section_id: Option<Id>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListFilter for ShiftFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("employee_id", self.employee_id)
            .opt("section_id", self.section_id)
            .opt("start_date", self.start_date)
            .opt("end_date", self.end_date);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListFilter for ScheduleFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("start_date", self.start_date).opt("end_date", self.end_date);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityFilter {
    pub employee_id: Option<Id>,
}

impl ListFilter for AvailabilityFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("employee_id", self.employee_id);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftCoverFilter {
    pub requested_employee_id: Option<Id>,
    pub accepted_employee_id: Option<Id>,
    pub status: Vec<RequestStatus>,
    pub section_id: Option<Id>,
    pub role_id: Option<Id>,
    pub date_sort: Option<DateSort>,
}

impl ListFilter for ShiftCoverFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("requested_employee_id", self.requested_employee_id)
            .opt("accepted_employee_id", self.accepted_employee_id)
            .many("status", &self.status)
            .opt("section_id", self.section_id)
            .opt("role_id", self.role_id)
            .opt("date_sort", self.date_sort);
        q
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeOffFilter {
    pub employee_id: Option<Id>,
    pub status: Vec<RequestStatus>,
    pub date_sort: Option<DateSort>,
}

impl ListFilter for TimeOffFilter {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.opt("employee_id", self.employee_id)
            .many("status", &self.status)
            .opt("date_sort", self.date_sort);
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_become_repeated_keys() {
        let filter = ShiftCoverFilter {
            status: vec![RequestStatus::Pending, RequestStatus::Denied],
            ..Default::default()
        };
        let pairs: Vec<_> = filter.to_query().pairs().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "Pending".to_string()),
                ("status".to_string(), "Denied".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        assert!(TimeOffFilter::default().to_query().is_empty());
        assert!(NoFilter.to_query().is_empty());
    }
}
