//! How each entity shows up as a row in a list screen.

use crate::domain::format::{format_date, format_date_range, format_time, format_timestamp, format_weekdays};
use crate::domain::models::{Announcement, Id, RecurringTask, Shift, ShiftCoverRequest, Task, TimeOffRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: Id,
    pub title: String,
    pub subtitle: String,
    pub badge: Option<String>,
    /// Pressing the row opens a detail modal.
    pub opens_detail: bool,
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub timezone: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

pub trait ListItemTemplate {
    /// Placeholder shown when a fetch returns nothing.
    const EMPTY_TEXT: &'static str;

    fn list_item(&self, ctx: &RenderContext) -> ListItem;
}

impl ListItemTemplate for Announcement {
    const EMPTY_TEXT: &'static str = "No announcements";

    fn list_item(&self, ctx: &RenderContext) -> ListItem {
        ListItem {
            id: self.announcement_id,
            title: self.title.clone(),
            subtitle: format_timestamp(&ctx.timezone, self.timestamp),
            badge: None,
            opens_detail: true,
        }
    }
}

impl ListItemTemplate for Task {
    const EMPTY_TEXT: &'static str = "No tasks";

    fn list_item(&self, _ctx: &RenderContext) -> ListItem {
        let subtitle = match self.due_date {
            Some(date) => format!("Due {}", format_date(date)),
            None => "No due date".to_string(),
        };
        ListItem {
            id: self.task_id,
            title: self.title.clone(),
            subtitle,
            badge: self.complete.then(|| "Complete".to_string()),
            opens_detail: true,
        }
    }
}

impl ListItemTemplate for RecurringTask {
    const EMPTY_TEXT: &'static str = "No recurring tasks";

    fn list_item(&self, _ctx: &RenderContext) -> ListItem {
        ListItem {
            id: self.recurring_task_id,
            title: self.title.clone(),
            subtitle: format_weekdays(&self.days),
            badge: None,
            opens_detail: false,
        }
    }
}

impl ListItemTemplate for ShiftCoverRequest {
    const EMPTY_TEXT: &'static str = "No shift cover requests";

    fn list_item(&self, _ctx: &RenderContext) -> ListItem {
        let title = match (self.date, self.start_time) {
            (Some(date), Some(time)) => format!("{} at {}", format_date(date), format_time(time)),
            (Some(date), None) => format_date(date),
            _ => format!("Shift #{}", self.shift_id),
        };
        ListItem {
            id: self.cover_request_id,
            title,
            subtitle: format!("Requested by employee #{}", self.requested_employee_id),
            badge: Some(self.status.to_string()),
            opens_detail: true,
        }
    }
}

impl ListItemTemplate for TimeOffRequest {
    const EMPTY_TEXT: &'static str = "No time off requests";

    fn list_item(&self, _ctx: &RenderContext) -> ListItem {
        ListItem {
            id: self.request_id,
            title: format_date_range(self.start_date, self.end_date),
            subtitle: self.reason.clone(),
            badge: Some(self.status.to_string()),
            opens_detail: true,
        }
    }
}

impl ListItemTemplate for Shift {
    const EMPTY_TEXT: &'static str = "No shifts";

    fn list_item(&self, _ctx: &RenderContext) -> ListItem {
        let subtitle = match self.end_time {
            Some(end) => format!("{} – {}", format_time(self.start_time), format_time(end)),
            None => format_time(self.start_time),
        };
        ListItem {
            id: self.shift_id,
            title: format_date(self.date),
            subtitle,
            badge: None,
            opens_detail: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cover_request, task, time_off};

    #[test]
    fn test_time_off_range_label() {
        let ctx = RenderContext::default();
        let mut tor = time_off(3, 7, "Pending");
        assert_eq!(tor.list_item(&ctx).title, "Mar 4, 2025 → Mar 6, 2025");
        tor.end_date = tor.start_date;
        let item = tor.list_item(&ctx);
        assert_eq!(item.title, "Mar 4, 2025");
        assert_eq!(item.badge.as_deref(), Some("Pending"));
    }

    #[test]
    fn test_cover_request_row() {
        let item = cover_request(11, 7, "Awaiting Approval").list_item(&RenderContext::default());
        assert_eq!(item.title, "Mar 8, 2025 at 9:00 AM");
        assert_eq!(item.badge.as_deref(), Some("Awaiting Approval"));
        assert!(item.opens_detail);
    }

    #[test]
    fn test_task_row() {
        let ctx = RenderContext::default();
        assert_eq!(task(1, false).list_item(&ctx).subtitle, "Due Mar 4, 2025");
        assert_eq!(task(1, false).list_item(&ctx).badge, None);
        assert_eq!(task(1, true).list_item(&ctx).badge.as_deref(), Some("Complete"));
    }
}
