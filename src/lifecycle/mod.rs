//! Detail modals for requests, tasks and announcements.
//!
//! Every variant shares one state machine: which actions are legal depends on
//! who is looking (employee or admin view), whether they own the record, and
//! whether the record is still Pending. Mutating actions all go through
//! [`modal::ModalCore::run`], which handles confirmation, the loading flag,
//! alerts and the parent's refresh callback.

pub mod announcement;
pub mod modal;
pub mod task;

use crate::api::resources::{Announcements, ShiftCoverRequests, Tasks, TimeOffRequests};
use crate::api::ApiClient;
use crate::domain::models::{CoverApproval, CoverRequestPatch, Employee, Id, TaskPatch, TimeOffPatch};
use crate::domain::status::RequestStatus;
use crate::error::ApiError;
use std::sync::Arc;

pub use announcement::AnnouncementModal;
pub use modal::{LifecycleRecord, RequestModal};
pub use task::TaskModal;

/// Called after a successful action, usually to bump the parent screen's refresh trigger.
pub type OnSubmitted = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Claim,
    Delete,
    Accept,
    Deny,
    Complete,
    Acknowledge,
    Close,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Claim => "Claim",
            Action::Delete => "Delete",
            Action::Accept => "Accept",
            Action::Deny => "Deny",
            Action::Complete => "Mark Complete",
            Action::Acknowledge => "Acknowledge",
            Action::Close => "Close",
        }
    }
}

/// Which screen opened the modal. The admin view only does anything for admin viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalVariant {
    Employee,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    ShiftCover,
    TimeOff,
}

impl RequestKind {
    /// Status an admin acts on.
    fn reviewable_status(&self) -> RequestStatus {
        match self {
            RequestKind::ShiftCover => RequestStatus::AwaitingApproval,
            RequestKind::TimeOff => RequestStatus::Pending,
        }
    }
}

/// How an admin acceptance of a cover request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalMode {
    /// Plain status patch.
    #[default]
    Update,
    /// `/scr/approve/{id}`: the backend also hands the shift to the claimant.
    Approve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub employee_id: Id,
    pub is_admin: bool,
}

impl From<&Employee> for Viewer {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id,
            is_admin: employee.admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The route call succeeded and the modal closed.
    Completed,
    /// The confirmation was declined; nothing was sent.
    Cancelled,
    Closed,
    /// Recorded locally; the network call continues in the background.
    Acknowledged,
}

/// Actions offered for a cover or time-off request, `Close` always last.
pub fn request_actions(
    kind: RequestKind,
    variant: ModalVariant,
    viewer: &Viewer,
    requester_id: Id,
    status: RequestStatus,
) -> Vec<Action> {
    let is_owner = requester_id == viewer.employee_id;
    let mut actions = Vec::new();

    match variant {
        ModalVariant::Employee => {
            if !status.is_locked() {
                if is_owner {
                    actions.push(Action::Delete);
                } else if kind == RequestKind::ShiftCover {
                    actions.push(Action::Claim);
                }
            }
        }
        ModalVariant::Admin => {
            if viewer.is_admin && status == kind.reviewable_status() {
                actions.push(Action::Accept);
                actions.push(Action::Deny);
            }
        }
    }

    actions.push(Action::Close);
    actions
}

/// A single route call, planned from an action before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    UpdateCoverRequest { id: Id, patch: CoverRequestPatch },
    ApproveCoverRequest { id: Id, approval: CoverApproval },
    DeleteCoverRequest(Id),
    UpdateTimeOff { id: Id, patch: TimeOffPatch },
    DeleteTimeOff(Id),
    UpdateTask { id: Id, patch: TaskPatch },
    DeleteTask(Id),
    DeleteAnnouncement(Id),
}

impl Mutation {
    pub async fn send(&self, client: &ApiClient) -> Result<(), ApiError> {
        match self {
            Mutation::UpdateCoverRequest { id, patch } => client.update::<ShiftCoverRequests>(*id, patch).await,
            Mutation::ApproveCoverRequest { id, approval } => client.approve_cover_request(*id, approval).await,
            Mutation::DeleteCoverRequest(id) => client.delete::<ShiftCoverRequests>(*id).await,
            Mutation::UpdateTimeOff { id, patch } => client.update::<TimeOffRequests>(*id, patch).await,
            Mutation::DeleteTimeOff(id) => client.delete::<TimeOffRequests>(*id).await,
            Mutation::UpdateTask { id, patch } => client.update::<Tasks>(*id, patch).await,
            Mutation::DeleteTask(id) => client.delete::<Tasks>(*id).await,
            Mutation::DeleteAnnouncement(id) => client.delete::<Announcements>(*id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    const OWNER: Viewer = Viewer {
        employee_id: 7,
        is_admin: false,
    };
    const COWORKER: Viewer = Viewer {
        employee_id: 8,
        is_admin: false,
    };
    const MANAGER: Viewer = Viewer {
        employee_id: 1,
        is_admin: true,
    };

    fn cover(variant: ModalVariant, viewer: &Viewer, status: RequestStatus) -> Vec<Action> {
        request_actions(RequestKind::ShiftCover, variant, viewer, 7, status)
    }

    #[test]
    fn test_pending_cover_request() {
        assert_eq!(cover(ModalVariant::Employee, &COWORKER, Pending), vec![Action::Claim, Action::Close]);
        assert_eq!(cover(ModalVariant::Employee, &OWNER, Pending), vec![Action::Delete, Action::Close]);
        assert!(!cover(ModalVariant::Employee, &OWNER, Pending).contains(&Action::Claim));
        assert_eq!(cover(ModalVariant::Admin, &MANAGER, Pending), vec![Action::Close]);
    }

    #[test]
    fn test_locked_statuses_only_close() {
        for status in [AwaitingApproval, Accepted, Denied] {
            for viewer in [&OWNER, &COWORKER] {
                assert_eq!(cover(ModalVariant::Employee, viewer, status), vec![Action::Close]);
            }
        }
    }

    #[test]
    fn test_admin_review() {
        assert_eq!(
            cover(ModalVariant::Admin, &MANAGER, AwaitingApproval),
            vec![Action::Accept, Action::Deny, Action::Close]
        );
        // The admin view does nothing for a non-admin.
        assert_eq!(cover(ModalVariant::Admin, &COWORKER, AwaitingApproval), vec![Action::Close]);
        assert_eq!(cover(ModalVariant::Admin, &MANAGER, Accepted), vec![Action::Close]);
    }

    #[test]
    fn test_time_off_rules() {
        let tor = |variant, viewer: &Viewer, status| request_actions(RequestKind::TimeOff, variant, viewer, 7, status);
        assert_eq!(tor(ModalVariant::Employee, &OWNER, Pending), vec![Action::Delete, Action::Close]);
        assert_eq!(tor(ModalVariant::Employee, &COWORKER, Pending), vec![Action::Close]);
        assert_eq!(
            tor(ModalVariant::Admin, &MANAGER, Pending),
            vec![Action::Accept, Action::Deny, Action::Close]
        );
        assert_eq!(tor(ModalVariant::Admin, &MANAGER, Denied), vec![Action::Close]);
    }
}
