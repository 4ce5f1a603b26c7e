use crate::domain::models::{
    CoverApproval, CoverRequestPatch, Id, ShiftCoverRequest, TimeOffPatch, TimeOffRequest,
};
use crate::domain::status::RequestStatus;
use crate::error::{ActionError, ApiError};
use crate::lifecycle::{
    request_actions, Action, ApprovalMode, ModalVariant, Mutation, OnSubmitted, Outcome, RequestKind,
    Viewer,
};
use crate::state::SharedState;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// A yes/no prompt shown before an action runs.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub title: &'static str,
    pub message: String,
    pub success: &'static str,
}

/// Open/loading flags plus the shared confirm → call → alert → refresh → close sequence.
///
/// The loading flag is taken before the confirmation prompt, so a second action on the same
/// open fails with `Busy` instead of queueing behind the first.
pub struct ModalCore {
    state: SharedState,
    open: AtomicBool,
    loading: AtomicBool,
    on_submitted: Option<OnSubmitted>,
}

/// Clears the loading flag however the route call ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ModalCore {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            open: AtomicBool::new(true),
            loading: AtomicBool::new(false),
            on_submitted: None,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn set_on_submitted(&mut self, callback: OnSubmitted) {
        self.on_submitted = Some(callback);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn ensure_open(&self) -> Result<(), ActionError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ActionError::Closed)
        }
    }

    pub async fn run<F, Fut>(&self, prompt: Prompt, call: F) -> Result<Outcome, ActionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        self.ensure_open()?;

        // Held from the prompt through the call, so one open sends at most one mutation.
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ActionError::Busy);
        }
        let _loading = LoadingGuard(&self.loading);

        if !self.state.confirm.confirm(prompt.title, &prompt.message).await {
            tracing::debug!(title = prompt.title, "action declined");
            return Ok(Outcome::Cancelled);
        }
        // Close is allowed while a prompt is up.
        self.ensure_open()?;

        match call().await {
            Ok(()) => {
                self.state.notifier.alert("Success", prompt.success);
                if let Some(callback) = &self.on_submitted {
                    callback();
                }
                self.close();
                Ok(Outcome::Completed)
            }
            Err(e) => {
                tracing::error!(title = prompt.title, "Action failed: {}", e);
                self.state.notifier.alert("Error", GENERIC_FAILURE);
                Err(e.into())
            }
        }
    }
}

/// A cover or time-off request as seen by the lifecycle modal.
pub trait LifecycleRecord: Clone + Send + Sync + 'static {
    const KIND: RequestKind;

    fn record_id(&self) -> Id;
    fn requester_id(&self) -> Id;
    fn status(&self) -> RequestStatus;

    /// The single route call for `action`, or `None` if it has no meaning here.
    fn plan(&self, action: Action, viewer: &Viewer, mode: ApprovalMode) -> Option<Mutation>;
}

fn target_status(action: Action) -> Option<RequestStatus> {
    match action {
        Action::Claim => Some(RequestStatus::AwaitingApproval),
        Action::Accept => Some(RequestStatus::Accepted),
        Action::Deny => Some(RequestStatus::Denied),
        _ => None,
    }
}

impl LifecycleRecord for ShiftCoverRequest {
    const KIND: RequestKind = RequestKind::ShiftCover;

    fn record_id(&self) -> Id {
        self.cover_request_id
    }

    fn requester_id(&self) -> Id {
        self.requested_employee_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn plan(&self, action: Action, viewer: &Viewer, mode: ApprovalMode) -> Option<Mutation> {
        let id = self.cover_request_id;
        match action {
            Action::Claim => Some(Mutation::UpdateCoverRequest {
                id,
                patch: CoverRequestPatch {
                    status: RequestStatus::AwaitingApproval,
                    accepted_employee_id: Some(viewer.employee_id),
                },
            }),
            // No claimant means there is nobody to hand the shift to.
            Action::Accept if mode == ApprovalMode::Approve => {
                self.accepted_employee_id.map(|claimant| Mutation::ApproveCoverRequest {
                    id,
                    approval: CoverApproval {
                        status: RequestStatus::Accepted,
                        shift_id: self.shift_id,
                        accepted_employee_id: claimant,
                    },
                })
            }
            Action::Accept => Some(Mutation::UpdateCoverRequest {
                id,
                patch: CoverRequestPatch {
                    status: RequestStatus::Accepted,
                    accepted_employee_id: None,
                },
            }),
            Action::Deny => Some(Mutation::UpdateCoverRequest {
                id,
                patch: CoverRequestPatch {
                    status: RequestStatus::Denied,
                    accepted_employee_id: None,
                },
            }),
            Action::Delete => Some(Mutation::DeleteCoverRequest(id)),
            _ => None,
        }
    }
}

impl LifecycleRecord for TimeOffRequest {
    const KIND: RequestKind = RequestKind::TimeOff;

    fn record_id(&self) -> Id {
        self.request_id
    }

    fn requester_id(&self) -> Id {
        self.employee_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn plan(&self, action: Action, _viewer: &Viewer, _mode: ApprovalMode) -> Option<Mutation> {
        let id = self.request_id;
        match action {
            Action::Accept => Some(Mutation::UpdateTimeOff {
                id,
                patch: TimeOffPatch {
                    status: RequestStatus::Accepted,
                },
            }),
            Action::Deny => Some(Mutation::UpdateTimeOff {
                id,
                patch: TimeOffPatch {
                    status: RequestStatus::Denied,
                },
            }),
            Action::Delete => Some(Mutation::DeleteTimeOff(id)),
            _ => None,
        }
    }
}

/// One request record plus the actions its viewer may take; at most one mutation per open.
pub struct RequestModal<R: LifecycleRecord> {
    core: ModalCore,
    record: R,
    variant: ModalVariant,
    viewer: Viewer,
    approval: ApprovalMode,
}

impl<R: LifecycleRecord> RequestModal<R> {
    /// Opens the modal for whoever is logged in.
    pub async fn open(state: SharedState, record: R, variant: ModalVariant) -> Result<Self, ActionError> {
        let employee = state.session.current().await.ok_or(ActionError::NoSession)?;
        let viewer = Viewer::from(&employee);
        Ok(Self::for_viewer(state, record, variant, viewer))
    }

    pub fn for_viewer(state: SharedState, record: R, variant: ModalVariant, viewer: Viewer) -> Self {
        Self {
            core: ModalCore::new(state),
            record,
            variant,
            viewer,
            approval: ApprovalMode::default(),
        }
    }

    pub fn on_submitted(mut self, callback: OnSubmitted) -> Self {
        self.core.set_on_submitted(callback);
        self
    }

    pub fn approval_mode(mut self, mode: ApprovalMode) -> Self {
        self.approval = mode;
        self
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn is_owner(&self) -> bool {
        self.record.requester_id() == self.viewer.employee_id
    }

    pub fn is_locked(&self) -> bool {
        self.record.status().is_locked()
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn actions(&self) -> Vec<Action> {
        request_actions(
            R::KIND,
            self.variant,
            &self.viewer,
            self.record.requester_id(),
            self.record.status(),
        )
    }

    pub async fn perform(&self, action: Action) -> Result<Outcome, ActionError> {
        self.core.ensure_open()?;
        if !self.actions().contains(&action) {
            return Err(ActionError::NotPermitted);
        }
        if action == Action::Close {
            self.core.close();
            return Ok(Outcome::Closed);
        }
        if let Some(next) = target_status(action) {
            if !self.record.status().can_transition_to(next) {
                return Err(ActionError::NotPermitted);
            }
        }

        let mutation = self
            .record
            .plan(action, &self.viewer, self.approval)
            .ok_or(ActionError::NotPermitted)?;
        let client = self.core.state().client.clone();
        let prompt = prompt_for(R::KIND, action);

        tracing::info!(
            kind = ?R::KIND,
            id = self.record.record_id(),
            action = action.label(),
            "performing request action"
        );
        self.core.run(prompt, || async move { mutation.send(&client).await }).await
    }
}

fn prompt_for(kind: RequestKind, action: Action) -> Prompt {
    let noun = match kind {
        RequestKind::ShiftCover => "shift cover request",
        RequestKind::TimeOff => "time off request",
    };
    match action {
        Action::Claim => Prompt {
            title: "Claim Shift",
            message: "Are you sure you want to pick up this shift?".to_string(),
            success: "Shift claimed. A manager will review it.",
        },
        Action::Accept => Prompt {
            title: "Accept Request",
            message: format!("Accept this {noun}?"),
            success: "Request accepted.",
        },
        Action::Deny => Prompt {
            title: "Deny Request",
            message: format!("Deny this {noun}?"),
            success: "Request denied.",
        },
        _ => Prompt {
            title: "Delete Request",
            message: format!("Are you sure you want to delete this {noun}?"),
            success: "Request deleted.",
        },
    }
}
