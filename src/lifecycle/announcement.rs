use crate::acknowledgement::AcknowledgementTracker;
use crate::domain::models::Announcement;
use crate::error::ActionError;
use crate::lifecycle::modal::{ModalCore, Prompt};
use crate::lifecycle::{Action, Mutation, OnSubmitted, Outcome, Viewer};
use crate::state::SharedState;

/// Announcement detail. Acknowledging skips the confirmation gate and updates instantly.
pub struct AnnouncementModal {
    core: ModalCore,
    announcement: Announcement,
    viewer: Viewer,
    tracker: AcknowledgementTracker,
}

impl AnnouncementModal {
    pub async fn open(
        state: SharedState,
        announcement: Announcement,
        tracker: AcknowledgementTracker,
    ) -> Result<Self, ActionError> {
        let employee = state.session.current().await.ok_or(ActionError::NoSession)?;
        Self::for_viewer(state, announcement, Viewer::from(&employee), tracker)
    }

    /// The tracker must belong to the viewer; acknowledgements are posted under its employee id.
    pub fn for_viewer(
        state: SharedState,
        announcement: Announcement,
        viewer: Viewer,
        tracker: AcknowledgementTracker,
    ) -> Result<Self, ActionError> {
        if tracker.employee_id() != viewer.employee_id {
            return Err(ActionError::TrackerMismatch {
                viewer: viewer.employee_id,
                tracker: tracker.employee_id(),
            });
        }
        Ok(Self {
            core: ModalCore::new(state),
            announcement,
            viewer,
            tracker,
        })
    }

    pub fn on_submitted(mut self, callback: OnSubmitted) -> Self {
        self.core.set_on_submitted(callback);
        self
    }

    pub fn announcement(&self) -> &Announcement {
        &self.announcement
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    pub fn is_author(&self) -> bool {
        self.announcement.author_id == self.viewer.employee_id
    }

    pub fn is_acknowledged(&self) -> bool {
        self.tracker.is_acknowledged(self.announcement.announcement_id)
    }

    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.is_author() && !self.is_acknowledged() {
            actions.push(Action::Acknowledge);
        }
        if self.is_author() || self.viewer.is_admin {
            actions.push(Action::Delete);
        }
        actions.push(Action::Close);
        actions
    }

    pub async fn perform(&self, action: Action) -> Result<Outcome, ActionError> {
        self.core.ensure_open()?;
        if !self.actions().contains(&action) {
            return Err(ActionError::NotPermitted);
        }

        let id = self.announcement.announcement_id;
        match action {
            Action::Close => {
                self.core.close();
                Ok(Outcome::Closed)
            }
            Action::Acknowledge => {
                // Fire and forget; the tracker handles rollback.
                let _ = self.tracker.acknowledge(id);
                Ok(Outcome::Acknowledged)
            }
            Action::Delete => {
                let prompt = Prompt {
                    title: "Delete Announcement",
                    message: format!("Are you sure you want to delete \"{}\"?", self.announcement.title),
                    success: "Announcement deleted.",
                };
                let client = self.core.state().client.clone();
                let mutation = Mutation::DeleteAnnouncement(id);
                self.core.run(prompt, || async move { mutation.send(&client).await }).await
            }
            _ => Err(ActionError::NotPermitted),
        }
    }
}
