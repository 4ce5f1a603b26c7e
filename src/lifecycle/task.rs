use crate::domain::models::{Task, TaskPatch};
use crate::error::ActionError;
use crate::lifecycle::modal::{ModalCore, Prompt};
use crate::lifecycle::{Action, Mutation, OnSubmitted, Outcome, Viewer};
use crate::state::SharedState;

pub struct TaskModal {
    core: ModalCore,
    task: Task,
    viewer: Viewer,
}

impl TaskModal {
    pub async fn open(state: SharedState, task: Task) -> Result<Self, ActionError> {
        let employee = state.session.current().await.ok_or(ActionError::NoSession)?;
        Ok(Self::for_viewer(state, task, Viewer::from(&employee)))
    }

    pub fn for_viewer(state: SharedState, task: Task, viewer: Viewer) -> Self {
        Self {
            core: ModalCore::new(state),
            task,
            viewer,
        }
    }

    pub fn on_submitted(mut self, callback: OnSubmitted) -> Self {
        self.core.set_on_submitted(callback);
        self
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.task.complete {
            actions.push(Action::Complete);
        }
        if self.viewer.is_admin {
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

        let id = self.task.task_id;
        let (mutation, prompt) = match action {
            Action::Close => {
                self.core.close();
                return Ok(Outcome::Closed);
            }
            Action::Complete => (
                Mutation::UpdateTask {
                    id,
                    patch: TaskPatch {
                        complete: Some(true),
                        ..Default::default()
                    },
                },
                Prompt {
                    title: "Complete Task",
                    message: format!("Mark \"{}\" as complete?", self.task.title),
                    success: "Task completed.",
                },
            ),
            Action::Delete => (
                Mutation::DeleteTask(id),
                Prompt {
                    title: "Delete Task",
                    message: format!("Are you sure you want to delete \"{}\"?", self.task.title),
                    success: "Task deleted.",
                },
            ),
            _ => return Err(ActionError::NotPermitted),
        };

        let client = self.core.state().client.clone();
        self.core.run(prompt, || async move { mutation.send(&client).await }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{state_for, task};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STAFF: Viewer = Viewer {
        employee_id: 8,
        is_admin: false,
    };

    #[tokio::test]
    async fn complete_patches_task() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/task/update/5"))
            .and(body_json(json!({"complete": true})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _) = state_for(&server.uri(), true);
        let modal = TaskModal::for_viewer(state, task(5, false), STAFF);
        assert_eq!(modal.actions(), vec![Action::Complete, Action::Close]);
        assert_eq!(modal.perform(Action::Complete).await.unwrap(), Outcome::Completed);
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn declined_completion_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (state, _) = state_for(&server.uri(), false);
        let modal = TaskModal::for_viewer(state, task(5, false), STAFF);
        assert_eq!(modal.perform(Action::Complete).await.unwrap(), Outcome::Cancelled);
        assert!(modal.is_open());
    }

    #[tokio::test]
    async fn only_admins_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/task/delete/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _) = state_for(&server.uri(), true);
        let staff_modal = TaskModal::for_viewer(state.clone(), task(5, true), STAFF);
        assert_eq!(staff_modal.actions(), vec![Action::Close]);
        assert!(matches!(staff_modal.perform(Action::Delete).await, Err(ActionError::NotPermitted)));

        let admin = Viewer {
            employee_id: 1,
            is_admin: true,
        };
        let admin_modal = TaskModal::for_viewer(state, task(5, true), admin);
        assert_eq!(admin_modal.actions(), vec![Action::Delete, Action::Close]);
        assert_eq!(admin_modal.perform(Action::Delete).await.unwrap(), Outcome::Completed);
    }
}
