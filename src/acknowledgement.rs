//! Optimistic announcement acknowledgement.
//!
//! The local ID list updates before the request is sent. If the request fails the ID is
//! removed again and the user is alerted, so the list never claims an acknowledgement the
//! backend rejected.

use crate::api::query::AcknowledgementFilter;
use crate::api::ApiClient;
use crate::confirm::Notifier;
use crate::domain::models::{Acknowledgement, Id};
use crate::error::ApiError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct AcknowledgementTracker {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    employee_id: Id,
    acknowledged: Arc<Mutex<Vec<Id>>>,
}

impl AcknowledgementTracker {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, employee_id: Id) -> Self {
        Self {
            client,
            notifier,
            employee_id,
            acknowledged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn ids(&self) -> MutexGuard<'_, Vec<Id>> {
        self.acknowledged
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn employee_id(&self) -> Id {
        self.employee_id
    }

    /// Replaces the local list with what the backend has for this employee.
    pub async fn load(&self) -> Result<(), ApiError> {
        let filter = AcknowledgementFilter {
            employee_id: Some(self.employee_id),
            announcement_id: None,
        };
        let acks = self.client.get_acknowledgements(&filter).await?;
        let mut ids = self.ids();
        ids.clear();
        ids.extend(acks.into_iter().map(|a| a.announcement_id));
        tracing::debug!(employee_id = self.employee_id, count = ids.len(), "acknowledgements loaded");
        Ok(())
    }

    pub fn is_acknowledged(&self, announcement_id: Id) -> bool {
        self.ids().contains(&announcement_id)
    }

    pub fn acknowledged(&self) -> Vec<Id> {
        self.ids().clone()
    }

    /// Marks the announcement acknowledged now and sends the request in the background.
    ///
    /// Returns `None` if it was already acknowledged. The handle resolves once the
    /// request finishes (and any rollback has happened).
    pub fn acknowledge(&self, announcement_id: Id) -> Option<JoinHandle<()>> {
        {
            let mut ids = self.ids();
            if ids.contains(&announcement_id) {
                return None;
            }
            ids.push(announcement_id);
        }

        let tracker = self.clone();
        Some(tokio::spawn(async move {
            let ack = Acknowledgement {
                announcement_id,
                employee_id: tracker.employee_id,
            };
            if let Err(e) = tracker.client.acknowledge_announcement(&ack).await {
                tracing::warn!(announcement_id, "Acknowledgement rolled back: {}", e);
                tracker.ids().retain(|id| *id != announcement_id);
                tracker
                    .notifier
                    .alert("Error", "Could not acknowledge the announcement. Please try again.");
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AlertLog;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tracker_for(uri: &str) -> (AcknowledgementTracker, Arc<AlertLog>) {
        let alerts = Arc::new(AlertLog::new());
        let client = ApiClient::with_base_url(uri).unwrap();
        (AcknowledgementTracker::new(client, alerts.clone(), 7), alerts)
    }

    #[tokio::test]
    async fn acknowledged_before_request_resolves() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/announcement/acknowledge"))
            .and(body_json(json!({"announcement_id": 42, "employee_id": 7})))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
            .expect(1)
            .mount(&server)
            .await;

        let (tracker, alerts) = tracker_for(&server.uri());
        let handle = tracker.acknowledge(42).unwrap();
        assert!(tracker.is_acknowledged(42));
        assert!(!handle.is_finished());

        handle.await.unwrap();
        assert_eq!(tracker.acknowledged(), vec![42]);
        assert!(alerts.titles().is_empty());
    }

    #[tokio::test]
    async fn failure_rolls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/announcement/acknowledge"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let (tracker, alerts) = tracker_for(&server.uri());
        let handle = tracker.acknowledge(42).unwrap();
        assert!(tracker.is_acknowledged(42));

        handle.await.unwrap();
        assert!(!tracker.is_acknowledged(42));
        assert_eq!(alerts.titles(), vec!["Error".to_string()]);
    }

    #[tokio::test]
    async fn repeat_acknowledge_is_a_no_op() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/announcement/acknowledge"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (tracker, _) = tracker_for(&server.uri());
        tracker.acknowledge(5).unwrap().await.unwrap();
        assert!(tracker.acknowledge(5).is_none());
    }

    #[tokio::test]
    async fn load_replaces_local_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/announcement/acknowledgement"))
            .and(query_param("employee_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"announcement_id": 1, "employee_id": 7},
                {"announcement_id": 3, "employee_id": 7}
            ])))
            .mount(&server)
            .await;

        let (tracker, _) = tracker_for(&server.uri());
        tracker.load().await.unwrap();
        assert_eq!(tracker.acknowledged(), vec![1, 3]);
    }
}
