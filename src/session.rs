use crate::api::query::EmployeeFilter;
use crate::api::resources::Employees;
use crate::api::ApiClient;
use crate::domain::models::{Employee, Id};
use crate::error::ApiError;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no employee with id {0}")]
    UnknownEmployee(Id),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The logged-in employee, held in memory only. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Employee>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(&self, employee: Employee) {
        tracing::info!(employee_id = employee.employee_id, admin = employee.admin, "session started");
        *self.current.write().await = Some(employee);
    }

    /// Looks the employee up on the backend and stores them as the current user.
    pub async fn login_by_id(&self, client: &ApiClient, employee_id: Id) -> Result<Employee, SessionError> {
        let filter = EmployeeFilter {
            employee_id: Some(employee_id),
            role_id: None,
        };
        let employee = client
            .get::<Employees>(&filter)
            .await?
            .into_iter()
            .find(|e| e.employee_id == employee_id)
            .ok_or(SessionError::UnknownEmployee(employee_id))?;
        self.login(employee.clone()).await;
        Ok(employee)
    }

    pub async fn logout(&self) {
        if self.current.write().await.take().is_some() {
            tracing::info!("session cleared");
        }
    }

    pub async fn current(&self) -> Option<Employee> {
        self.current.read().await.clone()
    }

    pub async fn employee_id(&self) -> Option<Id> {
        self.current.read().await.as_ref().map(|e| e.employee_id)
    }

    pub async fn is_admin(&self) -> bool {
        self.current.read().await.as_ref().is_some_and(|e| e.admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_login_and_logout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employee"))
            .and(query_param("employee_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"employee_id": "7", "name": "Dana", "wage": 18.5, "admin": true, "primary_role_id": 2}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let session = SessionStore::new();
        assert!(session.current().await.is_none());

        let employee = session.login_by_id(&client, 7).await.unwrap();
        assert_eq!(employee.role_ids(), vec![2]);
        assert_eq!(session.employee_id().await, Some(7));
        assert!(session.is_admin().await);

        session.logout().await;
        assert!(session.current().await.is_none());
        assert!(!session.is_admin().await);
    }

    #[tokio::test]
    async fn test_unknown_employee() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/employee"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let session = SessionStore::new();
        let err = session.login_by_id(&client, 99).await.unwrap_err();
        assert!(matches!(err, SessionError::UnknownEmployee(99)));
        assert!(session.current().await.is_none());
    }
}
