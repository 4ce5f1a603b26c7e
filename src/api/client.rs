//! HTTP client for the scheduling backend.
//!
//! [`ApiClient`] exposes one generic operation per verb, parameterized by a
//! [`Resource`] marker, plus the handful of endpoints that don't fit the
//! insert/update/delete shape. Failures are logged and returned; nothing retries.

use crate::api::query::{AcknowledgementFilter, ListFilter, QueryParams};
use crate::api::resources::{Announcements, Resource, ShiftCoverRequests, Tasks};
use crate::config::Config;
use crate::domain::models::{Acknowledgement, CoverApproval, Id};
use crate::error::ApiError;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::build(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url).map_err(|e| ApiError::Url(e.to_string()))?;
        Self::build(url, Duration::from_secs(15))
    }

    fn build(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ApiError::Url(e.to_string()))
    }

    /// Full list URL for `path` with `query` appended; array filters stay as repeated keys.
    pub fn list_url(&self, path: &str, query: &QueryParams) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path = url.path(), status = %status, "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            method: method.to_string(),
            path: url.path().to_string(),
            body,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, url, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_json(&self, method: Method, path: &str, body: Option<&Value>) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.execute(method, url, body).await?;
        Ok(())
    }

    pub async fn get<R: Resource>(&self, filter: &R::Filter) -> Result<Vec<R::Record>, ApiError> {
        let result: Result<Vec<R::Record>, ApiError> = async {
            let url = self.list_url(R::PATH, &filter.to_query())?;
            self.fetch_json(url).await
        }
        .await;
        log_failure("fetch", R::NAME, result)
    }

    pub async fn insert<R: Resource>(&self, draft: &R::Draft) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = async {
            let payload = serde_json::to_value(draft)?;
            let missing = missing_required(R::REQUIRED, &payload);
            if !missing.is_empty() {
                return Err(ApiError::Validation {
                    resource: R::NAME,
                    missing,
                });
            }
            self.send_json(Method::POST, &format!("{}/insert", R::PATH), Some(&payload))
                .await
        }
        .await;
        log_failure("insert", R::NAME, result)
    }

    pub async fn update<R: Resource>(&self, id: Id, patch: &impl Serialize) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = async {
            let payload = serde_json::to_value(patch)?;
            self.send_json(Method::PATCH, &format!("{}/update/{id}", R::PATH), Some(&payload))
                .await
        }
        .await;
        log_failure("update", R::NAME, result)
    }

    pub async fn delete<R: Resource>(&self, id: Id) -> Result<(), ApiError> {
        let result = self
            .send_json(Method::DELETE, &format!("{}/delete/{id}", R::PATH), None)
            .await;
        log_failure("delete", R::NAME, result)
    }

    pub async fn acknowledge_announcement(&self, ack: &Acknowledgement) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = async {
            let payload = serde_json::to_value(ack)?;
            self.send_json(
                Method::POST,
                &format!("{}/acknowledge", Announcements::PATH),
                Some(&payload),
            )
            .await
        }
        .await;
        log_failure("acknowledge", Announcements::NAME, result)
    }

    pub async fn get_acknowledgements(
        &self,
        filter: &AcknowledgementFilter,
    ) -> Result<Vec<Acknowledgement>, ApiError> {
        let result: Result<Vec<Acknowledgement>, ApiError> = async {
            let path = format!("{}/acknowledgement", Announcements::PATH);
            let url = self.list_url(&path, &filter.to_query())?;
            self.fetch_json(url).await
        }
        .await;
        log_failure("fetch acknowledgements", Announcements::NAME, result)
    }

    /// Asks the backend to materialize the recurring tasks that fall on `date`.
    pub async fn convert_recurring_tasks(&self, date: NaiveDate) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "date": date });
        let result = self
            .send_json(Method::POST, &format!("{}/convert", Tasks::PATH), Some(&payload))
            .await;
        log_failure("convert", Tasks::NAME, result)
    }

    pub async fn approve_cover_request(&self, id: Id, approval: &CoverApproval) -> Result<(), ApiError> {
        let result: Result<(), ApiError> = async {
            let payload = serde_json::to_value(approval)?;
            self.send_json(
                Method::PATCH,
                &format!("{}/approve/{id}", ShiftCoverRequests::PATH),
                Some(&payload),
            )
            .await
        }
        .await;
        log_failure("approve", ShiftCoverRequests::NAME, result)
    }
}

fn log_failure<T>(op: &str, resource: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        error!(op, resource, status = ?e.status(), "request failed: {}", e);
    }
    result
}

/// Required keys that are absent or null in `payload`.
fn missing_required(required: &[&str], payload: &Value) -> Vec<String> {
    required
        .iter()
        .filter(|key| payload.get(**key).map_or(true, Value::is_null))
        .map(|key| key.to_string())
        .collect()
}
