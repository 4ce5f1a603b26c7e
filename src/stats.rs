//! Dashboard counters, fetched concurrently and kept fresh by polling.

use crate::api::query::{ShiftCoverFilter, TaskFilter, TimeOffFilter};
use crate::api::resources::{ShiftCoverRequests, Tasks, TimeOffRequests};
use crate::api::ApiClient;
use crate::domain::format::local_date;
use crate::domain::status::RequestStatus;
use crate::error::ApiError;
use crate::polling::{spawn_polling, FirstTick};
use crate::state::SharedState;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct QuickStats {
    pub open_cover_requests: usize,
    pub awaiting_cover_approval: usize,
    pub pending_time_off: usize,
    /// Incomplete tasks due today.
    pub incomplete_tasks: usize,
}

pub async fn fetch_quick_stats(client: &ApiClient, today: NaiveDate) -> Result<QuickStats, ApiError> {
    let open = ShiftCoverFilter {
        status: vec![RequestStatus::Pending],
        ..Default::default()
    };
    let awaiting = ShiftCoverFilter {
        status: vec![RequestStatus::AwaitingApproval],
        ..Default::default()
    };
    let time_off = TimeOffFilter {
        status: vec![RequestStatus::Pending],
        ..Default::default()
    };
    let tasks = TaskFilter {
        due_date: Some(today),
        complete: Some(false),
        ..Default::default()
    };

    let (open, awaiting, time_off, tasks) = futures::try_join!(
        client.get::<ShiftCoverRequests>(&open),
        client.get::<ShiftCoverRequests>(&awaiting),
        client.get::<TimeOffRequests>(&time_off),
        client.get::<Tasks>(&tasks),
    )?;

    Ok(QuickStats {
        open_cover_requests: open.len(),
        awaiting_cover_approval: awaiting.len(),
        pending_time_off: time_off.len(),
        incomplete_tasks: tasks.len(),
    })
}

pub struct QuickStatsPanel {
    client: ApiClient,
    timezone: String,
    latest: Mutex<Option<QuickStats>>,
    cancel: CancellationToken,
    changes: watch::Sender<u64>,
}

impl QuickStatsPanel {
    pub fn new(state: &SharedState) -> Arc<Self> {
        let (changes, _) = watch::channel(0);
        Arc::new(Self {
            client: state.client.clone(),
            timezone: state.config.timezone.clone(),
            latest: Mutex::new(None),
            cancel: CancellationToken::new(),
            changes,
        })
    }

    /// `None` until the first successful fetch.
    pub fn latest(&self) -> Option<QuickStats> {
        *self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Fetches and stores fresh numbers. `Ok(None)` means the panel was unmounted and
    /// nothing was applied. On failure the previous numbers stay on screen.
    pub async fn refresh(&self) -> Result<Option<QuickStats>, ApiError> {
        let today = local_date(&self.timezone, Utc::now());
        let stats = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(None),
            result = fetch_quick_stats(&self.client, today) => result?,
        };
        if self.cancel.is_cancelled() {
            return Ok(None);
        }

        *self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(stats);
        self.changes.send_modify(|n| *n += 1);
        Ok(Some(stats))
    }

    pub fn poll(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let panel = Arc::clone(self);
        spawn_polling("quick stats", every, FirstTick::Immediate, self.cancel.child_token(), move || {
            let panel = Arc::clone(&panel);
            async move {
                if let Err(e) = panel.refresh().await {
                    tracing::warn!(error = %e, "quick stats refresh failed");
                }
            }
        })
    }

    pub fn unmount(&self) {
        self.cancel.cancel();
    }
}
