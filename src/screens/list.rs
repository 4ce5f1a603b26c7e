use crate::api::{ApiClient, Resource};
use crate::error::ApiError;
use crate::polling::{spawn_polling, FirstTick};
use crate::screens::templates::{ListItem, ListItemTemplate, RenderContext};
use crate::screens::trigger::RefreshTrigger;
use crate::state::SharedState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error(String),
    Empty(&'static str),
    Items(Vec<ListItem>),
}

struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    applied_seq: u64,
}

/// One list screen: fetched items, a filter, and the trigger that re-fetches them.
///
/// Every fetch is numbered. A response is applied only if the screen is still mounted
/// and nothing newer has been applied, so results land in request order.
pub struct ListScreen<R: Resource> {
    client: ApiClient,
    ctx: RenderContext,
    filter: Mutex<R::Filter>,
    state: Mutex<ListState<R::Record>>,
    trigger: RefreshTrigger,
    issued_seq: AtomicU64,
    cancel: CancellationToken,
    changes: watch::Sender<u64>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<R: Resource> ListScreen<R> {
    pub fn new(state: &SharedState, filter: R::Filter) -> Arc<Self> {
        let ctx = RenderContext {
            timezone: state.config.timezone.clone(),
        };
        Self::with_client(state.client.clone(), ctx, filter)
    }

    pub fn with_client(client: ApiClient, ctx: RenderContext, filter: R::Filter) -> Arc<Self> {
        let (changes, _) = watch::channel(0);
        Arc::new(Self {
            client,
            ctx,
            filter: Mutex::new(filter),
            state: Mutex::new(ListState {
                items: Vec::new(),
                loading: true,
                error: None,
                applied_seq: 0,
            }),
            trigger: RefreshTrigger::new(),
            issued_seq: AtomicU64::new(0),
            cancel: CancellationToken::new(),
            changes,
        })
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    /// Ticks once per applied fetch.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn filter(&self) -> R::Filter {
        lock(&self.filter).clone()
    }

    /// Replaces the filter; a changed filter re-triggers the fetch.
    pub fn set_filter(&self, filter: R::Filter) {
        let changed = {
            let mut current = lock(&self.filter);
            if *current == filter {
                false
            } else {
                *current = filter;
                true
            }
        };
        if changed {
            self.trigger.bump();
        }
    }

    pub fn update_filter<F: FnOnce(&mut R::Filter)>(&self, edit: F) {
        let mut next = self.filter();
        edit(&mut next);
        self.set_filter(next);
    }

    pub fn items(&self) -> Vec<R::Record> {
        lock(&self.state).items.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Fetch now, showing the loading state while the request is out.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.fetch(true).await
    }

    /// Fetch without flipping to the loading state; used by polling.
    pub async fn refresh_quietly(&self) -> Result<(), ApiError> {
        self.fetch(false).await
    }

    async fn fetch(&self, show_loading: bool) -> Result<(), ApiError> {
        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter();
        if show_loading {
            lock(&self.state).loading = true;
        }

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(resource = R::NAME, seq, "fetch abandoned on unmount");
                return Ok(());
            }
            result = self.client.get::<R>(&filter) => result,
        };

        let mut state = lock(&self.state);
        if self.cancel.is_cancelled() || seq < state.applied_seq {
            tracing::debug!(resource = R::NAME, seq, applied = state.applied_seq, "stale response dropped");
            return Ok(());
        }
        state.applied_seq = seq;
        state.loading = seq < self.issued_seq.load(Ordering::SeqCst) && state.loading;

        let outcome = match result {
            Ok(items) => {
                tracing::debug!(resource = R::NAME, count = items.len(), "list refreshed");
                state.items = items;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(format!("Could not load {}s. Pull to refresh.", R::NAME));
                Err(e)
            }
        };
        drop(state);

        self.changes.send_modify(|n| *n += 1);
        outcome
    }

    /// Starts the screen's effect: fetch now, then again on every trigger bump, until unmount.
    pub fn mount(self: &Arc<Self>) -> JoinHandle<()> {
        let screen = Arc::clone(self);
        let mut rx = screen.trigger.subscribe();
        tokio::spawn(async move {
            loop {
                rx.borrow_and_update();
                // Errors are already logged and stored for the view.
                let _ = screen.refresh().await;

                tokio::select! {
                    _ = screen.cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(resource = R::NAME, "screen effect stopped");
        })
    }

    /// Re-fetches on a fixed interval until unmount, independent of the trigger.
    ///
    /// The first poll lands one period in; `mount` owns the initial fetch.
    pub fn poll(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let screen = Arc::clone(self);
        spawn_polling(R::NAME, every, FirstTick::AfterPeriod, self.cancel.child_token(), move || {
            let screen = Arc::clone(&screen);
            async move {
                let _ = screen.refresh_quietly().await;
            }
        })
    }

    /// Cancels in-flight fetches and stops the effect and any polling.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }
}

impl<R> ListScreen<R>
where
    R: Resource,
    R::Record: ListItemTemplate,
{
    pub fn view(&self) -> ListView {
        let state = lock(&self.state);
        if state.loading {
            return ListView::Loading;
        }
        if let Some(error) = &state.error {
            return ListView::Error(error.clone());
        }
        if state.items.is_empty() {
            return ListView::Empty(<R::Record as ListItemTemplate>::EMPTY_TEXT);
        }
        ListView::Items(state.items.iter().map(|item| item.list_item(&self.ctx)).collect())
    }
}
