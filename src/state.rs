use crate::api::ApiClient;
use crate::config::Config;
use crate::confirm::{Confirm, Notifier};
use crate::session::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub session: SessionStore,
    pub confirm: Arc<dyn Confirm>,
    pub notifier: Arc<dyn Notifier>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn shared(
        config: Config,
        client: ApiClient,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            client,
            session: SessionStore::new(),
            confirm,
            notifier,
        })
    }
}
