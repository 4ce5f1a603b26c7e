use crate::lifecycle::OnSubmitted;
use std::sync::Arc;
use tokio::sync::watch;

/// Counter a screen watches; every bump means "fetch again".
///
/// Pull-to-refresh, filter changes and modal callbacks all go through here.
#[derive(Clone)]
pub struct RefreshTrigger {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshTrigger {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|n| *n += 1);
    }

    pub fn value(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Callback for a modal's `on_submitted`.
    pub fn callback(&self) -> OnSubmitted {
        let trigger = self.clone();
        Arc::new(move || trigger.bump())
    }
}
