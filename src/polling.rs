use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// When the first tick of a poller fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    Immediate,
    /// One full period in; for pollers whose owner already fetched on mount.
    AfterPeriod,
}

/// Runs `tick` on a fixed period until `cancel` fires.
///
/// A tick that overruns the period delays the next one instead of bunching calls up.
pub fn spawn_polling<F, Fut>(
    name: &'static str,
    every: Duration,
    first: FirstTick,
    cancel: CancellationToken,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let start = match first {
            FirstTick::Immediate => Instant::now(),
            FirstTick::AfterPeriod => Instant::now() + every,
        };
        let mut interval = tokio::time::interval_at(start, every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(poller = name, every_secs = every.as_secs(), "polling started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tick() => {}
            }
        }

        tracing::info!(poller = name, "polling stopped");
    })
}
