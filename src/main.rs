use anyhow::Context;
use staffdesk::acknowledgement::AcknowledgementTracker;
use staffdesk::api::query::{AnnouncementFilter, DateSort};
use staffdesk::api::resources::Announcements;
use staffdesk::api::ApiClient;
use staffdesk::config::Config;
use staffdesk::confirm::{LogNotifier, TerminalConfirm};
use staffdesk::screens::{ListScreen, ListView};
use staffdesk::state::AppState;
use staffdesk::stats::QuickStatsPanel;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, tz = %config.timezone, "Starting staffdesk");

    let client = ApiClient::new(&config)?;
    let poll_every = config.poll_interval;
    let state = AppState::shared(config, client, Arc::new(TerminalConfirm), Arc::new(LogNotifier));

    let employee_id: i64 = std::env::var("STAFFDESK_EMPLOYEE_ID")
        .context("STAFFDESK_EMPLOYEE_ID missing")?
        .trim()
        .parse()
        .context("STAFFDESK_EMPLOYEE_ID must be a number")?;
    let employee = state.session.login_by_id(&state.client, employee_id).await?;
    tracing::info!(employee_id, name = %employee.name, admin = employee.admin, "Logged in");

    let tracker = AcknowledgementTracker::new(state.client.clone(), state.notifier.clone(), employee_id);
    if let Err(e) = tracker.load().await {
        tracing::warn!("Failed to load acknowledgements: {}", e);
    }

    let announcements = ListScreen::<Announcements>::new(
        &state,
        AnnouncementFilter {
            date_sort: Some(DateSort::Newest),
            ..Default::default()
        },
    );
    let stats = QuickStatsPanel::new(&state);

    let mut tasks = vec![
        announcements.mount(),
        announcements.poll(poll_every),
        stats.poll(poll_every),
    ];

    let announcement_log = {
        let screen = announcements.clone();
        let tracker = tracker.clone();
        let mut changes = screen.changes();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                match screen.view() {
                    ListView::Items(items) => {
                        let unread = screen
                            .items()
                            .iter()
                            .filter(|a| a.author_id != tracker.employee_id())
                            .filter(|a| !tracker.is_acknowledged(a.announcement_id))
                            .count();
                        tracing::info!("{} announcements, {} unacknowledged", items.len(), unread);
                        for item in items {
                            tracing::info!("  {} ({})", item.title, item.subtitle);
                        }
                    }
                    ListView::Empty(text) => tracing::info!("{}", text),
                    ListView::Error(message) => tracing::warn!("{}", message),
                    ListView::Loading => {}
                }
            }
        })
    };

    let stats_log = {
        let panel = stats.clone();
        let mut changes = panel.changes();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                if let Some(latest) = panel.latest() {
                    tracing::info!(
                        open_cover = latest.open_cover_requests,
                        awaiting_approval = latest.awaiting_cover_approval,
                        pending_time_off = latest.pending_time_off,
                        tasks_due_today = latest.incomplete_tasks,
                        "Quick stats"
                    );
                }
            }
        })
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    announcements.unmount();
    stats.unmount();
    for task in tasks.drain(..) {
        if let Err(e) = task.await {
            tracing::error!("Background task failed: {}", e);
        }
    }
    announcement_log.abort();
    stats_log.abort();

    Ok(())
}
