//! Yes/no prompts and user-facing alerts.

use async_trait::async_trait;
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Gate in front of every destructive or state-changing action. `false` means do nothing.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

pub trait Notifier: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// Always gives the same answer. Used for non-interactive runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, title: &str, _message: &str) -> bool {
        tracing::debug!(title, answer = self.0, "auto-answered confirmation");
        self.0
    }
}

/// Prompts on stdin/stdout; anything other than y/yes counts as no.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        let prompt = format!("{title}\n{message} [y/N] ");
        let answer = tokio::task::spawn_blocking(move || {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(prompt.as_bytes());
            let _ = stdout.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => parse_answer(&line),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Confirmation prompt panicked: {}", e);
                false
            }
        }
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Alerts go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, title: &str, message: &str) {
        tracing::info!(title, "{}", message);
    }
}

/// Keeps every alert; handy when a front end drains them itself.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<(String, String)>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<(String, String)> {
        match self.alerts.lock() {
            Ok(mut alerts) => std::mem::take(&mut *alerts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        match self.alerts.lock() {
            Ok(alerts) => alerts.iter().map(|(t, _)| t.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(t, _)| t.clone()).collect(),
        }
    }
}

impl Notifier for AlertLog {
    fn alert(&self, title: &str, message: &str) {
        let entry = (title.to_string(), message.to_string());
        match self.alerts.lock() {
            Ok(mut alerts) => alerts.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("n"));
        assert!(!parse_answer(""));
    }

    #[tokio::test]
    async fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("Delete", "Delete this request?").await);
        assert!(!FixedAnswer(false).confirm("Delete", "Delete this request?").await);
    }

    #[test]
    fn test_alert_log_drains() {
        let log = AlertLog::new();
        log.alert("Success", "Request deleted");
        log.alert("Error", "Something went wrong");
        assert_eq!(log.titles(), vec!["Success".to_string(), "Error".to_string()]);
        assert_eq!(log.drain().len(), 2);
        assert!(log.drain().is_empty());
    }
}
