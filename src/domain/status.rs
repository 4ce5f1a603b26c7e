use serde::{Deserialize, Serialize};
use std::fmt;

/// Status shared by shift-cover and time-off requests.
///
/// Transitions only move forward: Pending → (Awaiting Approval →) Accepted | Denied.
/// Time-off requests never pass through Awaiting Approval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    #[serde(rename = "Awaiting Approval")]
    AwaitingApproval,
    Accepted,
    Denied,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::AwaitingApproval => "Awaiting Approval",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Denied => "Denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Accepted | RequestStatus::Denied)
    }

    /// Anything past Pending can no longer be claimed or withdrawn.
    pub fn is_locked(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, AwaitingApproval)
                | (Pending, Accepted)
                | (Pending, Denied)
                | (AwaitingApproval, Accepted)
                | (AwaitingApproval, Denied)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "awaiting approval" | "awaiting_approval" => Ok(RequestStatus::AwaitingApproval),
            "accepted" => Ok(RequestStatus::Accepted),
            "denied" => Ok(RequestStatus::Denied),
            _ => Err(()),
        }
    }
}
