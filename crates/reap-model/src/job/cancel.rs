use serde::{Deserialize, Serialize};

/// Completion status of a control-plane call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallStatus {
    /// The call completed with a success status.
    Success,
    /// The call completed with a failure status.
    Failure,
}

/// Response of a single cancel request.
///
/// A success status alone is not enough: the control plane reports success for
/// jobs that are already terminal, so the output must also confirm the cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    /// Call status.
    pub status: CallStatus,
    /// Whether the output explicitly confirmed the cancellation.
    pub confirmed: bool,
}

impl CancelResponse {
    /// A successful call that confirmed the cancellation.
    pub const fn confirmed() -> Self {
        Self {
            status: CallStatus::Success,
            confirmed: true,
        }
    }

    /// A successful call without confirmation.
    pub const fn unconfirmed() -> Self {
        Self {
            status: CallStatus::Success,
            confirmed: false,
        }
    }

    /// A failed call.
    pub const fn failed() -> Self {
        Self {
            status: CallStatus::Failure,
            confirmed: false,
        }
    }

    /// `true` only for a success status with explicit confirmation.
    #[inline]
    pub fn is_confirmed_success(&self) -> bool {
        self.status == CallStatus::Success && self.confirmed
    }
}
