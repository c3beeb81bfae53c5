//! Capture attempt states.

use serde::Serialize;

/// Where the coordinator is in the capture protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    /// No attempt in flight.
    #[default]
    Idle,
    /// Copying the user's clipboard aside and clearing it.
    Snapshotting,
    /// Sending the copy shortcut to the foreground app.
    AwaitingForegroundCommand,
    /// Waiting for the payload to show up on the clipboard.
    Polling,
    Decoding,
    Resolving,
    /// Putting the user's clipboard back.
    Restoring,
    Succeeded,
    Failed,
}

impl CaptureState {
    pub fn label(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Snapshotting => "snapshotting",
            CaptureState::AwaitingForegroundCommand => "awaiting_foreground_command",
            CaptureState::Polling => "polling",
            CaptureState::Decoding => "decoding",
            CaptureState::Resolving => "resolving",
            CaptureState::Restoring => "restoring",
            CaptureState::Succeeded => "succeeded",
            CaptureState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
