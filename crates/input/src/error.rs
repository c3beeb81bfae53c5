//! Error types for input emulation.

use thiserror::Error;

/// Errors that can occur while synthesizing the copy command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Accessibility permission not granted (macOS).
    #[error("accessibility permission not granted - open System Settings > Privacy & Security > Accessibility")]
    AccessibilityNotGranted,

    /// No focused process to deliver the event to.
    #[error("no foreground process to target")]
    NoForegroundProcess,

    /// The focused application reported no usable process id.
    #[error("foreground application {bundle_id} has no process id")]
    MissingPid { bundle_id: String },

    /// Failed to construct the keyboard event.
    #[error("failed to create keyboard event: {0}")]
    EventCreation(String),

    /// Scoped input delivery is not available on this platform.
    #[error("scoped input events are not supported on this platform")]
    Unsupported,
}
