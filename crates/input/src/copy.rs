//! Synthetic copy command targeted at the foreground process.

use crate::error::InputError;
use kami_context::ActiveAppProviderRef;
use std::sync::Arc;

/// Issues the platform copy shortcut to the focused application.
pub trait InputSynthesizer: Send + Sync {
    /// Post the copy shortcut to the foreground process.
    ///
    /// Returns the pid the event was delivered to. An error means nothing
    /// was posted (no target, or the event could not be built).
    fn send_copy_command(&self) -> Result<i32, InputError>;
}

/// Type alias for a shared input synthesizer.
pub type InputSynthesizerRef = Arc<dyn InputSynthesizer>;

/// Copy command that resolves the foreground pid through an
/// [`ActiveAppProvider`](kami_context::ActiveAppProvider) and posts Cmd+C to
/// that pid only.
pub struct ForegroundCopyCommand {
    apps: ActiveAppProviderRef,
}

impl ForegroundCopyCommand {
    pub fn new(apps: ActiveAppProviderRef) -> Self {
        Self { apps }
    }

    fn target_pid(&self) -> Result<i32, InputError> {
        let app = self
            .apps
            .get_active_app()
            .ok_or(InputError::NoForegroundProcess)?;

        app.pid.ok_or(InputError::MissingPid {
            bundle_id: app.bundle_id,
        })
    }
}

impl InputSynthesizer for ForegroundCopyCommand {
    fn send_copy_command(&self) -> Result<i32, InputError> {
        if !crate::has_accessibility_access() {
            return Err(InputError::AccessibilityNotGranted);
        }

        let pid = self.target_pid()?;
        post_copy(pid)?;
        Ok(pid)
    }
}

impl std::fmt::Debug for ForegroundCopyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForegroundCopyCommand").finish_non_exhaustive()
    }
}

#[cfg(target_os = "macos")]
fn post_copy(pid: i32) -> Result<(), InputError> {
    crate::macos::post_copy_to_pid(pid)
}

#[cfg(not(target_os = "macos"))]
fn post_copy(pid: i32) -> Result<(), InputError> {
    tracing::warn!(pid, "scoped copy command is not available on this platform");
    Err(InputError::Unsupported)
}
