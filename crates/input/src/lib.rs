//! Input emulation for Kami.
//!
//! Provides the synthetic copy command used by the capture protocol and the
//! accessibility permission check that guards it.
//!
//! # Scoping
//!
//! The copy command is delivered to the foreground process only. It is never
//! posted to the global event stream, so unrelated applications never see it.
//!
//! # Example
//!
//! ```ignore
//! use kami_context::platform::PlatformProvider;
//! use kami_input::{ForegroundCopyCommand, InputSynthesizer};
//! use std::sync::Arc;
//!
//! let copy = ForegroundCopyCommand::new(Arc::new(PlatformProvider::new()));
//! let pid = copy.send_copy_command()?;
//! ```

mod copy;
mod error;

#[cfg(target_os = "macos")]
mod macos;

use std::sync::Arc;

pub use copy::{ForegroundCopyCommand, InputSynthesizer, InputSynthesizerRef};
pub use error::InputError;

/// Permission collaborator for the capture protocol.
///
/// Kept as a trait so the coordinator can be exercised without touching the
/// system TCC database.
pub trait PermissionProvider: Send + Sync {
    /// Whether the process may post input events to other applications.
    fn has_capture_permission(&self) -> bool;

    /// Ask the user to grant the permission. Does not wait for an answer.
    fn request_capture_permission(&self);
}

/// Type alias for the permission provider.
pub type PermissionProviderRef = Arc<dyn PermissionProvider>;

/// Accessibility-backed permission provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessibilityPermission;

impl PermissionProvider for AccessibilityPermission {
    fn has_capture_permission(&self) -> bool {
        has_accessibility_access()
    }

    fn request_capture_permission(&self) {
        prompt_accessibility_access();
    }
}

/// Check if the application has accessibility permissions.
///
/// On macOS, posting keyboard events to another process requires
/// Accessibility permission. On other platforms, always returns `true`.
pub fn has_accessibility_access() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::has_accessibility_access()
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}

/// Prompt the user to grant accessibility permissions.
///
/// On macOS this shows the system prompt, which links to the Accessibility
/// pane of System Settings. On other platforms, this is a no-op.
pub fn prompt_accessibility_access() {
    #[cfg(target_os = "macos")]
    {
        macos::prompt_accessibility_access();
    }
}
