//! Clipboard-mediated capture of Origami JavaScript patches.
//!
//! Origami Studio exposes no API for "which script is selected". What it does
//! do is put a property list describing the selection on the clipboard when
//! the user copies. A capture attempt borrows the clipboard to read it:
//!
//! ```text
//! snapshot ─► clear ─► Cmd+C to foreground ─► poll ─► decode ─► resolve
//!    │                                                             │
//!    └──────────────────────── restore ◄───────────────────────────┘
//! ```
//!
//! The user's clipboard is put back on every path once it has been
//! snapshotted, including cancellation and the future being dropped.
//!
//! # Example
//!
//! ```ignore
//! use kami_capture::{CaptureConfig, CaptureCoordinator};
//! use kami_context::platform::PlatformProvider;
//! use kami_input::{AccessibilityPermission, ForegroundCopyCommand};
//! use kami_pasteboard::platform::PlatformPasteboard;
//! use std::sync::Arc;
//!
//! let coordinator = CaptureCoordinator::new(
//!     CaptureConfig::default(),
//!     Arc::new(PlatformPasteboard::new()),
//!     Arc::new(ForegroundCopyCommand::new(Arc::new(PlatformProvider::new()))),
//!     Arc::new(AccessibilityPermission),
//! )?;
//! let script = coordinator.capture().await?;
//! println!("{}", script.to_uri());
//! ```

mod config;
mod coordinator;
mod error;
mod guard;
mod script;
mod state;
mod trigger;

pub use config::{
    default_config_path, CaptureConfig, ConfigError, DEFAULT_DEADLINE_MS,
    DEFAULT_POLL_INTERVAL_MS, ORIGAMI_BUNDLE_ID, ORIGAMI_PAYLOAD_TYPE,
};
pub use coordinator::CaptureCoordinator;
pub use error::{CaptureError, CaptureOutcome};
pub use script::{load_script, LoadError};
pub use state::CaptureState;
pub use trigger::{CaptureTrigger, TriggerResult};

pub use kami_patch::{PatchQuery, ResolvedPath};
