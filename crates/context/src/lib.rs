//! Foreground application lookup for Kami.
//!
//! The capture protocol needs to know which process currently owns keyboard
//! focus: the synthetic copy command is delivered to that process only, and
//! the shortcut is ignored unless the host application is in front.
//!
//! ```text
//! provider.rs        - ActiveAppProvider trait + NullProvider
//! state.rs           - AppInfo
//! platform/macos.rs  - NSWorkspace-backed provider
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kami_context::{platform::PlatformProvider, ActiveAppProvider};
//!
//! let provider = PlatformProvider::new();
//! if let Some(app) = provider.get_active_app() {
//!     println!("{} (pid {:?})", app.bundle_id, app.pid);
//! }
//! ```

mod provider;
mod state;

pub mod platform;

pub use provider::{ActiveAppProvider, ActiveAppProviderRef, NullProvider, StaticProvider};
pub use state::AppInfo;
