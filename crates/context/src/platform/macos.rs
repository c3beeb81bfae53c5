//! macOS implementation of the active app provider.

use crate::provider::ActiveAppProvider;
use crate::state::AppInfo;

// Native Cocoa imports for efficient frontmost app detection
use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

/// macOS implementation using native Cocoa APIs for active window detection.
///
/// Uses NSWorkspace.frontmostApplication, no subprocess overhead.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOSProvider;

impl MacOSProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ActiveAppProvider for MacOSProvider {
    fn get_active_app(&self) -> Option<AppInfo> {
        let app = get_frontmost_app();
        if app.is_none() {
            tracing::debug!("no frontmost application reported by NSWorkspace");
        }
        app
    }
}

/// Get the frontmost application using native Cocoa APIs.
///
/// Returns bundle ID, name and pid of the currently focused app.
fn get_frontmost_app() -> Option<AppInfo> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;

        // [NSWorkspace sharedWorkspace]
        let shared_workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if shared_workspace.is_null() {
            return None;
        }

        // [workspace frontmostApplication]
        let frontmost_app: *mut Object = msg_send![shared_workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        let bundle_id_ns: *mut Object = msg_send![frontmost_app, bundleIdentifier];
        let bundle_id = nsstring_to_string(bundle_id_ns)?;

        if bundle_id.is_empty() {
            return None;
        }

        let name_ns: *mut Object = msg_send![frontmost_app, localizedName];
        let name = nsstring_to_string(name_ns);

        // -1 means the application has no associated process.
        let pid: i32 = msg_send![frontmost_app, processIdentifier];
        let pid = (pid > 0).then_some(pid);

        Some(AppInfo {
            bundle_id,
            name,
            pid,
        })
    }
}

/// Convert NSString to Rust String.
unsafe fn nsstring_to_string(nsstring: *mut Object) -> Option<String> {
    if nsstring.is_null() {
        return None;
    }

    let c_str: *const std::os::raw::c_char = msg_send![nsstring, UTF8String];
    if c_str.is_null() {
        return None;
    }

    let rust_str = std::ffi::CStr::from_ptr(c_str).to_str().ok()?;
    Some(rust_str.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_frontmost_app() {
        // Smoke test: the result depends on whatever is focused during the run.
        let app = get_frontmost_app();
        println!("Frontmost app: {:?}", app);
        if let Some(app) = app {
            assert!(!app.bundle_id.is_empty());
        }
    }
}
