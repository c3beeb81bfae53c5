//! Provider trait for foreground application detection.
//!
//! Abstracts the platform lookup so the capture logic stays testable.

use crate::state::AppInfo;
use std::sync::Arc;

/// Provider for detecting the currently focused application.
pub trait ActiveAppProvider: Send + Sync {
    /// Get the currently focused application.
    fn get_active_app(&self) -> Option<AppInfo>;
}

/// Shared handle to an active app provider.
pub type ActiveAppProviderRef = Arc<dyn ActiveAppProvider>;

/// Null implementation for unsupported platforms. Never reports a focused app.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl NullProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ActiveAppProvider for NullProvider {
    fn get_active_app(&self) -> Option<AppInfo> {
        None
    }
}

/// Provider that always reports the same application.
///
/// Useful in tests and for driving the capture pipeline from a script where
/// the target process is already known.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    app: Option<AppInfo>,
}

impl StaticProvider {
    pub fn new(app: Option<AppInfo>) -> Self {
        Self { app }
    }
}

impl ActiveAppProvider for StaticProvider {
    fn get_active_app(&self) -> Option<AppInfo> {
        self.app.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_provider_reports_nothing() {
        assert!(NullProvider::new().get_active_app().is_none());
    }

    #[test]
    fn test_static_provider_reports_fixed_app() {
        let app = AppInfo {
            bundle_id: "com.facebook.Origami-Studio".to_string(),
            name: Some("Origami Studio".to_string()),
            pid: Some(4242),
        };
        let provider: ActiveAppProviderRef = Arc::new(StaticProvider::new(Some(app.clone())));

        assert_eq!(provider.get_active_app(), Some(app));
    }
}
