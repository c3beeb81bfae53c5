//! Shortcut entry point.

use crate::coordinator::CaptureCoordinator;
use crate::error::CaptureOutcome;
use kami_context::{ActiveAppProvider, ActiveAppProviderRef};
use std::sync::Arc;

/// What happened when the capture shortcut was pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResult {
    /// The frontmost app is not the configured target; nothing was touched.
    Ignored { frontmost: Option<String> },
    Completed(CaptureOutcome),
}

/// Forwards the global shortcut to the coordinator while the target app is
/// frontmost.
pub struct CaptureTrigger {
    coordinator: Arc<CaptureCoordinator>,
    apps: ActiveAppProviderRef,
}

impl CaptureTrigger {
    pub fn new(coordinator: Arc<CaptureCoordinator>, apps: ActiveAppProviderRef) -> Self {
        Self { coordinator, apps }
    }

    pub fn coordinator(&self) -> &Arc<CaptureCoordinator> {
        &self.coordinator
    }

    pub async fn on_shortcut(&self) -> TriggerResult {
        if let Some(target) = self.coordinator.config().target_bundle_id.as_deref() {
            let frontmost = self.apps.get_active_app();
            if !frontmost.as_ref().is_some_and(|app| app.is(target)) {
                let frontmost = frontmost.map(|app| app.bundle_id);
                tracing::debug!(?frontmost, target, "Shortcut ignored outside target app");
                return TriggerResult::Ignored { frontmost };
            }
        }

        TriggerResult::Completed(self.coordinator.capture().await)
    }
}
