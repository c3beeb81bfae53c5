//! Foreground application description.

use serde::{Deserialize, Serialize};

/// Information about the currently focused application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Bundle ID (e.g., "com.facebook.Origami-Studio")
    pub bundle_id: String,

    /// Display name (e.g., "Origami Studio")
    pub name: Option<String>,

    /// Process identifier, when the platform reports one.
    pub pid: Option<i32>,
}

impl AppInfo {
    /// Whether this app matches the given bundle id.
    pub fn is(&self, bundle_id: &str) -> bool {
        self.bundle_id == bundle_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_info_serializes_with_pid() {
        let app = AppInfo {
            bundle_id: "com.apple.Terminal".to_string(),
            name: None,
            pid: Some(17),
        };
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["bundle_id"], "com.apple.Terminal");
        assert_eq!(json["pid"], 17);
        assert!(json["name"].is_null());
    }

    #[test]
    fn test_matches_bundle_id() {
        let app = AppInfo {
            bundle_id: "com.facebook.Origami-Studio".to_string(),
            name: None,
            pid: None,
        };
        assert!(app.is("com.facebook.Origami-Studio"));
        assert!(!app.is("com.apple.Safari"));
    }
}
