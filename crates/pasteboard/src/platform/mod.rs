//! Platform-specific clipboard backends.

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacOSPasteboard;

#[cfg(target_os = "macos")]
pub type PlatformPasteboard = MacOSPasteboard;

#[cfg(not(target_os = "macos"))]
pub type PlatformPasteboard = UnsupportedPasteboard;

/// Backend for platforms without a multi-representation clipboard binding.
///
/// Every call fails with [`PasteboardError::Unavailable`], so a capture
/// attempt aborts before it ever clears the user's clipboard.
///
/// [`PasteboardError::Unavailable`]: crate::PasteboardError::Unavailable
#[cfg(not(target_os = "macos"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPasteboard;

#[cfg(not(target_os = "macos"))]
impl UnsupportedPasteboard {
    pub fn new() -> Self {
        Self
    }

    fn unavailable() -> crate::PasteboardError {
        crate::PasteboardError::Unavailable(format!(
            "no clipboard backend for {}",
            std::env::consts::OS
        ))
    }
}

#[cfg(not(target_os = "macos"))]
impl crate::Pasteboard for UnsupportedPasteboard {
    fn read_items(&self) -> Result<Vec<crate::PasteboardItem>, crate::PasteboardError> {
        Err(Self::unavailable())
    }

    fn write_items(&self, _items: &[crate::PasteboardItem]) -> Result<(), crate::PasteboardError> {
        Err(Self::unavailable())
    }

    fn clear(&self) -> Result<(), crate::PasteboardError> {
        Err(Self::unavailable())
    }

    fn data_for_type(&self, _type_id: &str) -> Result<Option<Vec<u8>>, crate::PasteboardError> {
        Err(Self::unavailable())
    }
}
