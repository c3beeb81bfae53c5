//! Clipboard access for Kami.
//!
//! The capture protocol borrows the system clipboard for the duration of one
//! attempt. This crate provides:
//! - [`PasteboardSnapshot`]: every item and every (type, bytes) representation
//!   on the clipboard, captured verbatim and restorable later
//! - [`Pasteboard`]: the port the snapshot and the capture loop talk to
//! - [`MemoryPasteboard`]: an in-process implementation
//! - [`platform::PlatformPasteboard`]: the system clipboard
//!
//! Restoring is a best-effort overwrite. Nothing checks whether another
//! process wrote to the clipboard in between.

mod error;
mod memory;
mod snapshot;

pub mod platform;

use std::sync::Arc;

pub use error::PasteboardError;
pub use memory::MemoryPasteboard;
pub use snapshot::{PasteboardItem, PasteboardRepresentation, PasteboardSnapshot};

/// Port to a multi-item, multi-representation clipboard.
pub trait Pasteboard: Send + Sync {
    /// Read every item with every representation the system reports.
    /// Must not modify the clipboard.
    fn read_items(&self) -> Result<Vec<PasteboardItem>, PasteboardError>;

    /// Append items to the clipboard, keeping each item's representations
    /// grouped together. Callers clear first when replacing contents.
    fn write_items(&self, items: &[PasteboardItem]) -> Result<(), PasteboardError>;

    /// Remove everything from the clipboard.
    fn clear(&self) -> Result<(), PasteboardError>;

    /// Bytes of the first item carrying `type_id`, if any.
    fn data_for_type(&self, type_id: &str) -> Result<Option<Vec<u8>>, PasteboardError>;
}

/// Shared handle to a pasteboard.
pub type PasteboardRef = Arc<dyn Pasteboard>;
