//! Verbatim clipboard snapshot.

use crate::{Pasteboard, PasteboardError};

/// One representation of a clipboard item: a type identifier and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteboardRepresentation {
    /// Uniform type identifier (e.g. "public.utf8-plain-text").
    pub type_id: String,
    pub bytes: Vec<u8>,
}

impl PasteboardRepresentation {
    pub fn new(type_id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            type_id: type_id.into(),
            bytes: bytes.into(),
        }
    }
}

/// One logical clipboard entry, available in one or more representations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteboardItem {
    pub representations: Vec<PasteboardRepresentation>,
}

impl PasteboardItem {
    pub fn new(representations: Vec<PasteboardRepresentation>) -> Self {
        Self { representations }
    }

    /// Single-representation item.
    pub fn single(type_id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![PasteboardRepresentation::new(type_id, bytes)])
    }

    /// An item with no representations, e.g. one whose promised data was
    /// never delivered.
    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }

    /// Bytes for `type_id`, if this item carries it.
    pub fn data_for_type(&self, type_id: &str) -> Option<&[u8]> {
        self.representations
            .iter()
            .find(|rep| rep.type_id == type_id)
            .map(|rep| rep.bytes.as_slice())
    }
}

/// Everything that was on the clipboard at capture time.
///
/// Captured once at the start of an attempt and consumed by [`restore`],
/// so a snapshot can never be restored twice.
///
/// [`restore`]: PasteboardSnapshot::restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteboardSnapshot {
    items: Vec<PasteboardItem>,
}

impl PasteboardSnapshot {
    /// Copy every item and representation currently on the clipboard.
    pub fn capture(pasteboard: &dyn Pasteboard) -> Result<Self, PasteboardError> {
        let items = pasteboard.read_items()?;
        let snapshot = Self { items };

        tracing::debug!(
            items = snapshot.items.len(),
            representations = snapshot.representation_count(),
            bytes = snapshot.total_size_bytes(),
            "Captured clipboard snapshot"
        );

        Ok(snapshot)
    }

    /// Clear the clipboard and write every captured item back.
    ///
    /// This overwrites whatever is on the clipboard now, including data other
    /// processes wrote since the capture. Items without representations are
    /// skipped: there is nothing to put back, and the system clipboard may
    /// reject the whole write because of them.
    pub fn restore(self, pasteboard: &dyn Pasteboard) -> Result<(), PasteboardError> {
        pasteboard.clear()?;

        let items: Vec<PasteboardItem> = self
            .items
            .into_iter()
            .filter(|item| !item.is_empty())
            .collect();
        if !items.is_empty() {
            pasteboard.write_items(&items)?;
        }

        tracing::debug!(items = items.len(), "Restored clipboard snapshot");
        Ok(())
    }

    pub fn items(&self) -> &[PasteboardItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn representation_count(&self) -> usize {
        self.items.iter().map(|item| item.representations.len()).sum()
    }

    pub fn total_size_bytes(&self) -> usize {
        self.items
            .iter()
            .flat_map(|item| item.representations.iter())
            .map(|rep| rep.bytes.len())
            .sum()
    }
}

impl From<Vec<PasteboardItem>> for PasteboardSnapshot {
    fn from(items: Vec<PasteboardItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryPasteboard;

    fn rich_text_item() -> PasteboardItem {
        PasteboardItem::new(vec![
            PasteboardRepresentation::new("public.utf8-plain-text", b"hello".to_vec()),
            PasteboardRepresentation::new("public.rtf", b"{\\rtf1 hello}".to_vec()),
        ])
    }

    #[test]
    fn test_capture_does_not_modify_clipboard() {
        let pasteboard = MemoryPasteboard::with_items(vec![rich_text_item()]);

        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();

        assert_eq!(snapshot.items(), &[rich_text_item()]);
        assert_eq!(pasteboard.items(), vec![rich_text_item()]);
    }

    #[test]
    fn test_restore_overwrites_current_contents() {
        let original = vec![
            rich_text_item(),
            PasteboardItem::single("public.png", vec![0x89, b'P', b'N', b'G']),
        ];
        let pasteboard = MemoryPasteboard::with_items(original.clone());
        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();

        pasteboard.clear().unwrap();
        pasteboard
            .write_items(&[PasteboardItem::single("public.utf8-plain-text", b"intruder".to_vec())])
            .unwrap();

        snapshot.restore(&pasteboard).unwrap();
        assert_eq!(pasteboard.items(), original);
    }

    #[test]
    fn test_restore_empty_snapshot_leaves_clipboard_empty() {
        let pasteboard = MemoryPasteboard::new();
        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();
        assert!(snapshot.is_empty());

        pasteboard
            .write_items(&[PasteboardItem::single("public.utf8-plain-text", b"x".to_vec())])
            .unwrap();
        snapshot.restore(&pasteboard).unwrap();

        assert!(pasteboard.items().is_empty());
    }

    #[test]
    fn test_restore_skips_items_without_data() {
        let png = PasteboardItem::single("public.png", vec![1, 2, 3]);
        let snapshot = PasteboardSnapshot::from(vec![
            rich_text_item(),
            PasteboardItem::default(),
            png.clone(),
        ]);
        let pasteboard = MemoryPasteboard::new();

        snapshot.restore(&pasteboard).unwrap();
        assert_eq!(pasteboard.items(), vec![rich_text_item(), png]);
    }

    #[test]
    fn test_restore_only_empty_items_just_clears() {
        let pasteboard = MemoryPasteboard::with_items(vec![PasteboardItem::single(
            "public.utf8-plain-text",
            b"x".to_vec(),
        )]);
        let snapshot = PasteboardSnapshot::from(vec![PasteboardItem::default()]);

        snapshot.restore(&pasteboard).unwrap();
        assert!(pasteboard.items().is_empty());
        // clear only, no write
        assert_eq!(pasteboard.change_count(), 1);
    }

    #[test]
    fn test_restore_reports_write_failure() {
        let pasteboard = MemoryPasteboard::with_items(vec![rich_text_item()]);
        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();
        pasteboard.set_fail_writes(true);

        let err = snapshot.restore(&pasteboard).unwrap_err();
        assert!(matches!(err, PasteboardError::Write(_)));
    }

    #[test]
    fn test_counts() {
        let snapshot = PasteboardSnapshot::from(vec![
            rich_text_item(),
            PasteboardItem::single("public.png", vec![1, 2, 3]),
        ]);
        assert_eq!(snapshot.representation_count(), 3);
        assert_eq!(snapshot.total_size_bytes(), 5 + 13 + 3);
    }
}
