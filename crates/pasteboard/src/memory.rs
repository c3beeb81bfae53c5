//! In-process clipboard.

use crate::{Pasteboard, PasteboardError, PasteboardItem};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Clipboard held in memory.
///
/// Behaves like the system clipboard (ordered items, grouped
/// representations, writes append after a clear) and can be told to refuse
/// writes, which makes it the backend of choice for exercising the capture
/// protocol without touching the user's real clipboard.
#[derive(Debug, Default)]
pub struct MemoryPasteboard {
    items: Mutex<Vec<PasteboardItem>>,
    change_count: AtomicU64,
    fail_writes: AtomicBool,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<PasteboardItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Copy of the current contents.
    pub fn items(&self) -> Vec<PasteboardItem> {
        self.lock().clone()
    }

    /// Replace the contents, as another application copying would.
    pub fn set_items(&self, items: Vec<PasteboardItem>) {
        *self.lock() = items;
        self.change_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of mutations (clears and writes) seen so far.
    pub fn change_count(&self) -> u64 {
        self.change_count.load(Ordering::SeqCst)
    }

    /// Make subsequent `clear`/`write_items` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), PasteboardError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PasteboardError::Write("write refused".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PasteboardItem>> {
        // A poisoned lock only means a test panicked mid-write; the data is
        // still a valid Vec.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Pasteboard for MemoryPasteboard {
    fn read_items(&self) -> Result<Vec<PasteboardItem>, PasteboardError> {
        Ok(self.items())
    }

    fn write_items(&self, items: &[PasteboardItem]) -> Result<(), PasteboardError> {
        self.check_writable()?;
        self.lock().extend_from_slice(items);
        self.change_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), PasteboardError> {
        self.check_writable()?;
        self.lock().clear();
        self.change_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn data_for_type(&self, type_id: &str) -> Result<Option<Vec<u8>>, PasteboardError> {
        Ok(self
            .lock()
            .iter()
            .find_map(|item| item.data_for_type(type_id))
            .map(<[u8]>::to_vec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PasteboardRepresentation;

    #[test]
    fn test_data_for_type_finds_first_item_with_type() {
        let pasteboard = MemoryPasteboard::with_items(vec![
            PasteboardItem::single("public.utf8-plain-text", b"a".to_vec()),
            PasteboardItem::new(vec![
                PasteboardRepresentation::new("public.utf8-plain-text", b"b".to_vec()),
                PasteboardRepresentation::new("com.example.custom", b"c".to_vec()),
            ]),
        ]);

        assert_eq!(
            pasteboard.data_for_type("com.example.custom").unwrap(),
            Some(b"c".to_vec())
        );
        assert_eq!(
            pasteboard.data_for_type("public.utf8-plain-text").unwrap(),
            Some(b"a".to_vec())
        );
        assert_eq!(pasteboard.data_for_type("public.png").unwrap(), None);
    }

    #[test]
    fn test_writes_append_and_count_changes() {
        let pasteboard = MemoryPasteboard::new();
        let item = PasteboardItem::single("public.utf8-plain-text", b"x".to_vec());

        pasteboard.write_items(&[item.clone()]).unwrap();
        pasteboard.write_items(&[item.clone()]).unwrap();
        assert_eq!(pasteboard.items().len(), 2);

        pasteboard.clear().unwrap();
        assert!(pasteboard.items().is_empty());
        assert_eq!(pasteboard.change_count(), 3);
    }

    #[test]
    fn test_refused_writes_leave_contents_untouched() {
        let item = PasteboardItem::single("public.utf8-plain-text", b"keep".to_vec());
        let pasteboard = MemoryPasteboard::with_items(vec![item.clone()]);
        pasteboard.set_fail_writes(true);

        assert!(pasteboard.clear().is_err());
        assert!(pasteboard.write_items(&[item.clone()]).is_err());
        assert_eq!(pasteboard.items(), vec![item]);
    }
}
