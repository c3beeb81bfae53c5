//! Clipboard restoration guard.

use kami_pasteboard::{Pasteboard, PasteboardSnapshot};

/// Holds the user's clipboard snapshot until it has been written back.
///
/// [`restore`](RestoreGuard::restore) is the normal path. If the guard is
/// dropped with the snapshot still inside (the capture future was dropped,
/// or a panic unwound through it), the destructor restores instead.
pub(crate) struct RestoreGuard<'a> {
    pasteboard: &'a dyn Pasteboard,
    snapshot: Option<PasteboardSnapshot>,
}

impl<'a> RestoreGuard<'a> {
    pub(crate) fn new(pasteboard: &'a dyn Pasteboard, snapshot: PasteboardSnapshot) -> Self {
        Self {
            pasteboard,
            snapshot: Some(snapshot),
        }
    }

    /// Write the snapshot back. Failures are logged, never returned: the
    /// attempt's outcome is what the caller needs to see.
    pub(crate) fn restore(mut self) {
        self.restore_now();
    }

    fn restore_now(&mut self) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };

        let items = snapshot.items().len();
        if let Err(e) = snapshot.restore(self.pasteboard) {
            tracing::error!(error = %e, items, "Failed to restore clipboard");
        }
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            tracing::warn!("Capture abandoned mid-attempt, restoring clipboard");
            self.restore_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kami_pasteboard::{MemoryPasteboard, PasteboardItem};

    fn user_clipboard() -> Vec<PasteboardItem> {
        vec![PasteboardItem::single(
            "public.utf8-plain-text",
            b"user text".to_vec(),
        )]
    }

    #[test]
    fn test_drop_restores() {
        let pasteboard = MemoryPasteboard::with_items(user_clipboard());
        {
            let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();
            let _guard = RestoreGuard::new(&pasteboard, snapshot);
            pasteboard.clear().unwrap();
        }
        assert_eq!(pasteboard.items(), user_clipboard());
    }

    #[test]
    fn test_restore_runs_once() {
        let pasteboard = MemoryPasteboard::with_items(user_clipboard());
        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();
        let guard = RestoreGuard::new(&pasteboard, snapshot);
        pasteboard.clear().unwrap();

        let before = pasteboard.change_count();
        guard.restore();
        // clear + write, and nothing more from the destructor
        assert_eq!(pasteboard.change_count(), before + 2);
        assert_eq!(pasteboard.items(), user_clipboard());
    }

    #[test]
    fn test_failed_restore_does_not_panic() {
        let pasteboard = MemoryPasteboard::with_items(user_clipboard());
        let snapshot = PasteboardSnapshot::capture(&pasteboard).unwrap();
        pasteboard.set_fail_writes(true);

        RestoreGuard::new(&pasteboard, snapshot).restore();
        assert_eq!(pasteboard.items(), user_clipboard());
    }
}
