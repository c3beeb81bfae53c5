//! Capture outcome and error taxonomy.

use kami_patch::ResolvedPath;
use thiserror::Error;

/// Result of one capture attempt.
pub type CaptureOutcome = Result<ResolvedPath, CaptureError>;

/// Why a capture attempt failed.
///
/// Exactly one is reported per attempt. Each maps to a distinct message so
/// the UI can tell the user what to do next.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureError {
    /// Accessibility permission is missing; the clipboard was not touched.
    #[error("accessibility permission not granted")]
    PermissionDenied,

    /// Another attempt owns the clipboard right now.
    #[error("a capture is already in progress")]
    AlreadyInProgress,

    /// The copy shortcut could not be built or had no process to go to.
    #[error("could not send the copy command")]
    CommandFailed,

    /// Nothing in the expected format reached the clipboard in time.
    #[error("timed out waiting for the patch payload")]
    Timeout,

    /// The payload arrived but is not a property list.
    #[error("clipboard payload could not be decoded")]
    MalformedPayload,

    /// The payload decoded but holds no JavaScript patch.
    #[error("the selected item is not a JavaScript patch")]
    WrongItemType,

    /// The script named in the payload is not where it should be.
    #[error("could not find the patch's script file")]
    FileNotFound,

    /// The caller abandoned the attempt.
    #[error("capture cancelled")]
    Cancelled,

    /// The clipboard could not be read or cleared. A failed read stops the
    /// attempt before anything is modified.
    #[error("clipboard unavailable")]
    ClipboardUnavailable,
}

impl CaptureError {
    /// Stable short identifier, shown next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => "PERMISSION_DENIED",
            CaptureError::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            CaptureError::CommandFailed => "POST_COPY_ERR",
            CaptureError::Timeout => "TIMEOUT",
            CaptureError::MalformedPayload => "BPLIST_ERR",
            CaptureError::WrongItemType => "INVALID_PATCH_TYPE",
            CaptureError::FileNotFound => "INVALID_FILE_PATH",
            CaptureError::Cancelled => "CANCELLED",
            CaptureError::ClipboardUnavailable => "CLIPBOARD_ERR",
        }
    }

    /// Sentence for the error notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => {
                "Grant Accessibility permission in System Settings to open patches."
            }
            CaptureError::AlreadyInProgress => "Still opening the previous patch.",
            CaptureError::CommandFailed => "Couldn't do copy action.",
            CaptureError::Timeout => "Did you select a JavaScript patch? Try again.",
            CaptureError::MalformedPayload => "Couldn't convert Pasteboard data.",
            CaptureError::WrongItemType => "Did you select a JavaScript patch?",
            CaptureError::FileNotFound => "Couldn't find associated JavaScript file.",
            CaptureError::Cancelled => "Opening the patch was cancelled.",
            CaptureError::ClipboardUnavailable => "Couldn't access the clipboard.",
        }
    }

    /// Whether trying again straight away could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CaptureError::AlreadyInProgress
                | CaptureError::CommandFailed
                | CaptureError::Timeout
                | CaptureError::Cancelled
        )
    }
}
