//! Capture coordinator: the clipboard-mediated capture protocol.

use crate::config::{CaptureConfig, ConfigError};
use crate::error::{CaptureError, CaptureOutcome};
use crate::guard::RestoreGuard;
use crate::state::CaptureState;
use kami_input::{
    InputSynthesizer, InputSynthesizerRef, PermissionProvider, PermissionProviderRef,
};
use kami_pasteboard::{Pasteboard, PasteboardRef, PasteboardSnapshot};
use kami_patch::{DecodedRecord, PathResolver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Runs capture attempts against the shared system clipboard.
///
/// At most one attempt is in flight per coordinator. A second call to
/// [`capture`](Self::capture) while one runs returns
/// [`CaptureError::AlreadyInProgress`] immediately and leaves the running
/// attempt alone.
///
/// Once the clipboard has been snapshotted it is restored on every exit:
/// success, each failure, [`cancel`](Self::cancel), and the capture future
/// being dropped.
pub struct CaptureCoordinator {
    config: CaptureConfig,
    pasteboard: PasteboardRef,
    input: InputSynthesizerRef,
    permission: PermissionProviderRef,
    resolver: PathResolver,
    busy: AtomicBool,
    state: Mutex<CaptureState>,
    cancel_token: Mutex<Option<CancellationToken>>,
}

impl CaptureCoordinator {
    /// Build a coordinator. Fails when `config` does not pass
    /// [`CaptureConfig::validate`].
    pub fn new(
        config: CaptureConfig,
        pasteboard: PasteboardRef,
        input: InputSynthesizerRef,
        permission: PermissionProviderRef,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            pasteboard,
            input,
            permission,
            resolver: PathResolver::new(),
            busy: AtomicBool::new(false),
            state: Mutex::new(CaptureState::Idle),
            cancel_token: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn state(&self) -> CaptureState {
        *lock(&self.state)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Ask the in-flight attempt to stop.
    ///
    /// The attempt still restores the clipboard before reporting
    /// [`CaptureError::Cancelled`]. Returns `false` when nothing was running.
    pub fn cancel(&self) -> bool {
        match lock(&self.cancel_token).as_ref() {
            Some(token) => {
                tracing::info!(state = %self.state(), "Cancelling capture");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Run one capture attempt.
    ///
    /// Never panics on protocol failures: every failure is a
    /// [`CaptureError`] value.
    pub async fn capture(&self) -> CaptureOutcome {
        let Some(attempt) = self.begin() else {
            tracing::warn!("Capture requested while another is in flight");
            return Err(CaptureError::AlreadyInProgress);
        };

        let outcome = self.run(&attempt.cancel).await;

        match &outcome {
            Ok(path) => {
                self.transition(CaptureState::Succeeded);
                tracing::info!(path = %path.as_path().display(), "Capture succeeded");
            }
            Err(e) => {
                self.transition(CaptureState::Failed);
                tracing::warn!(code = e.code(), error = %e, "Capture failed");
            }
        }

        outcome
    }

    fn begin(&self) -> Option<Attempt<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        let cancel = CancellationToken::new();
        *lock(&self.cancel_token) = Some(cancel.clone());

        Some(Attempt {
            coordinator: self,
            cancel,
        })
    }

    async fn run(&self, cancel: &CancellationToken) -> CaptureOutcome {
        if !self.permission.has_capture_permission() {
            if self.config.request_permission_when_denied {
                self.permission.request_capture_permission();
            }
            return Err(CaptureError::PermissionDenied);
        }

        if cancel.is_cancelled() {
            return Err(CaptureError::Cancelled);
        }

        self.transition(CaptureState::Snapshotting);
        let pasteboard = &*self.pasteboard;

        let snapshot = match PasteboardSnapshot::capture(pasteboard) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Could not snapshot clipboard");
                return Err(CaptureError::ClipboardUnavailable);
            }
        };
        let guard = RestoreGuard::new(pasteboard, snapshot);

        // A stale payload from before the attempt must not satisfy the poll.
        let outcome = match pasteboard.clear() {
            Ok(()) => self.exchange(cancel).await,
            Err(e) => {
                tracing::error!(error = %e, "Could not clear clipboard");
                Err(CaptureError::ClipboardUnavailable)
            }
        };

        self.transition(CaptureState::Restoring);
        guard.restore();

        outcome
    }

    /// Copy command, poll, decode, resolve.
    async fn exchange(&self, cancel: &CancellationToken) -> CaptureOutcome {
        if cancel.is_cancelled() {
            return Err(CaptureError::Cancelled);
        }

        self.transition(CaptureState::AwaitingForegroundCommand);
        match self.input.send_copy_command() {
            Ok(pid) => tracing::debug!(pid, "Sent copy command"),
            Err(e) => {
                tracing::warn!(error = %e, "Copy command failed");
                return Err(CaptureError::CommandFailed);
            }
        }

        self.transition(CaptureState::Polling);
        let payload = self.poll_payload(cancel).await?;

        self.transition(CaptureState::Decoding);
        let declared_path = self.extract_declared_path(&payload)?;

        self.transition(CaptureState::Resolving);
        self.resolver
            .resolve(&declared_path)
            .ok_or(CaptureError::FileNotFound)
    }

    /// Poll for the payload until it appears, the deadline passes, or the
    /// attempt is cancelled.
    ///
    /// The deadline is checked after each read, so the loop returns
    /// `Timeout` no earlier than the deadline and no later than one interval
    /// after it.
    async fn poll_payload(&self, cancel: &CancellationToken) -> Result<Vec<u8>, CaptureError> {
        let deadline = self.config.deadline();
        let started = Instant::now();

        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut reads = 0u32;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CaptureError::Cancelled),
                _ = ticker.tick() => {}
            }

            reads += 1;
            match self.pasteboard.data_for_type(&self.config.payload_type) {
                Ok(Some(bytes)) => {
                    tracing::debug!(
                        reads,
                        bytes = bytes.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Payload found"
                    );
                    return Ok(bytes);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Clipboard read failed while polling"),
            }

            if started.elapsed() >= deadline {
                tracing::debug!(reads, "Payload deadline passed");
                return Err(CaptureError::Timeout);
            }
        }
    }

    fn extract_declared_path(&self, payload: &[u8]) -> Result<String, CaptureError> {
        let record = DecodedRecord::decode(payload).map_err(|e| {
            tracing::warn!(error = %e, "Payload is not a property list");
            CaptureError::MalformedPayload
        })?;

        match record.extract_path(&self.config.query) {
            Some(path) => {
                tracing::debug!(declared_path = %path, "Declared script path");
                Ok(path)
            }
            None => {
                tracing::debug!(
                    records = record.records().count(),
                    "No record matched the script query"
                );
                Err(CaptureError::WrongItemType)
            }
        }
    }

    fn transition(&self, next: CaptureState) {
        let mut state = lock(&self.state);
        tracing::debug!(from = %*state, to = %next, "Capture state");
        *state = next;
    }
}

impl std::fmt::Debug for CaptureCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureCoordinator")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

/// Ownership of the coordinator for one attempt. Dropping it returns the
/// coordinator to idle, however the attempt ended.
struct Attempt<'a> {
    coordinator: &'a CaptureCoordinator,
    cancel: CancellationToken,
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        let coordinator = self.coordinator;
        *lock(&coordinator.cancel_token) = None;
        *lock(&coordinator.state) = CaptureState::Idle;
        coordinator.busy.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // State is plain data; a panic elsewhere cannot leave it half-written.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
