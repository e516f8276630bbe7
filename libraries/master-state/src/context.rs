//! Session context with the self-clearing notification banner.

use crate::types::{AppState, NotificationLevel, PlaylistPage};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How long a notification stays visible after the most recent one was shown.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// The armed banner-clearing task. Only the task whose marker is still in
/// the slot may clear the banner.
struct PendingClear {
    handle: JoinHandle<()>,
    marker: Arc<()>,
}

struct Inner {
    state: watch::Sender<AppState>,
    pending: Mutex<Option<PendingClear>>,
    notification_timeout: Duration,
}

/// Shared state of one operator session.
///
/// Cloning is cheap and every clone sees the same state. All mutations go
/// through methods so the notification timer bookkeeping cannot be skipped.
///
/// # Example
///
/// ```ignore
/// let ctx = AppContext::new();
/// let mut updates = ctx.subscribe();
///
/// ctx.show_success_notification("Playlist saved");
/// updates.changed().await?;
/// assert_eq!(updates.borrow().notification_text, "Playlist saved");
/// ```
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<Inner>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::with_notification_timeout(DEFAULT_NOTIFICATION_TIMEOUT)
    }

    pub fn with_notification_timeout(notification_timeout: Duration) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                pending: Mutex::new(None),
                notification_timeout,
            }),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receive every state change, e.g. to re-render a view.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    pub fn notification_timeout(&self) -> Duration {
        self.inner.notification_timeout
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.state.borrow().is_logged_in
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.inner.state.send_if_modified(|s| {
            let changed = s.is_logged_in != logged_in;
            s.is_logged_in = logged_in;
            changed
        });
    }

    pub fn selected_playlist_name(&self) -> Option<String> {
        self.inner.state.borrow().selected_playlist_name.clone()
    }

    pub fn select_playlist(&self, name: Option<String>) {
        self.inner
            .state
            .send_modify(|s| s.selected_playlist_name = name);
    }

    pub fn current_playlist_page(&self) -> PlaylistPage {
        self.inner.state.borrow().current_playlist_page
    }

    pub fn set_current_playlist_page(&self, page: PlaylistPage) {
        self.inner
            .state
            .send_modify(|s| s.current_playlist_page = page);
    }

    pub fn chosen_file_path(&self) -> Option<String> {
        self.inner.state.borrow().chosen_file_path.clone()
    }

    pub fn choose_file_path(&self, path: Option<String>) {
        self.inner.state.send_modify(|s| s.chosen_file_path = path);
    }

    pub fn show_success_notification(&self, text: impl Into<String>) {
        self.show_notification(text.into(), NotificationLevel::Success);
    }

    pub fn show_error_notification(&self, text: impl Into<String>) {
        self.show_notification(text.into(), NotificationLevel::Error);
    }

    /// Whether a banner clear is currently scheduled.
    pub fn has_pending_clear(&self) -> bool {
        self.inner.lock_pending().is_some()
    }

    /// Cancel the scheduled banner clear. Call when the session ends.
    pub fn shutdown(&self) {
        if let Some(previous) = self.inner.lock_pending().take() {
            previous.handle.abort();
        }
    }

    /// Outside a Tokio runtime the banner is shown but never auto-cleared.
    fn show_notification(&self, text: String, level: NotificationLevel) {
        let mut pending = self.inner.lock_pending();

        if let Some(previous) = pending.take() {
            previous.handle.abort();
        }

        debug!(level = ?level, text = %text, "Showing notification");
        self.inner.state.send_modify(|s| {
            s.notification_text = text;
            s.notification_level = level;
        });

        let Ok(runtime) = Handle::try_current() else {
            warn!("No Tokio runtime; notification will not clear itself");
            return;
        };

        // Deadline is taken now, not when the task first runs
        let deadline = Instant::now() + self.inner.notification_timeout;
        let marker = Arc::new(());
        let task_marker = Arc::clone(&marker);
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = weak.upgrade() {
                inner.expire(&task_marker);
            }
        });

        *pending = Some(PendingClear { handle, marker });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingClear>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire(&self, marker: &Arc<()>) {
        let mut pending = self.lock_pending();

        let is_current = pending
            .as_ref()
            .is_some_and(|p| Arc::ptr_eq(&p.marker, marker));
        if !is_current {
            debug!("Skipping superseded notification clear");
            return;
        }

        *pending = None;
        self.state.send_modify(|s| s.notification_text.clear());
        debug!("Notification cleared");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.handle.abort();
        }
    }
}
