//! Master node client application state
//!
//! Holds the UI state of one operator session: login flag, the playlist
//! being edited, the active editor tab and a notification banner that clears
//! itself after a timeout. One [`AppContext`] is created per session and
//! handed to every component that needs it.

mod context;
mod types;

pub use context::{AppContext, DEFAULT_NOTIFICATION_TIMEOUT};
pub use types::{AppState, NotificationLevel, PlaylistPage};
