use serde::{Deserialize, Serialize};

/// Severity of the notification banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Success,
    Error,
}

/// Editor tab of the playlist screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistPage {
    #[default]
    WorkingHours,
    Music,
    Advertizement,
    TimeAnnouncement,
}

/// Snapshot of the session state, as published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub is_logged_in: bool,
    pub selected_playlist_name: Option<String>,
    /// Empty when no banner is shown
    pub notification_text: String,
    pub notification_level: NotificationLevel,
    pub current_playlist_page: PlaylistPage,
    /// Last file picked in the media browser
    pub chosen_file_path: Option<String>,
}

impl AppState {
    pub fn is_notification_visible(&self) -> bool {
        !self.notification_text.is_empty()
    }
}
