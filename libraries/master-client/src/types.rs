//! Types for master node API requests and responses.

use master_core::FolderEntry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP settings for [`crate::MasterClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub password: &'a str,
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Response from the playlist listing endpoint.
#[derive(Debug, Deserialize)]
pub struct PlaylistNamesResponse {
    pub playlists: Vec<String>,
}

// =============================================================================
// File Browser Types
// =============================================================================

/// Query string of the file listing endpoint.
#[derive(Debug, Serialize)]
pub struct FileListQuery<'a> {
    pub folders_only: bool,
    pub requested_path: &'a str,
}

/// Response from the file listing endpoint.
#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FolderEntry>,
}
