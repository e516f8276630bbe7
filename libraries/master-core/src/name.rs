/// Playlist name rules
use crate::validation::{Result, ValidationError};

/// Name of the playlist every node falls back to. It cannot be deleted.
pub const DEFAULT_PLAYLIST_NAME: &str = "default";

/// Check that `name` can be used as a playlist identifier.
///
/// Names end up in the server's file names (`playlist_<name>.toml`), so dots
/// and path separators are refused instead of being silently stripped.
pub fn validate_playlist_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| ValidationError::InvalidPlaylistName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name contains a path separator"));
    }
    if name.contains('.') {
        return Err(invalid("name contains a dot"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("name contains a control character"));
    }

    Ok(())
}

pub(crate) fn is_default(name: &str) -> bool {
    name == DEFAULT_PLAYLIST_NAME
}

/// Check that `name` may be deleted.
pub fn validate_deletable(name: &str) -> Result<()> {
    validate_playlist_name(name)?;
    if is_default(name) {
        return Err(ValidationError::DefaultPlaylistProtected);
    }
    Ok(())
}
