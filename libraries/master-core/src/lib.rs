//! Master node core types
//!
//! Data model shared by the master node management client: the playlist
//! schedule document, the TOML date/time literal wrapper it is built on,
//! directory entries for the media browser, and pre-save validation.

pub mod datetime;
pub mod folder;
pub mod name;
pub mod playlist;
pub mod validation;

pub use datetime::{Stamp, StampKind, TomlDateTime};
pub use folder::{sort_entries, CollapsableFolderEntry, FolderEntry, VisibleRow};
pub use name::{validate_deletable, validate_playlist_name, DEFAULT_PLAYLIST_NAME};
pub use playlist::{
    Advertizement, Music, MusicWindow, Playlist, TimeAnnouncement, WorkingHours,
    WorkingHoursRange, DAYS_PER_WEEK,
};
pub use validation::{Result, ValidationError};
