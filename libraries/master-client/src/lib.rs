//! Master Node Client
//!
//! HTTP client library for the master node management API.
//!
//! # Features
//!
//! - **Authentication**: Password login with a cookie session
//! - **Playlists**: List, fetch, validate-and-save, delete
//! - **Media browser**: Sorted directory listings and a lazily loaded tree
//!
//! # Example
//!
//! ```ignore
//! use master_client::{MasterClient, StaticBaseUrl};
//! use master_state::AppContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = AppContext::new();
//!     let base = StaticBaseUrl::parse("http://radio.local:3000")?;
//!     let client = MasterClient::new(&base, ctx.clone())?;
//!
//!     client.auth().login("secret").await?;
//!
//!     let mut playlist = client.playlists().get("default").await?;
//!     if let Some(music) = playlist.music.as_mut() {
//!         music.shuffle = true;
//!     }
//!     client.update_playlist("default", &playlist).await?;
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod base_url;
mod client;
mod error;
mod files;
mod playlist;
mod types;

// Re-export main types
pub use base_url::{AppEnv, BaseUrlProvider, PageOrigin, StaticBaseUrl};
pub use client::MasterClient;
pub use error::{ClientError, ErrorKind, Result};
pub use types::ClientOptions;

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use files::FileClient;
pub use playlist::PlaylistClient;
