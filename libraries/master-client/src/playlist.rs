//! Playlist operations for the master node.

use crate::error::{send_error, server_error, ClientError, Result};
use crate::types::PlaylistNamesResponse;
use master_core::{validate_deletable, validate_playlist_name, Playlist};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Playlist client for the master node.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    fn playlist_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.join("/api/playlist")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl("base URL cannot hold a path".into()))?
            .push(name);
        Ok(url)
    }

    /// Names of all playlists stored on the node.
    pub async fn list_names(&self) -> Result<Vec<String>> {
        let url = self.base_url.join("/api/playlist")?;
        debug!(url = %url, "Fetching playlist names");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status.is_success() {
            let payload: PlaylistNamesResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlist names: {}", e))
            })?;

            debug!(count = payload.playlists.len(), "Fetched playlist names");
            Ok(payload.playlists)
        } else {
            Err(server_error(response).await)
        }
    }

    /// Fetch one playlist.
    ///
    /// The node answers 400 when it cannot read the playlist file, so both
    /// 400 and 404 are reported as `NotFound`.
    pub async fn get(&self, name: &str) -> Result<Playlist> {
        validate_playlist_name(name)?;
        let url = self.playlist_url(name)?;
        debug!(url = %url, playlist = %name, "Fetching playlist");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlist {}: {}", name, e))
            })
        } else if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            Err(ClientError::NotFound(format!("playlist {}", name)))
        } else {
            Err(server_error(response).await)
        }
    }

    /// Save a playlist. Nothing is sent if it fails validation.
    pub async fn update(&self, name: &str, playlist: &Playlist) -> Result<()> {
        validate_playlist_name(name)?;
        playlist.validate()?;

        let url = self.playlist_url(name)?;
        debug!(url = %url, playlist = %name, "Saving playlist");

        let response = self
            .http
            .post(url)
            .json(playlist)
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            info!(playlist = %name, "Playlist saved");
            Ok(())
        } else {
            Err(server_error(response).await)
        }
    }

    /// Delete a playlist. The default playlist is refused locally.
    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_deletable(name)?;

        let url = self.playlist_url(name)?;
        debug!(url = %url, playlist = %name, "Deleting playlist");

        let response = self.http.delete(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status.is_success() {
            info!(playlist = %name, "Playlist deleted");
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(format!("playlist {}", name)))
        } else {
            Err(server_error(response).await)
        }
    }
}
