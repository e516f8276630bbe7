//! Media folder browsing on the master node.

use crate::error::{send_error, server_error, ClientError, Result};
use crate::types::{FileListQuery, FileListResponse};
use master_core::{sort_entries, CollapsableFolderEntry, FolderEntry};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Directory browser client for the master node.
pub struct FileClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> FileClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// List entries under `requested_path` (relative to the media folder,
    /// empty for its root), folders first and then by name.
    pub async fn list(&self, requested_path: &str, folders_only: bool) -> Result<Vec<FolderEntry>> {
        let url = self.base_url.join("/api/file")?;
        debug!(url = %url, path = %requested_path, folders_only, "Listing files");

        let response = self
            .http
            .get(url)
            .query(&FileListQuery {
                folders_only,
                requested_path,
            })
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();

        if status.is_success() {
            let payload: FileListResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse file listing: {}", e))
            })?;

            let mut files = payload.files;
            sort_entries(&mut files);
            debug!(entries = files.len(), "Listed files");
            Ok(files)
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(format!("path {}", requested_path)))
        } else {
            Err(server_error(response).await)
        }
    }

    /// Open or close a folder node, loading its children the first time.
    ///
    /// Returns whether the node is open afterwards.
    pub async fn expand(&self, node: &mut CollapsableFolderEntry, folders_only: bool) -> Result<bool> {
        if node.entry.is_file {
            return Ok(false);
        }
        if !node.is_loaded() {
            let children = self.list(&node.entry.request_path(), folders_only).await?;
            node.set_children(children);
        }
        Ok(node.toggle())
    }
}
