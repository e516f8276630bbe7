//! Main master node client.

use crate::auth::AuthClient;
use crate::base_url::BaseUrlProvider;
use crate::error::{ClientError, Result};
use crate::files::FileClient;
use crate::playlist::PlaylistClient;
use crate::types::ClientOptions;
use master_core::{FolderEntry, Playlist};
use master_state::AppContext;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

/// Client for one master node, bound to one operator session.
///
/// The typed sub-clients ([`auth`](Self::auth), [`playlists`](Self::playlists),
/// [`files`](Self::files)) report every outcome as a [`ClientError`]. The
/// methods on this type are the front-end layer on top of them: they keep the
/// session's [`AppContext`] up to date and fold non-success HTTP statuses
/// into `false`, empty or absent results. Network failures and unreadable
/// payloads are still returned as errors.
///
/// # Example
///
/// ```ignore
/// use master_client::{MasterClient, PageOrigin};
/// use master_state::AppContext;
///
/// let ctx = AppContext::new();
/// let origin = PageOrigin::new("http", "radio.local").with_port(3000);
/// let client = MasterClient::new(&origin, ctx.clone())?;
///
/// if client.login("secret").await? {
///     for name in client.playlist_names().await? {
///         println!("{name}");
///     }
/// }
/// ```
pub struct MasterClient {
    http: Client,
    base_url: Url,
    context: AppContext,
}

impl MasterClient {
    /// Create a client with default HTTP settings.
    pub fn new(provider: &dyn BaseUrlProvider, context: AppContext) -> Result<Self> {
        Self::with_options(provider, context, ClientOptions::default())
    }

    pub fn with_options(
        provider: &dyn BaseUrlProvider,
        context: AppContext,
        options: ClientOptions,
    ) -> Result<Self> {
        let base_url = provider.base_url()?;

        let http = Client::builder()
            .cookie_store(true)
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(format!("MasterClient/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            context,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    pub fn playlists(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.base_url)
    }

    pub fn files(&self) -> FileClient<'_> {
        FileClient::new(&self.http, &self.base_url)
    }

    /// Refresh the login flag from the node.
    pub async fn check_is_logged_in(&self) -> Result<bool> {
        let logged_in = collapse(self.auth().is_logged_in().await, "session check")?.unwrap_or(false);
        self.context.set_logged_in(logged_in);
        Ok(logged_in)
    }

    /// Log in; the login flag follows the outcome.
    pub async fn login(&self, password: &str) -> Result<bool> {
        let logged_in = collapse(self.auth().login(password).await, "login")?.is_some();
        self.context.set_logged_in(logged_in);
        Ok(logged_in)
    }

    /// Log out. The login flag is only cleared when the node confirms.
    pub async fn logout(&self) -> Result<()> {
        if collapse(self.auth().logout().await, "logout")?.is_some() {
            self.context.set_logged_in(false);
        }
        Ok(())
    }

    /// Playlist names, empty when the node refuses.
    pub async fn playlist_names(&self) -> Result<Vec<String>> {
        Ok(collapse(self.playlists().list_names().await, "playlist listing")?.unwrap_or_default())
    }

    /// One playlist, absent when the node refuses or does not have it.
    pub async fn playlist(&self, name: &str) -> Result<Option<Playlist>> {
        match self.playlists().get(name).await {
            Err(e @ ClientError::Validation(_)) => {
                warn!(playlist = %name, error = %e, "Refusing playlist name");
                Ok(None)
            }
            other => collapse(other, "playlist fetch"),
        }
    }

    /// Save a playlist and make it the selected one.
    ///
    /// Unlike the other front-end methods, every failure is returned.
    pub async fn update_playlist(&self, name: &str, playlist: &Playlist) -> Result<()> {
        self.playlists().update(name, playlist).await?;
        self.context.select_playlist(Some(name.to_string()));
        info!(playlist = %name, "Playlist updated");
        Ok(())
    }

    /// Directory listing, empty when the node refuses.
    pub async fn list_files(&self, requested_path: &str, folders_only: bool) -> Result<Vec<FolderEntry>> {
        Ok(collapse(
            self.files().list(requested_path, folders_only).await,
            "file listing",
        )?
        .unwrap_or_default())
    }
}

/// Fold a non-success status into `None`, keep other errors.
fn collapse<T>(result: Result<T>, operation: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_status() => {
            warn!(operation, error = %e, "Request refused by node");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
