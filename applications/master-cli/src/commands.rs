//! Command implementations

use anyhow::Context;
use master_client::MasterClient;
use master_core::{Music, Playlist};
use master_state::{AppContext, AppState, NotificationLevel};
use std::path::Path;

pub async fn login(client: &MasterClient, password: &str) -> anyhow::Result<()> {
    if !client.login(password).await? {
        anyhow::bail!("Login refused");
    }
    tracing::debug!("Logged in");
    client.context().show_success_notification("Logged in");
    Ok(())
}

pub async fn status(client: &MasterClient) -> anyhow::Result<()> {
    let logged_in = client.check_is_logged_in().await?;
    println!("{}", if logged_in { "logged in" } else { "logged out" });
    Ok(())
}

pub async fn logout(client: &MasterClient) -> anyhow::Result<()> {
    client.logout().await?;
    if client.context().is_logged_in() {
        anyhow::bail!("Logout refused");
    }
    client.context().show_success_notification("Logged out");
    Ok(())
}

pub async fn playlists(client: &MasterClient) -> anyhow::Result<()> {
    let names = client.playlist_names().await?;
    if names.is_empty() {
        tracing::info!("No playlists");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub async fn show(client: &MasterClient, name: &str) -> anyhow::Result<()> {
    let playlist = client
        .playlist(name)
        .await?
        .with_context(|| format!("Playlist '{}' is not available", name))?;

    client.context().select_playlist(Some(name.to_string()));
    report_overlaps(playlist.music.as_ref());

    let json = serde_json::to_string_pretty(&playlist)?;
    println!("{}", json);
    Ok(())
}

pub async fn save(client: &MasterClient, name: &str, file: &Path) -> anyhow::Result<()> {
    let playlist = read_playlist(file).await?;
    report_overlaps(playlist.music.as_ref());

    client
        .update_playlist(name, &playlist)
        .await
        .with_context(|| format!("Failed to save playlist '{}'", name))?;

    client
        .context()
        .show_success_notification(format!("Playlist '{}' saved", name));
    Ok(())
}

pub async fn delete(client: &MasterClient, name: &str) -> anyhow::Result<()> {
    client
        .playlists()
        .delete(name)
        .await
        .with_context(|| format!("Failed to delete playlist '{}'", name))?;

    let ctx = client.context();
    if ctx.selected_playlist_name().as_deref() == Some(name) {
        ctx.select_playlist(None);
    }
    ctx.show_success_notification(format!("Playlist '{}' deleted", name));
    Ok(())
}

pub async fn ls(client: &MasterClient, path: &str, folders_only: bool) -> anyhow::Result<()> {
    let entries = client.list_files(path, folders_only).await?;
    if let Some(first) = entries.first() {
        tracing::debug!(count = entries.len(), first = %first.name, "Listed folder");
    }

    for entry in &entries {
        if entry.is_file {
            println!("{}", entry.name);
        } else {
            println!("{}/", entry.name);
        }
    }

    client.context().choose_file_path(Some(path.to_string()));
    Ok(())
}

/// Parse and validate a playlist file without touching the network.
pub async fn check(ctx: &AppContext, file: &Path) -> anyhow::Result<()> {
    let playlist = read_playlist(file).await?;
    playlist.validate()?;
    report_overlaps(playlist.music.as_ref());

    ctx.show_success_notification(format!("{} is a valid playlist", file.display()));
    Ok(())
}

pub fn print_notification(state: &AppState) {
    if !state.is_notification_visible() {
        return;
    }
    match state.notification_level {
        NotificationLevel::Success => println!("[ok] {}", state.notification_text),
        NotificationLevel::Error => eprintln!("[error] {}", state.notification_text),
    }
}

async fn read_playlist(file: &Path) -> anyhow::Result<Playlist> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    Playlist::from_json(&contents).with_context(|| format!("Failed to parse {}", file.display()))
}

fn report_overlaps(music: Option<&Music>) {
    let Some(music) = music else { return };
    for (a, b) in music.overlapping_windows() {
        tracing::warn!(first = a, second = b, "Music windows overlap");
    }
}
