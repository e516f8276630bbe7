//! Tests for the master node client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a running master node.

use master_client::{ClientError, ErrorKind, MasterClient, StaticBaseUrl};
use master_core::{
    Advertizement, CollapsableFolderEntry, Playlist, TomlDateTime, ValidationError, WorkingHours,
    WorkingHoursRange,
};
use master_state::AppContext;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> (MasterClient, AppContext) {
    let ctx = AppContext::new();
    let base = StaticBaseUrl::parse(&server.uri()).unwrap();
    let client = MasterClient::new(&base, ctx.clone()).unwrap();
    (client, ctx)
}

fn range(open: &str, close: &str) -> Value {
    json!([
        { "$__toml_private_datetime": open },
        { "$__toml_private_datetime": close }
    ])
}

fn week() -> Value {
    json!([
        range("09:00:00", "18:00:00"),
        range("09:00:00", "18:00:00"),
        range("09:00:00", "18:00:00"),
        range("09:00:00", "18:00:00"),
        range("09:00:00", "18:00:00"),
        range("10:00:00", "15:00:00"),
        range("00:00:00", "00:00:00")
    ])
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_login_sends_password_and_sets_flag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "password": "secret" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);

        assert!(client.login("secret").await.unwrap());
        assert!(ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);
        ctx.set_logged_in(true);

        let err = client.auth().login("nope").await.unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(400)));
        assert_eq!(err.kind(), ErrorKind::AuthFailure);

        assert!(!client.login("nope").await.unwrap());
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "token=abc123; Path=/"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/auth/is_logged_in"))
            .and(header("cookie", "token=abc123"))
            .respond_with(ResponseTemplate::new(200))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/auth/is_logged_in"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);

        assert!(!client.check_is_logged_in().await.unwrap());
        client.auth().login("secret").await.unwrap();
        assert!(client.check_is_logged_in().await.unwrap());
        assert!(ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_is_logged_in_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/is_logged_in"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);
        ctx.set_logged_in(true);

        match client.auth().is_logged_in().await.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }

        assert!(!client.check_is_logged_in().await.unwrap());
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session_flag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);

        assert!(client.login("secret").await.unwrap());
        assert!(ctx.is_logged_in());

        let err = client.auth().logout().await.unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(500)));
        assert_eq!(err.kind(), ErrorKind::AuthFailure);

        client.logout().await.unwrap();
        assert!(ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_unauthorized_login_is_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, _ctx) = client_for(&server);

        let err = client.auth().login("nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthFailure);
    }

    #[tokio::test]
    async fn test_logout_clears_session_flag() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);
        ctx.set_logged_in(true);

        client.logout().await.unwrap();
        assert!(!ctx.is_logged_in());
    }

    #[tokio::test]
    async fn test_unreachable_server_propagates() {
        let ctx = AppContext::new();
        let base = StaticBaseUrl::parse("http://127.0.0.1:9").unwrap();
        let client = MasterClient::new(&base, ctx.clone()).unwrap();
        ctx.set_logged_in(true);

        let err = client.logout().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert!(ctx.is_logged_in());
    }
}

// =============================================================================
// Playlist Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_list_names() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "playlists": ["summer", "night"] })),
            )
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let names = client.playlists().list_names().await.unwrap();
        assert_eq!(names, ["summer", "night"]);
    }

    #[tokio::test]
    async fn test_list_names_error_is_distinguishable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let err = client.playlists().list_names().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);

        // The front-end layer folds it into an empty list
        assert!(client.playlist_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "working_hours": { "schedule": week(), "exceptions": {} },
                "music": null
            })))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let playlist = client.playlist("default").await.unwrap().unwrap();
        let hours = playlist.working_hours.unwrap();
        assert_eq!(hours.schedule[5].close().literal(), "15:00:00");
        assert!(playlist.music.is_none());
        assert!(playlist.advertizement.is_none());
    }

    #[tokio::test]
    async fn test_missing_playlist_is_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let err = client.playlists().get("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert!(client.playlist("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_playlist_file_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist/broken"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({})))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        assert!(matches!(
            client.playlists().get("broken").await,
            Err(ClientError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_playlist_name_is_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlist/night%20shift"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let playlist = client.playlists().get("night shift").await.unwrap();
        assert_eq!(playlist, Playlist::default());
    }

    #[tokio::test]
    async fn test_update_omits_absent_sections() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/playlist/summer"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);

        let playlist = Playlist {
            working_hours: Some(WorkingHours::default()),
            ..Default::default()
        };
        client.update_playlist("summer", &playlist).await.unwrap();
        assert_eq!(ctx.selected_playlist_name().as_deref(), Some("summer"));

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let object = body.as_object().unwrap();
        assert!(object.contains_key("working_hours"));
        assert!(!object.contains_key("music"));
        assert!(!object.contains_key("advertizement"));
        assert!(!object.contains_key("time_announcement"));
    }

    #[tokio::test]
    async fn test_update_preserves_untouched_literals() {
        let server = MockServer::start().await;

        let document = json!({
            "working_hours": {
                "schedule": week(),
                "exceptions": { "2024-12-31": range("09:00:00.5", "13:00:00") }
            }
        });

        Mock::given(method("GET"))
            .and(path("/api/playlist/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/playlist/default"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let mut playlist = client.playlists().get("default").await.unwrap();
        let hours = playlist.working_hours.as_mut().unwrap();
        hours.schedule[6] = WorkingHoursRange(
            TomlDateTime::from_literal("12:00:00"),
            TomlDateTime::from_literal("16:00:00"),
        );
        client.playlists().update("default", &playlist).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[1].body).unwrap();

        let mut expected = document;
        expected["working_hours"]["schedule"][6] = range("12:00:00", "16:00:00");
        assert_eq!(sent, expected);
    }

    #[tokio::test]
    async fn test_update_failure_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/playlist/summer"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let (client, ctx) = client_for(&server);

        let err = client
            .update_playlist("summer", &Playlist::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ServerError { status: 400, .. }));
        assert!(ctx.selected_playlist_name().is_none());
    }

    #[tokio::test]
    async fn test_invalid_playlist_is_not_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let mut hours = WorkingHours::default();
        hours
            .exceptions
            .insert("31/12/2024".to_string(), WorkingHoursRange::closed());
        let playlist = Playlist {
            working_hours: Some(hours),
            advertizement: Some(Advertizement::default()),
            ..Default::default()
        };

        let err = client.update_playlist("summer", &playlist).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::InvalidExceptionDate { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = client
            .update_playlist("../etc", &Playlist::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::InvalidPlaylistName { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/playlist/summer"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        client.playlists().delete("summer").await.unwrap();

        let err = client.playlists().delete("default").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::DefaultPlaylistProtected)
        ));
    }
}

// =============================================================================
// File Browser Tests
// =============================================================================

mod files {
    use super::*;

    #[tokio::test]
    async fn test_listing_is_sorted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/file"))
            .and(query_param("folders_only", "false"))
            .and(query_param("requested_path", "music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": [
                    { "name": "b", "path": "music/b", "is_file": false },
                    { "name": "a", "path": "music/a", "is_file": true },
                    { "name": "c", "path": "music/c", "is_file": false }
                ]
            })))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let entries = client.files().list("music", false).await.unwrap();
        let listing: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.is_file))
            .collect();
        assert_eq!(listing, [("b", false), ("c", false), ("a", true)]);
    }

    #[tokio::test]
    async fn test_listing_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/file"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let err = client.files().list("", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert!(client.list_files("", true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_listing_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/file"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        assert!(matches!(
            client.list_files("", false).await,
            Err(ClientError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_expand_loads_children_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/file"))
            .and(query_param("requested_path", "music"))
            .and(query_param("folders_only", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": [
                    { "name": "rock", "path": "music/rock", "is_file": false },
                    { "name": "jazz", "path": "music/jazz", "is_file": false }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);

        let mut node = CollapsableFolderEntry::from(
            master_core::FolderEntry::folder("music").with_path("music"),
        );

        assert!(client.files().expand(&mut node, true).await.unwrap());
        let children: Vec<_> = node
            .nested
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.entry.name.as_str())
            .collect();
        assert_eq!(children, ["jazz", "rock"]);

        // Closing and reopening does not fetch again
        assert!(!client.files().expand(&mut node, true).await.unwrap());
        assert!(client.files().expand(&mut node, true).await.unwrap());
    }
}
