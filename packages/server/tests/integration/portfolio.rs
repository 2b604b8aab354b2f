use serde_json::json;

use crate::common::{TestApp, routes};

mod ownership {
    use super::*;

    #[tokio::test]
    async fn creator_defaults_to_the_caller() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;
        let alice = app.user_id(&member).await;

        let res = app.create_portfolio_item(&member, json!({})).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["createdBy"], alice);
        assert_eq!(res.body["type"], "PHOTO");
        assert!(res.body["thumbnailUrl"].is_null());
    }

    #[tokio::test]
    async fn members_cannot_attribute_work_to_others() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let root = app.user_id(&admin).await;
        let alice = app.user_id(&member).await;

        let res = app
            .create_portfolio_item(&member, json!({"createdBy": root}))
            .await;
        assert_eq!(res.status, 403);

        let on_behalf = app
            .create_portfolio_item(&admin, json!({"createdBy": alice}))
            .await;
        assert_eq!(on_behalf.status, 201);
        assert_eq!(on_behalf.body["createdBy"], alice);
    }

    #[tokio::test]
    async fn unknown_creator_is_a_field_error() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;

        let res = app
            .create_portfolio_item(&admin, json!({"createdBy": 9999}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "createdBy");
    }

    #[tokio::test]
    async fn only_the_creator_or_an_admin_can_edit() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let id = app
            .create_portfolio_item(
                &alice,
                json!({"thumbnailUrl": "https://cdn.example.com/monsoon-thumb.jpg"}),
            )
            .await
            .id();

        let read = app.get_with_token(&routes::portfolio_item(id), &bob).await;
        assert_eq!(read.status, 200);

        let edit = app
            .patch_with_token(&routes::portfolio_item(id), &json!({"title": "Mine"}), &bob)
            .await;
        assert_eq!(edit.status, 403);
        let delete = app.delete_with_token(&routes::portfolio_item(id), &bob).await;
        assert_eq!(delete.status, 403);

        let own = app
            .patch_with_token(
                &routes::portfolio_item(id),
                &json!({"title": "Monsoon Street II", "thumbnailUrl": null}),
                &alice,
            )
            .await;
        assert_eq!(own.status, 200, "{}", own.text);
        assert_eq!(own.body["title"], "Monsoon Street II");
        assert!(own.body["thumbnailUrl"].is_null());

        let by_admin = app
            .patch_with_token(&routes::portfolio_item(id), &json!({"category": "Rain"}), &admin)
            .await;
        assert_eq!(by_admin.status, 200);
        assert_eq!(by_admin.body["category"], "Rain");
    }

    #[tokio::test]
    async fn missing_items_are_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let id = app.create_portfolio_item(&alice, json!({})).await.id();

        let gone = app.delete_with_token(&routes::portfolio_item(id), &alice).await;
        assert_eq!(gone.status, 204);

        let edit = app
            .patch_with_token(&routes::portfolio_item(id), &json!({"title": "Late"}), &alice)
            .await;
        assert_eq!(edit.status, 404);
        assert_eq!(edit.body["code"], "NOT_FOUND");
        let delete = app.delete_with_token(&routes::portfolio_item(id), &alice).await;
        assert_eq!(delete.status, 404);
    }

    #[tokio::test]
    async fn edit_racing_a_delete_never_fails_the_server() {
        let app = TestApp::spawn_file_backed().await;
        let alice = app.create_authenticated_user("alice").await;

        for _ in 0..4 {
            let id = app.create_portfolio_item(&alice, json!({})).await.id();
            let path = routes::portfolio_item(id);
            let body = json!({"title": "Renamed"});

            let (edit, delete) = tokio::join!(
                app.patch_with_token(&path, &body, &alice),
                app.delete_with_token(&path, &alice),
            );

            assert!(matches!(edit.status, 200 | 404), "{}", edit.text);
            assert_eq!(delete.status, 204, "{}", delete.text);
            let after = app.get_with_token(&path, &alice).await;
            assert_eq!(after.status, 404);
        }
    }

    #[tokio::test]
    async fn only_admins_reassign_the_creator() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_authenticated_user("alice").await;
        let root = app.user_id(&admin).await;
        let id = app.create_portfolio_item(&alice, json!({})).await.id();

        let res = app
            .patch_with_token(&routes::portfolio_item(id), &json!({"createdBy": root}), &alice)
            .await;
        assert_eq!(res.status, 403);

        let res = app
            .patch_with_token(&routes::portfolio_item(id), &json!({"createdBy": root}), &admin)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["createdBy"], root);
    }

    #[tokio::test]
    async fn items_outlive_their_creator() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_authenticated_user("alice").await;
        let alice_id = app.user_id(&alice).await;
        let id = app.create_portfolio_item(&alice, json!({})).await.id();

        let res = app.delete_with_token(&routes::user(alice_id), &admin).await;
        assert_eq!(res.status, 204);

        let item = app.get_with_token(&routes::portfolio_item(id), &admin).await;
        assert_eq!(item.status, 200);
        assert!(item.body["createdBy"].is_null());
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn filters_by_type_and_creator() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_authenticated_user("alice").await;
        let alice_id = app.user_id(&alice).await;
        app.create_portfolio_item(&alice, json!({})).await;
        app.create_portfolio_item(
            &admin,
            json!({
                "type": "VIDEO",
                "mediaUrl": "https://www.youtube.com/embed/abc123",
            }),
        )
        .await;

        let videos = app
            .get_with_token(&format!("{}?type=VIDEO", routes::PORTFOLIO_ITEMS), &alice)
            .await;
        assert_eq!(videos.status, 200);
        let videos = videos.body.as_array().cloned().unwrap_or_default();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0]["type"], "VIDEO");

        let mine = app
            .get_with_token(
                &format!("{}?created_by={alice_id}", routes::PORTFOLIO_ITEMS),
                &alice,
            )
            .await;
        assert_eq!(mine.body.as_array().map(Vec::len), Some(1));

        let all = app.get_with_token(routes::PORTFOLIO_ITEMS, &alice).await;
        assert_eq!(all.body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_type_filter_is_rejected() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .get_with_token(&format!("{}?type=GIF", routes::PORTFOLIO_ITEMS), &member)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod video_data {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use pixellens_server::config::VideoConfig;
    use pixellens_server::video::{
        VideoLookupError, VideoMetadata, VideoMetadataProvider, YouTubeClient,
    };
    use serde_json::Value;

    use super::*;

    struct Canned;

    #[async_trait]
    impl VideoMetadataProvider for Canned {
        async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, VideoLookupError> {
            Ok(VideoMetadata {
                title: format!("Golden hour {video_id}"),
                description: "Behind the scenes.".into(),
                thumbnail: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".into(),
            })
        }
    }

    struct Broken;

    #[async_trait]
    impl VideoMetadataProvider for Broken {
        async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, VideoLookupError> {
            Err(VideoLookupError::NotFound(video_id.into()))
        }
    }

    /// Serve `router` on a random local port and return its base URL.
    async fn serve_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn youtube_client(base_url: String) -> Arc<dyn VideoMetadataProvider> {
        let config = VideoConfig {
            api_base_url: base_url,
            timeout_secs: 5,
            ..Default::default()
        };
        Arc::new(YouTubeClient::new(&config, "test-key").expect("client should build"))
    }

    #[tokio::test]
    async fn falls_back_without_an_api_key() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .post_with_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"url": "https://www.youtube.com/watch?v=abc123&t=42s"}),
                &member,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "YouTube Video");
        assert_eq!(res.body["video_id"], "abc123");
        assert_eq!(
            res.body["thumbnail"],
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
        assert_eq!(res.body["embed_url"], "https://www.youtube.com/embed/abc123");
        assert!(res.body["notice"].is_string());
    }

    #[tokio::test]
    async fn accepts_the_legacy_field_name() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .post_with_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"youtube_url": "https://youtu.be/abc123"}),
                &member,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["video_id"], "abc123");
    }

    #[tokio::test]
    async fn rejects_unusable_links() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        for body in [
            json!({"url": "https://vimeo.com/123456"}),
            json!({"url": "   "}),
            json!({}),
        ] {
            let res = app
                .post_with_token(routes::FETCH_VIDEO_DATA, &body, &member)
                .await;
            assert_eq!(res.status, 400, "{body}");
            assert_eq!(res.body["field"], "url");
        }
    }

    #[tokio::test]
    async fn requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"url": "https://youtu.be/abc123"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn uses_live_metadata_when_available() {
        let app = TestApp::spawn_with_video(Some(Arc::new(Canned))).await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .post_with_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"url": "https://www.youtube.com/shorts/abc123"}),
                &member,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Golden hour abc123");
        assert_eq!(res.body["embed_url"], "https://www.youtube.com/embed/abc123");
        assert!(res.body.get("notice").is_none());
    }

    #[tokio::test]
    async fn failed_lookups_degrade_to_the_fallback() {
        let app = TestApp::spawn_with_video(Some(Arc::new(Broken))).await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .post_with_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"url": "https://youtu.be/abc123"}),
                &member,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "YouTube Video");
        assert!(res.body["notice"].is_string());
    }

    #[tokio::test]
    async fn youtube_client_reads_the_snippet() {
        let stub = Router::new().route(
            "/videos",
            get(|Query(params): Query<std::collections::HashMap<String, String>>| async move {
                assert_eq!(params.get("part").map(String::as_str), Some("snippet"));
                assert_eq!(params.get("key").map(String::as_str), Some("test-key"));
                let id = params.get("id").cloned().unwrap_or_default();
                Json(json!({
                    "items": [{
                        "snippet": {
                            "title": format!("Live {id}"),
                            "description": "Streamed from the stub.",
                            "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/x/hq.jpg"}},
                        }
                    }]
                }))
            }),
        );
        let provider = youtube_client(serve_stub(stub).await).await;
        let app = TestApp::spawn_with_video(Some(provider)).await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .post_with_token(
                routes::FETCH_VIDEO_DATA,
                &json!({"url": "https://www.youtube.com/watch?v=abc123"}),
                &member,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Live abc123");
        assert_eq!(res.body["description"], "Streamed from the stub.");
        assert_eq!(res.body["thumbnail"], "https://i.ytimg.com/vi/x/hq.jpg");
        assert!(res.body.get("notice").is_none());
    }

    #[tokio::test]
    async fn youtube_client_errors_fall_back() {
        let stub = Router::new()
            .route(
                "/videos",
                get(|| async { Json::<Value>(json!({"items": []})) }),
            );
        let empty = youtube_client(serve_stub(stub).await).await;

        let failing = Router::new().route(
            "/videos",
            get(|| async { (StatusCode::FORBIDDEN, "quota exceeded") }),
        );
        let forbidden = youtube_client(serve_stub(failing).await).await;

        for provider in [empty, forbidden] {
            let app = TestApp::spawn_with_video(Some(provider)).await;
            let member = app.create_authenticated_user("alice").await;

            let res = app
                .post_with_token(
                    routes::FETCH_VIDEO_DATA,
                    &json!({"url": "https://youtu.be/abc123"}),
                    &member,
                )
                .await;

            assert_eq!(res.status, 200);
            assert_eq!(res.body["title"], "YouTube Video");
            assert_eq!(res.body["video_id"], "abc123");
        }
    }
}
