//! Hub route table.

use crate::HubCore;
use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use super::{HubConfig, HubMode, api, middleware};

pub fn build_router(core: Arc<HubCore>, config: &HubConfig) -> Router {
    let open = Router::new()
        .route("/explore", get(api::explore::explore))
        .route("/auth", post(api::auth::validate_key))
        .route("/items", get(api::items::user_items))
        .route("/{item_type}/{id}/pull", get(api::items::pull));

    let mut gated = Router::new()
        .route("/{item_type}/create", post(api::items::create))
        .route("/{item_type}/{id}/update", post(api::items::update))
        .route("/{item_type}/{id}", delete(api::items::remove))
        .route(
            "/{item_type}/{id}/vote",
            get(api::votes::user_vote).post(api::votes::cast),
        );

    if config.mode == HubMode::Remote {
        let connection_key = config.connection_key.clone();
        gated = gated.layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let connection_key = connection_key.clone();
                async move {
                    middleware::auth::require_connection_key(req, next, connection_key).await
                }
            },
        ));
    }

    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", open.merge(gated))
        .layer(middleware::cors::build_cors_layer())
        .layer(Extension(core))
        .layer(Extension(config.clone()))
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tempfile::tempdir;
    use tower::ServiceExt;

    const TEST_KEY: &str = "hub-key-123";

    fn test_config(mode: HubMode) -> HubConfig {
        HubConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mode,
            connection_key: Some(TEST_KEY.to_string()),
            key_holder: Some("Test User".to_string()),
        }
    }

    fn test_router(mode: HubMode) -> (Router, Arc<HubCore>, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let core = Arc::new(HubCore::new(db_path.to_str().unwrap()).unwrap());
        let router = build_router(core.clone(), &test_config(mode));
        (router, core, temp_dir)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_explore_groups_and_envelope() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, body) = send(router, get("/v1/explore")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].is_null());
        for key in ["systemprompts", "slashcommands", "agentskills", "agentflows"] {
            assert_eq!(body[key]["hasMore"], false);
            assert!(body[key]["items"].is_array());
        }
        // Seeded catalog is visible with zeroed aggregates.
        assert_eq!(body["slashcommands"]["totalCount"], 5);
        assert_eq!(body["slashcommands"]["items"][0]["rating"], 0);
    }

    #[tokio::test]
    async fn test_pull_miss_is_404_without_item_key() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, body) = send(router, get("/v1/slash-command/ghost/pull")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Item not found");
        assert_eq!(body["success"], false);
        assert!(body.get("item").is_none());
    }

    #[tokio::test]
    async fn test_pull_includes_import_id() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, body) = send(router, get("/v1/slash-command/summarize/pull")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["item"]["importId"],
            "prompthub-item:slash-command:summarize"
        );
        assert!(body["url"].is_null());
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_create_with_bogus_type_is_400_and_store_unchanged() {
        let (router, core, _temp_dir) = test_router(HubMode::Local);

        let before: usize = ItemType::ALL
            .iter()
            .map(|t| core.items.list(*t).unwrap().len())
            .sum();

        let (status, body) = send(
            router,
            post_json("/v1/bogus-type/create", json!({"name": "X"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid item type");

        let after: usize = ItemType::ALL
            .iter()
            .map(|t| core.items.list(*t).unwrap().len())
            .sum();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_slash_command_lifecycle_with_vote_toggle() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, body) = send(
            router.clone(),
            post_json(
                "/v1/slash-command/create",
                json!({
                    "name": "Resumir",
                    "command": "/resumir",
                    "prompt": "Summarize...",
                    "visibility": "public"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["item"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["item"]["rating"], 0);
        assert_eq!(body["item"]["ratingCount"], 0);

        let vote_uri = format!("/v1/slash-command/{id}/vote");
        let (status, body) = send(router.clone(), post_json(&vote_uri, json!({"vote": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 1);
        assert_eq!(body["ratingCount"], 1);
        assert_eq!(body["userVote"], 1);

        // Same vote again toggles off.
        let (_, body) = send(router.clone(), post_json(&vote_uri, json!({"vote": 1}))).await;
        assert_eq!(body["rating"], 0);
        assert_eq!(body["ratingCount"], 0);
        assert_eq!(body["userVote"], 0);
    }

    #[tokio::test]
    async fn test_vote_on_missing_item_is_404() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, _) = send(
            router,
            post_json("/v1/agent-skill/ghost/vote", json!({"vote": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_404_on_second_delete() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let request = Request::builder()
            .method("DELETE")
            .uri("/v1/slash-command/summarize")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["error"].is_null());

        let request = Request::builder()
            .method("DELETE")
            .uri("/v1/slash-command/summarize")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remote_mode_gates_mutations() {
        let (router, _core, _temp_dir) = test_router(HubMode::Remote);

        let body = json!({"name": "Gated", "prompt": "text"});
        let (status, _) = send(
            router.clone(),
            post_json("/v1/system-prompt/create", body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .method("POST")
            .uri("/v1/system-prompt/create")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {TEST_KEY}"))
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);

        // Reads stay open.
        let (status, _) = send(router, get("/v1/explore")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_route_validates_key() {
        let (router, _core, _temp_dir) = test_router(HubMode::Remote);

        let (status, body) = send(
            router.clone(),
            post_json("/v1/auth", json!({"connectionKey": TEST_KEY})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["user"]["name"], "Test User");

        let (_, body) = send(
            router,
            post_json("/v1/auth", json!({"connectionKey": "wrong"})),
        )
        .await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["error"], "Invalid connection key");
    }

    #[tokio::test]
    async fn test_user_items_degrades_without_auth() {
        let (router, _core, _temp_dir) = test_router(HubMode::Remote);

        let (status, body) = send(router, get("/v1/items")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["createdByMe"].as_object().unwrap().is_empty());
        assert!(body["teamItems"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_items_lists_own_publications() {
        let (router, _core, _temp_dir) = test_router(HubMode::Remote);

        let request = Request::builder()
            .method("POST")
            .uri("/v1/system-prompt/create")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {TEST_KEY}"))
            .body(Body::from(
                json!({"name": "Mine", "prompt": "p", "author": "Test User"}).to_string(),
            ))
            .unwrap();
        let (status, _) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/v1/items")
            .header(header::AUTHORIZATION, format!("Bearer {TEST_KEY}"))
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(router, request).await;
        assert_eq!(body["createdByMe"]["systemprompts"]["totalCount"], 1);
        assert_eq!(
            body["createdByMe"]["systemprompts"]["items"][0]["name"],
            "Mine"
        );
    }

    #[tokio::test]
    async fn test_update_merges_and_misses() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, body) = send(
            router.clone(),
            post_json(
                "/v1/slash-command/summarize/update",
                json!({"description": "Shorter summaries"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["description"], "Shorter summaries");
        assert_eq!(body["item"]["command"], "/summarize");

        let (status, _) = send(
            router,
            post_json("/v1/slash-command/ghost/update", json!({"name": "X"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_private_items_hidden_from_anonymous_readers() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);

        let (status, _) = send(
            router.clone(),
            post_json(
                "/v1/system-prompt/create",
                json!({
                    "id": "secret",
                    "name": "Secret",
                    "prompt": "hidden",
                    "visibility": "private"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Anonymous explore omits it; anonymous pull misses.
        let (_, body) = send(router.clone(), get("/v1/explore")).await;
        assert!(
            body["systemprompts"]["items"]
                .as_array()
                .unwrap()
                .iter()
                .all(|item| item["id"] != "secret")
        );
        let (status, _) = send(router.clone(), get("/v1/system-prompt/secret/pull")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The key holder reads it.
        let request = Request::builder()
            .uri("/v1/system-prompt/secret/pull")
            .header(header::AUTHORIZATION, format!("Bearer {TEST_KEY}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["visibility"], "private");
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _core, _temp_dir) = test_router(HubMode::Local);
        let response = router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
