//! HTTP service for Stockpile.
//!
//! Exposes the item routes over a [`HashStore`](stockpile_store::HashStore):
//! batch creation and replacement from JSON, lookup and deletion by the
//! opaque item id, and a listing of every stored item. Each route is wrapped
//! in request tracing.

pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use response::Envelope;
pub use router::{build_router, Route, RouteTable};
pub use server::StockpileServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use stockpile_item::Item;
    use stockpile_types::FieldMap;
    use tower::util::ServiceExt;

    fn app(state: AppState) -> Router {
        build_router(RouteTable::items(), state, &ServerConfig::default())
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Rejections raised by axum itself carry plain-text bodies.
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    const BATCH: &str = r#"[{"name":"abc2","desc":"test","qty":100},{"name":"abc","desc":"test","qty":100}]"#;

    #[tokio::test]
    async fn pong_endpoint() {
        let (status, body) = send(app(AppState::in_memory()), "GET", "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(app(AppState::in_memory()), "GET", "/healthz", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (status, _) = send(app(AppState::in_memory()), "GET", "/nope", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_creates_items() {
        let state = AppState::in_memory();
        let (status, body) = send(app(state.clone()), "POST", "/items", BATCH).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["count"], 2);

        let ids = body["data"].as_array().unwrap();
        assert_ne!(ids[0], ids[1]);
        assert_eq!(state.store().keys().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn post_rejects_existing_item() {
        let state = AppState::in_memory();
        let (status, _) = send(app(state.clone()), "POST", "/items", BATCH).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app(state.clone()), "POST", "/items", BATCH).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn post_rejects_repeated_name() {
        let state = AppState::in_memory();
        let batch = r#"[{"name":"abc","desc":"one","qty":1},{"name":"abc","desc":"two","qty":2}]"#;
        let (status, body) = send(app(state.clone()), "POST", "/items", batch).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("abc"));
        assert!(state.store().keys().unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_conflict_writes_nothing() {
        let state = AppState::in_memory();
        send(app(state.clone()), "POST", "/items", r#"[{"name":"abc","desc":"old","qty":1}]"#).await;

        let batch = r#"[{"name":"new","desc":"","qty":1},{"name":"abc","desc":"new","qty":2}]"#;
        let (status, _) = send(app(state.clone()), "POST", "/items", batch).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(state.store().keys().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_posts_create_once() {
        let state = AppState::in_memory();
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let router = app(state.clone());
                tokio::spawn(async move { send(router, "POST", "/items", BATCH).await.0 })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                StatusCode::CREATED => created += 1,
                other => assert_eq!(other, StatusCode::CONFLICT),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn put_repeated_name_keeps_last() {
        let state = AppState::in_memory();
        let batch = r#"[{"name":"abc","desc":"one","qty":1},{"name":"abc","desc":"two","qty":2}]"#;
        let (status, body) = send(app(state.clone()), "PUT", "/items", batch).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"][1].as_str().unwrap().to_string();

        let (_, body) = send(app(state), "GET", &format!("/items/{id}"), "").await;
        assert_eq!(body["data"][0]["desc"], "two");
    }

    #[tokio::test]
    async fn long_name_is_stored_within_timeout() {
        let config = ServerConfig {
            max_body_bytes: 2 * 1024 * 1024,
            request_timeout_secs: 5,
            ..ServerConfig::default()
        };
        let state = AppState::in_memory();
        let router = build_router(RouteTable::items(), state.clone(), &config);
        let name = "a".repeat(512 * 1024);
        let batch = format!(r#"[{{"name":"{name}","desc":"","qty":1}}]"#);

        let (status, body) = send(router, "POST", "/items", &batch).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = stockpile_types::ItemId::parse(body["data"][0].as_str().unwrap()).unwrap();
        assert_eq!(id.decode().unwrap(), name);
    }

    #[tokio::test]
    async fn put_overwrites_items() {
        let state = AppState::in_memory();
        send(app(state.clone()), "POST", "/items", BATCH).await;

        let update = r#"[{"name":"abc","desc":"updated","qty":7}]"#;
        let (status, body) = send(app(state.clone()), "PUT", "/items", update).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"][0].as_str().unwrap().to_string();

        let (status, body) = send(app(state), "GET", &format!("/items/{id}"), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["desc"], "updated");
        assert_eq!(body["data"][0]["qty"], 7);
    }

    #[tokio::test]
    async fn invalid_batches_are_422() {
        for js in [r#"[{}]"#, r#"{"#, r#"{}"#, r#"[{"unknown": "key"}]"#, r#"[{"name":"","desc":"","qty":1}]"#] {
            let state = AppState::in_memory();
            let (status, _) = send(app(state.clone()), "POST", "/items", js).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{js}");
            assert!(state.store().keys().unwrap().is_empty(), "{js}");
        }
    }

    #[tokio::test]
    async fn get_item_roundtrip() {
        let state = AppState::in_memory();
        let batch = r#"[{"name":"😍","desc":"lovely smily","qty":999}]"#;
        let (_, body) = send(app(state.clone()), "POST", "/items", batch).await;
        let id = body["data"][0].as_str().unwrap().to_string();

        let (status, body) = send(app(state), "GET", &format!("/items/{id}"), "").await;
        assert_eq!(status, StatusCode::OK);
        let item = &body["data"][0];
        assert_eq!(item["id"], id.as_str());
        assert_eq!(item["name"], "😍");
        assert_eq!(item["qty"], 999);
    }

    #[tokio::test]
    async fn get_missing_item_is_404() {
        let (status, _) = send(app(AppState::in_memory()), "GET", "/items/abc123", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_id_is_404() {
        let (status, _) = send(app(AppState::in_memory()), "GET", "/items/not-an-id", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_all_items_lists_everything() {
        let state = AppState::in_memory();
        send(app(state.clone()), "POST", "/items", BATCH).await;
        let (status, body) = send(app(state), "GET", "/items", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        let mut names: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["abc", "abc2"]);
    }

    #[tokio::test]
    async fn get_all_items_empty_store() {
        let (status, body) = send(app(AppState::in_memory()), "GET", "/items", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn delete_item() {
        let state = AppState::in_memory();
        let item = Item::new("orange", "a juicy fruit", 100).unwrap();
        let (key, fields) = item.to_fields().unwrap();
        state.store().set(key.as_str(), &fields).unwrap();

        let uri = format!("/items/{key}");
        let (status, _) = send(app(state.clone()), "DELETE", &uri, "").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(app(state.clone()), "DELETE", &uri, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.store().get(key.as_str()).unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_is_500() {
        let state = AppState::in_memory();
        let mut fields = FieldMap::new();
        fields.insert("name".into(), "orange".into());
        state.store().set("abc", &fields).unwrap();

        let (status, _) = send(app(state), "GET", "/items/abc", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let router = build_router(RouteTable::items(), AppState::in_memory(), &config);
        let (status, _) = send(router, "POST", "/items", BATCH).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let (status, _) = send(app(AppState::in_memory()), "DELETE", "/items", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
