use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{index_routes, system_routes, timestamp_routes};
use crate::store::SharedStore;

/// Build the complete Axum application:
/// - /            (display page: current counter value)
/// - /timestamp   (create + look up records)
/// - /system      (alive + version)
///
/// `store` is the one store handle constructed at startup; every handler
/// receives it through axum state rather than any process-global.
pub fn build_app(store: SharedStore, cfg: AppConfig) -> Router {
    Router::new()
        // /
        .merge(index_routes::routes(store.clone()))

        // /timestamp/*
        .nest("/timestamp", timestamp_routes::routes(store))

        // /system/*
        .nest("/system", system_routes::routes(cfg))

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::errors::StampdError;
    use crate::store::memory::MemoryStore;

    fn test_app() -> Router {
        let store: SharedStore = Arc::new(MemoryStore::new());
        build_app(store, AppConfig::default())
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_timestamp() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/timestamp")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_id_and_timestamp() {
        let app = test_app();

        let res = app.oneshot(post_timestamp()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["id"], 1);
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn create_then_lookup_round_trips() {
        let app = test_app();

        let res = app.clone().oneshot(post_timestamp()).await.unwrap();
        let created = body_json(res).await;

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/timestamp/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["timestamp"], created["timestamp"]);
    }

    #[tokio::test]
    async fn lookup_of_unknown_id_is_null_not_404() {
        let app = test_app();

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/timestamp/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["timestamp"], Value::Null);
    }

    #[tokio::test]
    async fn second_create_gets_the_next_id() {
        let app = test_app();

        let res = app.clone().oneshot(post_timestamp()).await.unwrap();
        assert_eq!(body_json(res).await["id"], 1);

        let res = app.oneshot(post_timestamp()).await.unwrap();
        assert_eq!(body_json(res).await["id"], 2);
    }

    #[tokio::test]
    async fn index_shows_the_counter() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let app = build_app(store, AppConfig::default());

        for _ in 0..3 {
            app.clone().oneshot(post_timestamp()).await.unwrap();
        }

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Timestamps served: 3"));
    }

    #[tokio::test]
    async fn rebuilding_the_app_keeps_the_counter() {
        // Durability belongs to the store; a fresh router over the same
        // store must continue the sequence, never restart it.
        let store: SharedStore = Arc::new(MemoryStore::new());

        let app = build_app(store.clone(), AppConfig::default());
        let res = app.oneshot(post_timestamp()).await.unwrap();
        assert_eq!(body_json(res).await["id"], 1);

        let restarted = build_app(store, AppConfig::default());
        let res = restarted.oneshot(post_timestamp()).await.unwrap();
        assert_eq!(body_json(res).await["id"], 2);
    }

    /// Store double whose every call fails as if the connection dropped.
    struct DownStore;

    fn connection_refused() -> StampdError {
        StampdError::StoreUnavailable(redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    #[async_trait::async_trait]
    impl crate::store::Store for DownStore {
        async fn incr(&self, _key: &str) -> Result<i64, StampdError> {
            Err(connection_refused())
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StampdError> {
            Err(connection_refused())
        }

        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StampdError> {
            Err(connection_refused())
        }
    }

    #[tokio::test]
    async fn store_down_answers_503_with_an_error_body() {
        let store: SharedStore = Arc::new(DownStore);
        let app = build_app(store, AppConfig::default());

        let res = app.clone().oneshot(post_timestamp()).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(res).await;
        assert!(json["error"].is_string());

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/timestamp/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        // The display page reads the counter through the same store.
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn undecodable_record_answers_500() {
        let memory = MemoryStore::new();
        memory.insert_raw(
            &crate::services::timestamp_service::record_key("1"),
            vec![0xff, 0xfe, 0xfd],
        );
        let store: SharedStore = Arc::new(memory);
        let app = build_app(store, AppConfig::default());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/timestamp/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(res).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn system_alive_and_version() {
        let cfg = AppConfig {
            server_version: "9.9.9".to_string(),
            ..AppConfig::default()
        };
        let store: SharedStore = Arc::new(MemoryStore::new());
        let app = build_app(store, cfg);

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/system/alive")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/system/version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["version"], "9.9.9");
    }
}
