//! Route table and middleware.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::ApiState;

/// Build the application router.
///
/// Cross-origin requests are allowed from any origin.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/populate", post(handlers::populate))
        .route("/nodes", get(handlers::nodes))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::{FETCH_FAILED, HealthResponse, POPULATED};
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;
    use treeline_hierarchy::TreeNode;
    use treeline_store::{MemoryStore, Operation, SeedRecord, SeedSet};

    fn app(store: &MemoryStore) -> Router {
        let state = ApiState::new(Arc::new(store.clone()), SeedSet::builtin().unwrap());
        router(state)
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_populate_then_nodes() {
        let store = MemoryStore::new();

        let (status, body) = send(app(&store), Method::POST, "/populate").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, POPULATED.as_bytes());

        let (status, body) = send(app(&store), Method::GET, "/nodes").await;
        assert_eq!(status, StatusCode::OK);

        let forest: Vec<TreeNode> = serde_json::from_slice(&body).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "A");
        assert_eq!(forest[0].child_names(), vec!["B", "C", "D"]);
        assert_eq!(forest[0].children[0].child_names(), vec!["B-1", "B-2", "B-3"]);
    }

    #[tokio::test]
    async fn test_nodes_json_shape() {
        let store = MemoryStore::new();
        send(app(&store), Method::POST, "/populate").await;

        let (_, body) = send(app(&store), Method::GET, "/nodes").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let c = &json[0]["children"][1];
        assert_eq!(c["name"], "C");
        assert_eq!(c["description"], "This is a description of C");
        assert_eq!(c["children"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_populate_twice_same_forest() {
        let store = MemoryStore::new();
        send(app(&store), Method::POST, "/populate").await;
        let (_, first) = send(app(&store), Method::GET, "/nodes").await;
        send(app(&store), Method::POST, "/populate").await;
        let (_, second) = send(app(&store), Method::GET, "/nodes").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_nodes_empty_store() {
        let store = MemoryStore::new();
        let (status, body) = send(app(&store), Method::GET, "/nodes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_nodes_store_failure() {
        let store = MemoryStore::new();
        store.fail_on(Operation::Snapshot).await;

        let (status, body) = send(app(&store), Method::GET, "/nodes").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, FETCH_FAILED.as_bytes());
    }

    #[tokio::test]
    async fn test_populate_store_failure_surfaces_message() {
        let store = MemoryStore::new();
        store.fail_on(Operation::Link).await;

        let (status, body) = send(app(&store), Method::POST, "/populate").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(String::from_utf8(body).unwrap(), "injected failure: link");
        // "A" and "B" were written; the A -> B link failed.
        assert_eq!(store.node_count().await, 2);
    }

    #[tokio::test]
    async fn test_populate_invalid_seed() {
        let store = MemoryStore::new();
        let seed = SeedSet::new(vec![SeedRecord::root("A", ""), SeedRecord::root("A", "")]);
        let app = router(ApiState::new(Arc::new(store.clone()), seed));

        let (status, body) = send(app, Method::POST, "/populate").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(String::from_utf8(body).unwrap().contains("duplicate node name 'A'"));
        assert_eq!(store.node_count().await, 0);
    }

    #[tokio::test]
    async fn test_populate_empty_dataset_rejected() {
        let store = MemoryStore::new();
        send(app(&store), Method::POST, "/populate").await;
        let app = router(ApiState::new(Arc::new(store.clone()), SeedSet::default()));

        let (status, body) = send(app, Method::POST, "/populate").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(String::from_utf8(body).unwrap().contains("dataset has no records"));
        assert_eq!(store.node_count().await, 7);
    }

    #[tokio::test]
    async fn test_populate_rejects_get() {
        let store = MemoryStore::new();
        let (status, _) = send(app(&store), Method::GET, "/populate").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health() {
        let store = MemoryStore::new();
        let (status, body) = send(app(&store), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");

        store.fail_on(Operation::Ping).await;
        let (status, body) = send(app(&store), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "unhealthy");
        assert!(health.store.contains("injected failure: ping"));
    }

    #[tokio::test]
    async fn test_cors_any_origin() {
        let store = MemoryStore::new();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/nodes")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(&store).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
