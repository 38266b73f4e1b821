//! Router assembly: routes, shared state, CORS, tracing and body limits.

use super::handlers::{contact_stats, list_contacts, submit_contact};
use super::response::ResponseComposer;
use crate::ports::{AdminAuthorizer, ContactIntakePort};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, HeaderValue, Method,
        header::{
            AUTHORIZATION, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS,
        },
    },
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Largest accepted request body. Oversized bodies fail JSON extraction and are
/// answered as validation failures.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Hardening headers added to every response unless a handler already set them.
pub const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "SAMEORIGIN"),
    (REFERRER_POLICY, "no-referrer"),
    (X_DNS_PREFETCH_CONTROL, "off"),
    (
        HeaderName::from_static("cross-origin-resource-policy"),
        "same-origin",
    ),
];

/// State shared by all handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<dyn ContactIntakePort>,
    pub auth: Arc<dyn AdminAuthorizer>,
    pub composer: ResponseComposer,
}

impl AppState {
    pub fn new(
        intake: Arc<dyn ContactIntakePort>,
        auth: Arc<dyn AdminAuthorizer>,
        composer: ResponseComposer,
    ) -> Self {
        Self {
            intake,
            auth,
            composer,
        }
    }
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let mut router = Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/stats", get(contact_stats))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS restricted to `origins`. Entries that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticTokenAuthorizer;
    use crate::adapters::persistence::MemoryStore;
    use crate::domain::{
        ConnectionState, ContactSubmission, StatusCounts, StoreError, SubmissionDraft,
    };
    use crate::ports::SubmissionStore;
    use crate::usecases::{ContactService, DEFAULT_LIST_CAP, DEFAULT_STORE_BOUND, StoreGateway};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    const TOKEN: &str = "admin-token";

    /// Store that is connected but fails every call with a backend error.
    struct BrokenStore;

    #[async_trait::async_trait]
    impl SubmissionStore for BrokenStore {
        fn connection_state(&self) -> ConnectionState {
            ConnectionState::Connected
        }

        async fn insert(&self, _draft: &SubmissionDraft) -> Result<ContactSubmission, StoreError> {
            Err(StoreError::Backend("disk I/O error".into()))
        }

        async fn list_recent(&self, _limit: u32) -> Result<Vec<ContactSubmission>, StoreError> {
            Err(StoreError::Backend("disk I/O error".into()))
        }

        async fn count_by_status(&self) -> Result<StatusCounts, StoreError> {
            Err(StoreError::Backend("disk I/O error".into()))
        }
    }

    fn app_with(store: Arc<dyn SubmissionStore>, dev_mode: bool) -> Router {
        let gateway = StoreGateway::new(store, DEFAULT_STORE_BOUND);
        let state = AppState::new(
            Arc::new(ContactService::new(gateway, DEFAULT_LIST_CAP)),
            Arc::new(StaticTokenAuthorizer::new(Some(TOKEN.to_string()))),
            ResponseComposer::new(dev_mode),
        );
        build_router(state, cors_layer(&["http://localhost:3000".to_string()]))
    }

    fn post_contact(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn admin_get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(t) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {t}"));
        }
        req.body(Body::empty()).unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ann() -> Value {
        json!({"name": "Ann", "email": "a@b.com", "subject": "Hi", "message": "Hello there"})
    }

    #[tokio::test]
    async fn test_valid_submission_is_created() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(app_with(store.clone(), false), post_contact(ann().to_string())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "Ann");
        assert!(!body["data"]["id"].as_str().unwrap().is_empty());
        assert!(body["data"]["createdAt"].is_string());
        assert!(body["data"].get("message").is_none());
        assert!(body["data"].get("status").is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_name_is_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let payload = json!({"name": "", "email": "a@b.com", "subject": "Hi", "message": "Hi"});
        let (status, body) = send(app_with(store.clone(), false), post_contact(payload.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "All fields are required");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app_with(Arc::new(MemoryStore::new()), false);
        let (status, body) = send(app, post_contact("{\"name\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let app = app_with(Arc::new(MemoryStore::new()), false);
        let req = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .body(Body::from(ann().to_string()))
            .unwrap();
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_disconnected_store_is_service_unavailable() {
        let store = Arc::new(MemoryStore::new());
        store.set_state(ConnectionState::Disconnected);
        let (status, body) = send(app_with(store.clone(), false), post_contact(ann().to_string())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Database connection issue");
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_is_gateway_timeout() {
        let store = Arc::new(MemoryStore::with_latency(Duration::from_secs(30)));
        let (status, body) = send(app_with(store, false), post_contact(ann().to_string())).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "Operation timeout");
    }

    #[tokio::test]
    async fn test_store_schema_rejection_lists_errors() {
        let payload = json!({"name": "Ann", "email": "not-an-email", "subject": "Hi", "message": "Hello"});
        let (status, body) = send(
            app_with(Arc::new(MemoryStore::new()), false),
            post_contact(payload.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"], json!(["Please enter a valid email address"]));
    }

    #[tokio::test]
    async fn test_store_fault_hides_detail_in_production() {
        let (status, body) = send(app_with(Arc::new(BrokenStore), false), post_contact(ann().to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let (_, body) = send(app_with(Arc::new(BrokenStore), true), post_contact(ann().to_string())).await;
        assert_eq!(body["error"], "disk I/O error");
    }

    #[tokio::test]
    async fn test_responses_carry_security_headers() {
        let app = app_with(Arc::new(MemoryStore::new()), false);
        for req in [post_contact(ann().to_string()), post_contact("{")] {
            let resp = app.clone().oneshot(req).await.unwrap();
            let headers = resp.headers();
            assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
            assert_eq!(headers[X_FRAME_OPTIONS], "SAMEORIGIN");
            assert_eq!(headers[REFERRER_POLICY], "no-referrer");
            assert_eq!(headers["cross-origin-resource-policy"], "same-origin");
        }
    }

    #[tokio::test]
    async fn test_admin_reads_require_token() {
        let store: Arc<dyn SubmissionStore> = Arc::new(MemoryStore::new());
        for uri in ["/api/contacts", "/api/contacts/stats"] {
            let (status, body) = send(app_with(store.clone(), false), admin_get(uri, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["success"], false);

            let (status, _) = send(app_with(store.clone(), false), admin_get(uri, Some("wrong"))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_list_and_stats() {
        let store: Arc<dyn SubmissionStore> = Arc::new(MemoryStore::new());
        for subject in ["first", "second"] {
            let mut payload = ann();
            payload["subject"] = json!(subject);
            let (status, _) = send(app_with(store.clone(), false), post_contact(payload.to_string())).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(app_with(store.clone(), false), admin_get("/api/contacts", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["subject"], "second");
        assert_eq!(body["data"][0]["status"], "unread");

        let (status, body) = send(app_with(store, false), admin_get("/api/contacts/stats", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"total": 2, "unread": 2, "read": 0, "replied": 0}));
    }
}
