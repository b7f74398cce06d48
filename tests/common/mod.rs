#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use tower::ServiceExt;

use authgate::router::init_router;
use authgate::state::AppState;
use authgate_auth::JwtKeys;
use authgate_config::{CorsConfig, JwtConfig, PasswordConfig};
use authgate_db::{MemoryUserStore, UserStore};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
        issuer: "authgate".to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub jwt_keys: JwtKeys,
}

/// Builds the full router over the given store with a fast bcrypt cost.
pub fn setup_app_with_store(users: Arc<dyn UserStore>) -> TestApp {
    build_app(users, None)
}

pub fn setup_app_with_metrics(handle: PrometheusHandle) -> TestApp {
    build_app(Arc::new(MemoryUserStore::new()), Some(handle))
}

fn build_app(users: Arc<dyn UserStore>, metrics: Option<PrometheusHandle>) -> TestApp {
    let jwt_keys = JwtKeys::new(&test_jwt_config()).unwrap();
    let state = AppState::new(
        users,
        jwt_keys.clone(),
        PasswordConfig { bcrypt_cost: 4 },
        CorsConfig::from_origins("http://localhost:3000"),
    );

    TestApp {
        router: init_router(state, metrics),
        jwt_keys,
    }
}

pub fn setup_test_app() -> (TestApp, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    (setup_app_with_store(store.clone()), store)
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        read_json(self.send(request).await).await
    }

    pub async fn get_protected(&self, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri("/api/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        read_json(self.send(builder.body(Body::empty()).unwrap()).await).await
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/register",
            serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn login(&self, identifier: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/login",
            serde_json::json!({ "usernameOrEmail": identifier, "password": password }),
        )
        .await
    }
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}
