use axum::{http::HeaderValue, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::JwksCache;
use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::RedisCache;

/// Request bodies are small JSON documents; multi-room requests are the largest
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Shared application state
pub struct AppState {
    pub db: PgPool,
    pub settings: Settings,
    pub jwks_cache: JwksCache,
    pub cache: RedisCache,
}

impl AppState {
    pub fn new(
        db: PgPool,
        settings: Settings,
        jwks_cache: JwksCache,
        cache: RedisCache,
    ) -> Arc<Self> {
        Arc::new(Self {
            db,
            settings,
            jwks_cache,
            cache,
        })
    }
}

/// Build the router with the full middleware stack
pub fn create_app(state: Arc<AppState>) -> Router {
    with_middleware(routes::api_router(), &state.settings).with_state(state)
}

/// Wrap a router in CORS, request IDs, tracing and the body limit
fn with_middleware<S>(router: Router<S>, settings: &Settings) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = build_cors_layer(settings);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    // Applied bottom-up: cors is outermost
    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        Duration::from_secs(86400)
    } else {
        Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .allow_credentials(true)
        .max_age(max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::error::ApiError;
    use crate::middleware::X_REQUEST_ID;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post},
    };
    use tower::ServiceExt;

    fn settings() -> Settings {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "postgres://localhost/roomcraft".to_string(),
            database_max_connections: 1,
            run_migrations: false,
            redis_url: "redis://localhost:6379".to_string(),
            redis_cache_ttl_seconds: 60,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            supabase_jwt_jwks_url: "https://example.supabase.co/auth/v1/.well-known/jwks.json"
                .to_string(),
            supabase_jwt_issuer: "https://example.supabase.co/auth/v1".to_string(),
            supabase_jwt_audience: "authenticated".to_string(),
            jwks_cache_ttl_seconds: 60,
        }
    }

    fn stub_app() -> Router {
        with_middleware(
            Router::new()
                .route("/ping", get(|| async { "pong" }))
                .route(
                    "/missing",
                    get(|| async { Err::<(), _>(ApiError::not_found("ROI calculation not found")) }),
                )
                .route("/echo", post(|body: String| async move { body })),
            &settings(),
        )
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = stub_app()
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn client_request_id_is_echoed() {
        let response = stub_app()
            .oneshot(
                Request::get("/ping")
                    .header(X_REQUEST_ID, "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[X_REQUEST_ID], "req-7");
    }

    #[tokio::test]
    async fn error_responses_carry_a_request_id() {
        let response = stub_app()
            .oneshot(
                Request::get("/missing")
                    .header(X_REQUEST_ID, "req-404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[X_REQUEST_ID], "req-404");
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let body = "x".repeat(MAX_BODY_BYTES + 1);
        let response = stub_app()
            .oneshot(
                Request::post("/echo")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let response = stub_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/ping")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
