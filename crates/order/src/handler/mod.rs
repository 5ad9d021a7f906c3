mod order;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        order::get_orders,
        order::get_order,
        order::create_order,
        order::update_order,
        order::delete_order,
    ),
    tags(
        (name = "Order", description = "Order endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(order_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{di::OrderStore, repository::order::InMemoryOrderRepository};
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = AppState::new(OrderStore::Memory(InMemoryOrderRepository::new()))
            .await
            .unwrap();
        AppRouter::build(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn widget() -> Value {
        json!({
            "product_name": "Widget",
            "customer": "Alice",
            "quantity": 3,
            "price": 9.99,
            "delivery_address": "1 Main St",
            "status": "CREATED"
        })
    }

    #[tokio::test]
    async fn create_then_list_over_http() {
        let app = app().await;

        let (status, created) = send(&app, Method::POST, "/api/orders", Some(widget())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["id"], 1);

        let (status, listed) = send(&app, Method::GET, "/api/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["data"][0]["product_name"], "Widget");
    }

    #[tokio::test]
    async fn invalid_body_is_rejected_with_field_details() {
        let app = app().await;
        let mut body = widget();
        body["price"] = json!(0);

        let (status, error) = send(&app, Method::POST, "/api/orders", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["details"]["price"][0], "Price must be greater than 0");

        let (_, listed) = send(&app, Method::GET, "/api/orders", None).await;
        assert_eq!(listed["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn update_and_delete_missing_orders_are_404() {
        let app = app().await;

        let (status, _) = send(&app, Method::PUT, "/api/orders/9", Some(widget())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/api/orders/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_the_service_envelope() {
        let app = app().await;
        send(&app, Method::POST, "/api/orders", Some(widget())).await;

        let (status, body) = send(&app, Method::DELETE, "/api/orders/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Order deleted successfully");
        assert!(body["data"].is_null());

        let (status, _) = send(&app, Method::GET, "/api/orders/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_invalid_edits() {
        let app = app().await;
        send(&app, Method::POST, "/api/orders", Some(widget())).await;

        let mut body = widget();
        body["status"] = json!("LOST");
        let (status, error) = send(&app, Method::PUT, "/api/orders/1", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["details"]["status"].is_array());

        let (_, order) = send(&app, Method::GET, "/api/orders/1", None).await;
        assert_eq!(order["data"]["status"], "CREATED");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_service_counters() {
        let app = app().await;
        send(&app, Method::GET, "/api/orders", None).await;

        let request = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("order_query_service_request_counter"));
    }
}
