use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::response::{api::ApiResponse, order::OrderResponse},
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "OrderQueryService");

        Self { query, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", if is_success { "SUCCESS" } else { "ERROR" }),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("🔍 Listing all orders");

        let method = Method::Get;
        let tracing_ctx = self.start_tracing(
            "find_all_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let orders = match self.query.find_all().await {
            Ok(orders) => orders,
            Err(e) => {
                self.complete_tracing(&tracing_ctx, method, false, &e.to_string());
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();

        self.complete_tracing(
            &tracing_ctx,
            method,
            true,
            &format!("Fetched {} orders", data.len()),
        );

        Ok(ApiResponse::success("Orders retrieved successfully", data))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🆔 Finding order ID={id}");

        let method = Method::Get;
        let tracing_ctx = self.start_tracing(
            "find_order_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(order)) => {
                self.complete_tracing(&tracing_ctx, method, true, "Order found");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, method, false, "Order not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                self.complete_tracing(&tracing_ctx, method, false, &e.to_string());
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::order::repository::OrderCommandRepositoryTrait,
        domain::requests::order::{CreateOrderRequest, OrderFields},
        model::OrderStatus,
        repository::order::InMemoryOrderRepository,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn find_by_id_reports_missing_orders() {
        let mut registry = Registry::default();
        let service = OrderQueryService::new(Arc::new(InMemoryOrderRepository::new()), &mut registry);

        let err = service.find_by_id(99).await.unwrap_err();

        assert!(matches!(err, ServiceError::Repo(RepositoryError::NotFound)));
        assert_eq!(service.metrics().count(Method::Get, StatusUtils::Error), 1);
    }

    #[tokio::test]
    async fn find_all_maps_rows_to_responses() {
        let repo = InMemoryOrderRepository::new();
        repo.create_order(&CreateOrderRequest::submitted_now(OrderFields {
            product_name: "Widget".into(),
            customer: "Alice".into(),
            quantity: 3,
            price: 9.99,
            delivery_address: "1 Main St".into(),
            status: OrderStatus::Processing,
        }))
        .await
        .unwrap();

        let mut registry = Registry::default();
        let service = OrderQueryService::new(Arc::new(repo), &mut registry);

        let response = service.find_all().await.unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].status, "PROCESSING");
        assert!(response.data[0].created_at.ends_with('Z'));
    }
}
