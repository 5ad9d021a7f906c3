use crate::{
    abstract_trait::order::{
        repository::DynOrderCommandRepository, service::OrderCommandServiceTrait,
    },
    domain::{
        requests::order::{CreateOrderRequest, UpdateOrderRequest},
        response::{api::ApiResponse, order::OrderResponse},
    },
};
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};

use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "OrderCommandService");

        Self { command, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-command-service")
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
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
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
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🏗️ Creating new order product={} customer={}",
            req.fields.product_name, req.fields.customer
        );

        let method = Method::Post;
        let tracing_ctx = self.start_tracing(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("order.customer", req.fields.customer.clone()),
            ],
        );

        match self.command.create_order(req).await {
            Ok(order) => {
                self.complete_tracing(&tracing_ctx, method, true, "Order created");
                Ok(ApiResponse::success(
                    "Order created successfully",
                    OrderResponse::from(order),
                ))
            }
            Err(e) => {
                self.complete_tracing(&tracing_ctx, method, false, &e.to_string());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_order(
        &self,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("✏️ Updating order ID={}", req.id);

        let method = Method::Put;
        let tracing_ctx = self.start_tracing(
            "update_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "update"),
                KeyValue::new("order.id", req.id.to_string()),
                KeyValue::new("order.status", req.fields.status.to_string()),
            ],
        );

        match self.command.update_order(req).await {
            Ok(order) => {
                self.complete_tracing(&tracing_ctx, method, true, "Order updated");
                Ok(ApiResponse::success(
                    "Order updated successfully",
                    OrderResponse::from(order),
                ))
            }
            Err(e) => {
                self.complete_tracing(&tracing_ctx, method, false, &e.to_string());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_order(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting order ID={id}");

        let method = Method::Delete;
        let tracing_ctx = self.start_tracing(
            "delete_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.command.delete_order(id).await {
            Ok(()) => {
                self.complete_tracing(&tracing_ctx, method, true, "Order deleted");
                Ok(ApiResponse::success("Order deleted successfully", ()))
            }
            Err(e) => {
                self.complete_tracing(&tracing_ctx, method, false, &e.to_string());
                Err(ServiceError::Repo(e))
            }
        }
    }
}
