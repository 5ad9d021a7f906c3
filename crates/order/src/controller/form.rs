use crate::{
    abstract_trait::order::service::DynOrderCommandService,
    controller::notification::Notification,
    domain::{
        requests::order::{CreateOrderRequest, OrderForm},
        response::order::OrderResponse,
    },
};
use shared::errors::FieldViolations;
use tracing::{error, info, warn};

pub const SUBMITTED_MESSAGE: &str = "Order submitted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent to the store.
    Invalid(FieldViolations),
    Created(OrderResponse),
    /// The store rejected the create; carries its message.
    Failed(String),
}

/// Drives the create-order form: validation, submission and the result notification.
pub struct OrderFormController {
    command: DynOrderCommandService,
    form: OrderForm,
    errors: FieldViolations,
    notification: Option<Notification>,
}

impl OrderFormController {
    pub fn new(command: DynOrderCommandService) -> Self {
        Self {
            command,
            form: OrderForm::default(),
            errors: FieldViolations::default(),
            notification: None,
        }
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OrderForm {
        &mut self.form
    }

    pub fn field_errors(&self) -> &FieldViolations {
        &self.errors
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn state(&self) -> FormState {
        if self.notification.is_some() {
            FormState::Submitted
        } else {
            FormState::Editing
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn reset(&mut self) {
        self.form = OrderForm::default();
        self.errors = FieldViolations::default();
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let fields = match self.form.validate_order() {
            Ok(fields) => fields,
            Err(violations) => {
                warn!("📝 Order form rejected: {violations}");
                self.errors = violations.clone();
                return SubmitOutcome::Invalid(violations);
            }
        };

        self.errors = FieldViolations::default();

        let request = CreateOrderRequest::submitted_now(fields);

        match self.command.create_order(&request).await {
            Ok(response) => {
                info!("📦 Order {} submitted", response.data.id);
                self.reset();
                self.notification = Some(Notification::success(SUBMITTED_MESSAGE));
                SubmitOutcome::Created(response.data)
            }
            Err(e) => {
                let message = e.user_message();
                error!("❌ Insert error: {message}");
                self.notification = Some(Notification::error(&message));
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::order::{
            repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
            service::OrderCommandServiceTrait,
        },
        controller::notification::Severity,
        domain::{
            requests::order::{PRICE_MESSAGE, UpdateOrderRequest},
            response::api::ApiResponse,
        },
        model::Order as OrderModel,
        repository::order::InMemoryOrderRepository,
        service::order::OrderCommandService,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use prometheus_client::registry::Registry;
    use shared::errors::{RepositoryError, ServiceError};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    struct RejectingRepository;

    #[async_trait]
    impl OrderCommandRepositoryTrait for RejectingRepository {
        async fn create_order(
            &self,
            _req: &CreateOrderRequest,
        ) -> Result<OrderModel, RepositoryError> {
            Err(RepositoryError::Custom(
                "new row for relation \"orders\" violates check constraint".into(),
            ))
        }

        async fn update_order(
            &self,
            _req: &UpdateOrderRequest,
        ) -> Result<OrderModel, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn delete_order(&self, _id: i32) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    /// Counts create calls so tests can assert the store was never reached.
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrderCommandServiceTrait for CountingService {
        async fn create_order(
            &self,
            _req: &CreateOrderRequest,
        ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Internal("unexpected".into()))
        }

        async fn update_order(
            &self,
            _req: &UpdateOrderRequest,
        ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
            Err(ServiceError::Internal("unexpected".into()))
        }

        async fn delete_order(&self, _id: i32) -> Result<ApiResponse<()>, ServiceError> {
            Err(ServiceError::Internal("unexpected".into()))
        }
    }

    fn fill(form: &mut OrderForm) {
        form.product_name = "Widget".into();
        form.customer = "Alice".into();
        form.quantity = 3.0;
        form.price = 9.99;
        form.delivery_address = "1 Main St".into();
        form.status = "CREATED".into();
    }

    fn controller_over(repo: Arc<InMemoryOrderRepository>) -> OrderFormController {
        let mut registry = Registry::default();
        OrderFormController::new(Arc::new(OrderCommandService::new(repo, &mut registry)))
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_store() {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
        });
        let mut controller = OrderFormController::new(service.clone());

        let outcome = controller.submit().await;

        let SubmitOutcome::Invalid(violations) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(violations.messages_for("price"), vec![PRICE_MESSAGE]);
        assert!(controller.field_errors().has_field("product_name"));
        assert!(controller.notification().is_none());
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_submit_resets_and_notifies() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let mut controller = controller_over(repo.clone());
        fill(controller.form_mut());

        let before = Utc::now();
        let outcome = controller.submit().await;

        let SubmitOutcome::Created(order) = outcome else {
            panic!("expected the order to be created");
        };
        assert_eq!(order.product_name, "Widget");
        assert_eq!(controller.form(), &OrderForm::default());
        assert!(controller.field_errors().is_empty());
        assert_eq!(controller.state(), FormState::Submitted);

        let notification = controller.notification().unwrap();
        assert_eq!(notification.severity, Severity::Success);
        assert_eq!(notification.message, SUBMITTED_MESSAGE);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].created_at >= before);

        controller.dismiss_notification();
        assert_eq!(controller.state(), FormState::Editing);
    }

    #[tokio::test]
    async fn backend_failure_keeps_input_and_shows_message() {
        let mut registry = Registry::default();
        let service = OrderCommandService::new(Arc::new(RejectingRepository), &mut registry);
        let mut controller = OrderFormController::new(Arc::new(service));
        fill(controller.form_mut());
        let entered = controller.form().clone();

        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(
                "new row for relation \"orders\" violates check constraint".into()
            )
        );
        assert_eq!(controller.form(), &entered);

        let notification = controller.notification().unwrap();
        assert!(notification.is_error());
        assert_eq!(
            notification.message,
            "Error: new row for relation \"orders\" violates check constraint"
        );
    }

    #[tokio::test]
    async fn fixing_errors_clears_them_on_next_submit() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let mut controller = controller_over(repo);

        controller.submit().await;
        assert!(!controller.field_errors().is_empty());

        fill(controller.form_mut());
        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(controller.field_errors().is_empty());
    }
}
