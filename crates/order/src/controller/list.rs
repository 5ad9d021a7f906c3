use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    controller::notification::Notification,
    domain::{
        requests::order::{OrderForm, UpdateOrderRequest},
        response::order::OrderResponse,
    },
};
use shared::errors::{FieldViolations, ServiceError};
use tracing::{error, info, warn};

/// Editable value copy of one listed order. Changes stay here until saved.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub id: i32,
    pub created_at: String,
    pub form: OrderForm,
}

impl From<&OrderResponse> for OrderDraft {
    fn from(order: &OrderResponse) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at.clone(),
            form: OrderForm::from(order),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(OrderResponse),
    /// The draft failed validation and stays open.
    Invalid(FieldViolations),
    /// The store rejected the update; the draft stays open.
    Failed(String),
    NoDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(i32),
    Failed(String),
    /// No delete was awaiting confirmation.
    NotRequested,
}

/// Holds the listed orders plus the edit and delete-confirmation flows over them.
pub struct OrderListController {
    query: DynOrderQueryService,
    command: DynOrderCommandService,
    orders: Vec<OrderResponse>,
    loading: bool,
    draft: Option<OrderDraft>,
    draft_errors: FieldViolations,
    pending_delete: Option<i32>,
    notification: Option<Notification>,
}

impl OrderListController {
    pub fn new(query: DynOrderQueryService, command: DynOrderCommandService) -> Self {
        Self {
            query,
            command,
            orders: Vec::new(),
            loading: false,
            draft: None,
            draft_errors: FieldViolations::default(),
            pending_delete: None,
            notification: None,
        }
    }

    /// Builds the controller and performs the initial fetch.
    pub async fn mount(query: DynOrderQueryService, command: DynOrderCommandService) -> Self {
        let mut controller = Self::new(query, command);
        // A failed first fetch is reported through the notification.
        let _ = controller.refresh().await;
        controller
    }

    pub fn orders(&self) -> &[OrderResponse] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Replaces the held collection with a fresh listing. On failure the old list is kept.
    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        self.loading = true;
        let result = self.query.find_all().await;
        self.loading = false;

        match result {
            Ok(response) => {
                info!("📋 Loaded {} orders", response.data.len());
                self.orders = response.data;
                Ok(())
            }
            Err(e) => {
                error!("❌ Error fetching orders: {e}");
                self.notification = Some(Notification::error(&e.user_message()));
                Err(e)
            }
        }
    }

    pub fn draft(&self) -> Option<&OrderDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut OrderDraft> {
        self.draft.as_mut()
    }

    pub fn draft_errors(&self) -> &FieldViolations {
        &self.draft_errors
    }

    /// Opens a draft copied from the listed order. Returns false if `id` is not listed.
    pub fn begin_edit(&mut self, id: i32) -> bool {
        match self.orders.iter().find(|o| o.id == id) {
            Some(order) => {
                self.draft = Some(OrderDraft::from(order));
                self.draft_errors = FieldViolations::default();
                true
            }
            None => {
                warn!("✏️ Order {id} is not in the current list");
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
        self.draft_errors = FieldViolations::default();
    }

    pub async fn save_edit(&mut self) -> SaveOutcome {
        let Some(draft) = self.draft.as_ref() else {
            return SaveOutcome::NoDraft;
        };

        let fields = match draft.form.validate_order() {
            Ok(fields) => fields,
            Err(violations) => {
                warn!("📝 Edit of order {} rejected: {violations}", draft.id);
                self.draft_errors = violations.clone();
                return SaveOutcome::Invalid(violations);
            }
        };

        let request = UpdateOrderRequest {
            id: draft.id,
            fields,
        };

        match self.command.update_order(&request).await {
            Ok(response) => {
                let _ = self.refresh().await;
                self.cancel_edit();
                SaveOutcome::Saved(response.data)
            }
            Err(e) => {
                let message = e.user_message();
                error!("❌ Update failed: {message}");
                self.draft_errors = FieldViolations::default();
                self.notification = Some(Notification::error(&message));
                SaveOutcome::Failed(message)
            }
        }
    }

    /// First step of a delete; nothing is removed until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: i32) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NotRequested;
        };

        match self.command.delete_order(id).await {
            Ok(_) => {
                let _ = self.refresh().await;
                DeleteOutcome::Deleted(id)
            }
            Err(e) => {
                let message = e.user_message();
                error!("❌ Delete failed: {message}");
                self.notification = Some(Notification::error(&message));
                DeleteOutcome::Failed(message)
            }
        }
    }
}
