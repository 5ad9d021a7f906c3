use crate::model::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::errors::FieldViolations;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

pub const PRICE_MESSAGE: &str = "Price must be greater than 0";
pub const QUANTITY_MESSAGE: &str = "Quantity must be a positive whole number";
pub const STATUS_MESSAGE: &str =
    "Status must be one of CREATED, PROCESSING, SHIPPED, DELIVERED, CANCELED";

/// Untyped order candidate as entered by a user, before it passes the validation gate.
///
/// `quantity` and `price` are kept as floats so that non-integer quantities can be
/// represented and rejected rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderForm {
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub product_name: String,

    #[validate(length(min = 1, message = "Customer must not be empty"))]
    pub customer: String,

    pub quantity: f64,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,

    #[validate(length(min = 1, message = "Delivery address must not be empty"))]
    pub delivery_address: String,

    #[schema(example = "CREATED")]
    pub status: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            customer: String::new(),
            quantity: 1.0,
            price: 0.0,
            delivery_address: String::new(),
            status: OrderStatus::Created.to_string(),
        }
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn is_positive_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= i32::MAX as f64
}

impl OrderForm {
    /// Runs every field rule and returns the typed field set, or all violations at once.
    pub fn validate_order(&self) -> Result<OrderFields, FieldViolations> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !is_positive_whole(self.quantity) {
            errors.add("quantity", violation("whole_number", QUANTITY_MESSAGE));
        }

        // NaN and +inf slip through the range rule.
        if !self.price.is_finite() && !errors.errors().contains_key("price") {
            errors.add("price", violation("range", PRICE_MESSAGE));
        }

        let status = self.status.parse::<OrderStatus>();
        if status.is_err() {
            errors.add("status", violation("status", STATUS_MESSAGE));
        }

        match status {
            Ok(status) if errors.errors().is_empty() => Ok(OrderFields {
                product_name: self.product_name.clone(),
                customer: self.customer.clone(),
                quantity: self.quantity as i32,
                price: self.price,
                delivery_address: self.delivery_address.clone(),
                status,
            }),
            _ => Err(FieldViolations::from(errors)),
        }
    }
}

/// The editable fields of an order after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFields {
    pub product_name: String,
    pub customer: String,
    pub quantity: i32,
    pub price: f64,
    pub delivery_address: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRequest {
    pub fields: OrderFields,
    pub created_at: DateTime<Utc>,
}

impl CreateOrderRequest {
    /// Stamps the request with the submission time.
    pub fn submitted_now(fields: OrderFields) -> Self {
        Self {
            fields,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrderRequest {
    pub id: i32,
    pub fields: OrderFields,
}
