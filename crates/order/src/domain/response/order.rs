use crate::{domain::requests::order::OrderForm, model::Order as OrderModel};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    pub product_name: String,
    pub customer: String,
    pub quantity: i32,
    pub price: f64,
    pub delivery_address: String,
    #[schema(example = "CREATED")]
    pub status: String,
    pub created_at: String,
}

// model to response
impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            product_name: value.product_name,
            customer: value.customer,
            quantity: value.quantity,
            price: value.price,
            delivery_address: value.delivery_address,
            status: value.status,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

// response to editable form
impl From<&OrderResponse> for OrderForm {
    fn from(value: &OrderResponse) -> Self {
        OrderForm {
            product_name: value.product_name.clone(),
            customer: value.customer.clone(),
            quantity: f64::from(value.quantity),
            price: value.price,
            delivery_address: value.delivery_address.clone(),
            status: value.status.clone(),
        }
    }
}
