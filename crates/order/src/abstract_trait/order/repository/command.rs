use crate::{
    domain::requests::order::{CreateOrderRequest, UpdateOrderRequest},
    model::Order as OrderModel,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts a new row; the store assigns the id.
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError>;
    /// Overwrites every editable field; `NotFound` if no row has `req.id`.
    async fn update_order(&self, req: &UpdateOrderRequest) -> Result<OrderModel, RepositoryError>;
    /// Removes the row permanently; `NotFound` if it does not exist.
    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError>;
}
