//! In-process order table with the same contract as the Postgres repositories.

use crate::{
    abstract_trait::order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::order::{CreateOrderRequest, UpdateOrderRequest},
    model::Order as OrderModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info};

#[derive(Debug)]
struct OrderTable {
    next_id: i32,
    rows: BTreeMap<i32, OrderModel>,
}

/// Ids start at 1 and are never reused, matching a `SERIAL` column.
#[derive(Debug, Clone)]
pub struct InMemoryOrderRepository {
    table: Arc<RwLock<OrderTable>>,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(OrderTable {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderRepository {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Custom("order id sequence exhausted".into()))?;

        let fields = &req.fields;
        let order = OrderModel {
            id,
            product_name: fields.product_name.clone(),
            customer: fields.customer.clone(),
            quantity: fields.quantity,
            price: fields.price,
            delivery_address: fields.delivery_address.clone(),
            status: fields.status.to_string(),
            created_at: req.created_at,
        };

        table.rows.insert(id, order.clone());

        info!("✅ Created order ID {} for customer {}", id, order.customer);
        Ok(order)
    }

    async fn update_order(&self, req: &UpdateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let mut table = self.table.write().await;

        let Some(row) = table.rows.get_mut(&req.id) else {
            error!("❌ Order ID {} not found for update", req.id);
            return Err(RepositoryError::NotFound);
        };

        let fields = &req.fields;
        row.product_name = fields.product_name.clone();
        row.customer = fields.customer.clone();
        row.quantity = fields.quantity;
        row.price = fields.price;
        row.delivery_address = fields.delivery_address.clone();
        row.status = fields.status.to_string();

        info!("🔄 Updated order ID {} (status={})", row.id, row.status);
        Ok(row.clone())
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting order: {}", id);

        match self.table.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => {
                error!("❌ Order ID {} not found for delete", id);
                Err(RepositoryError::NotFound)
            }
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        let table = self.table.read().await;

        let mut orders: Vec<OrderModel> = table.rows.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::requests::order::OrderFields, model::OrderStatus};
    use chrono::{Duration, Utc};

    fn fields(product: &str) -> OrderFields {
        OrderFields {
            product_name: product.into(),
            customer: "Alice".into(),
            quantity: 3,
            price: 9.99,
            delivery_address: "1 Main St".into(),
            status: OrderStatus::Created,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = InMemoryOrderRepository::new();

        let first = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("Widget")))
            .await
            .unwrap();
        let second = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("Gadget")))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.status, "CREATED");
    }

    #[tokio::test]
    async fn find_all_is_newest_first() {
        let repo = InMemoryOrderRepository::new();
        let now = Utc::now();

        for (name, age) in [("old", 10), ("newest", 0), ("middle", 5)] {
            repo.create_order(&CreateOrderRequest {
                fields: fields(name),
                created_at: now - Duration::minutes(age),
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.product_name)
            .collect();

        assert_eq!(names, vec!["newest", "middle", "old"]);
    }

    #[tokio::test]
    async fn equal_timestamps_fall_back_to_id_descending() {
        let repo = InMemoryOrderRepository::new();
        let now = Utc::now();

        for name in ["a", "b"] {
            repo.create_order(&CreateOrderRequest {
                fields: fields(name),
                created_at: now,
            })
            .await
            .unwrap();
        }

        let ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let repo = InMemoryOrderRepository::new();

        let err = repo
            .update_order(&UpdateOrderRequest {
                id: 42,
                fields: fields("Widget"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let repo = InMemoryOrderRepository::new();
        let created = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("Widget")))
            .await
            .unwrap();

        let mut changed = fields("Widget");
        changed.status = OrderStatus::Shipped;

        let updated = repo
            .update_order(&UpdateOrderRequest {
                id: created.id,
                fields: changed,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.status, "SHIPPED");
    }

    #[tokio::test]
    async fn second_delete_fails_and_leaves_other_rows() {
        let repo = InMemoryOrderRepository::new();
        let keep = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("keep")))
            .await
            .unwrap();
        let gone = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("gone")))
            .await
            .unwrap();

        repo.delete_order(gone.id).await.unwrap();
        let err = repo.delete_order(gone.id).await.unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_id(keep.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryOrderRepository::new();
        let first = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("one")))
            .await
            .unwrap();
        repo.delete_order(first.id).await.unwrap();

        let next = repo
            .create_order(&CreateOrderRequest::submitted_now(fields("two")))
            .await
            .unwrap();

        assert_ne!(next.id, first.id);
    }
}
