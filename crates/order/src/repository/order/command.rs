use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderRequest, UpdateOrderRequest},
    model::Order as OrderModel,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let fields = &req.fields;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders
                (product_name, customer, quantity, price, delivery_address, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_name, customer, quantity, price, delivery_address, status, created_at
            "#,
        )
        .bind(&fields.product_name)
        .bind(&fields.customer)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.delivery_address)
        .bind(fields.status.as_str())
        .bind(req.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for customer {}: {:?}",
                fields.customer, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} for customer {}",
            result.id, result.customer
        );
        Ok(result)
    }

    async fn update_order(&self, req: &UpdateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let fields = &req.fields;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET product_name = $2,
                customer = $3,
                quantity = $4,
                price = $5,
                delivery_address = $6,
                status = $7
            WHERE id = $1
            RETURNING id, product_name, customer, quantity, price, delivery_address, status, created_at
            "#,
        )
        .bind(req.id)
        .bind(&fields.product_name)
        .bind(&fields.customer)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.delivery_address)
        .bind(fields.status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order ID {}: {:?}", req.id, err);
            RepositoryError::from(err)
        })?
        .ok_or_else(|| {
            error!("❌ Order ID {} not found for update", req.id);
            RepositoryError::NotFound
        })?;

        info!("🔄 Updated order ID {} (status={})", result.id, result.status);
        Ok(result)
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting order: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            error!("❌ Order ID {} not found for delete", id);
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
