use crate::{
    abstract_trait::order::{
        repository::{DynOrderCommandRepository, DynOrderQueryRepository},
        service::{DynOrderCommandService, DynOrderQueryService},
    },
    repository::order::{InMemoryOrderRepository, OrderCommandRepository, OrderQueryRepository},
    service::order::{OrderCommandService, OrderQueryService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

/// The backing table every repository handle points at.
#[derive(Clone)]
pub enum OrderStore {
    Postgres(ConnectionPool),
    Memory(InMemoryOrderRepository),
}

impl OrderStore {
    fn repositories(self) -> (DynOrderQueryRepository, DynOrderCommandRepository) {
        match self {
            Self::Postgres(pool) => (
                Arc::new(OrderQueryRepository::new(pool.clone())),
                Arc::new(OrderCommandRepository::new(pool)),
            ),
            Self::Memory(table) => (Arc::new(table.clone()), Arc::new(table)),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(store: OrderStore, registry: &mut Registry) -> Self {
        let (query_repo, command_repo) = store.repositories();

        let order_query: DynOrderQueryService =
            Arc::new(OrderQueryService::new(query_repo, registry));
        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(command_repo, registry));

        Self {
            order_query,
            order_command,
        }
    }
}
