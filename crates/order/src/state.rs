use crate::di::{DependenciesInject, OrderStore};
use anyhow::Result;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub async fn new(store: OrderStore) -> Result<Self> {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(store, &mut registry);

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
        })
    }
}
