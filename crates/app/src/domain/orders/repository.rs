//! Orders Repository

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::domain::{
    orders::{
        models::Order,
        records::{ORDERS_COLLECTION, OrderRecord},
    },
    remote::{DocumentStore, RemoteStoreError},
};

/// Orders repository writing one document per order.
#[derive(Clone)]
pub struct DocumentOrdersRepository {
    documents: Arc<dyn DocumentStore>,
}

impl DocumentOrdersRepository {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl OrdersRepository for DocumentOrdersRepository {
    async fn submit_order(&self, order: &Order) -> Result<(), RemoteStoreError> {
        let id = order.uuid.to_string();
        let document = serde_json::to_value(OrderRecord::from(order))?;

        self.documents
            .set_document(ORDERS_COLLECTION, &id, document)
            .await?;

        debug!(order = %id, "submitted order");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Store a placed order.
    async fn submit_order(&self, order: &Order) -> Result<(), RemoteStoreError>;
}
