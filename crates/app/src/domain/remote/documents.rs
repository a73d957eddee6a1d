//! Document store

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::remote::errors::RemoteStoreError;

/// Untyped documents held in memory, keyed by collection and document id.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<FxHashMap<(String, String), Value>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every document in a collection, with its id.
    pub async fn collection(&self, collection: &str) -> Vec<(String, Value)> {
        self.documents
            .read()
            .await
            .iter()
            .filter(|((name, _), _)| name == collection)
            .map(|((_, id), document)| (id.clone(), document.clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, RemoteStoreError> {
        Ok(self
            .documents
            .read()
            .await
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), RemoteStoreError> {
        self.documents
            .write()
            .await
            .insert((collection.to_string(), id.to_string()), document);

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` when it does not exist.
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, RemoteStoreError>;

    /// Create or replace a document.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), RemoteStoreError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn set_then_get() -> TestResult {
        let store = MemoryDocumentStore::new();

        store
            .set_document("carts", "amna", json!({ "items": [] }))
            .await?;

        assert_eq!(
            store.get_document("carts", "amna").await?,
            Some(json!({ "items": [] }))
        );
        assert_eq!(store.get_document("wishlists", "amna").await?, None);
        assert_eq!(store.collection("carts").await.len(), 1);

        Ok(())
    }
}
