//! App Context

use std::sync::Arc;

use tracing::info;

use crate::{
    config::SessionConfig,
    domain::{
        carts::{CartsService, SessionCartsService},
        catalog::CatalogService,
        identity::SessionIdentity,
        images::{CachedImageUrls, ImageHost},
        local::{JsonFileStore, LocalStore, MemoryLocalStore},
        orders::{CheckoutService, DocumentOrdersRepository, OrdersService},
        remote::{DocumentRemoteStore, DocumentStore},
        wishlists::{SessionWishlistsService, WishlistsService},
    },
    session,
    subscription::Subscription,
};

/// Backend collaborators the session is built on.
#[derive(Clone)]
pub struct Collaborators {
    pub catalog: Arc<dyn CatalogService>,
    pub documents: Arc<dyn DocumentStore>,
    pub images: Arc<dyn ImageHost>,
}

#[derive(Clone)]
pub struct AppContext {
    /// Signed-in state, driven by the auth adapter
    pub identity: Arc<SessionIdentity>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub orders: Arc<dyn OrdersService>,
    pub images: Arc<CachedImageUrls>,
}

impl AppContext {
    /// Build the session services.
    ///
    /// Lists are kept on disk under the configured state directory, or in memory without one.
    #[must_use]
    pub fn new(config: &SessionConfig, collaborators: Collaborators) -> Self {
        let identity = Arc::new(SessionIdentity::new());
        let remote = Arc::new(DocumentRemoteStore::new(collaborators.documents.clone()));

        let local: Arc<dyn LocalStore> = match &config.state_dir {
            Some(dir) => Arc::new(JsonFileStore::new(dir)),
            None => Arc::new(MemoryLocalStore::new()),
        };

        let carts: Arc<dyn CartsService> = Arc::new(SessionCartsService::new(
            collaborators.catalog.clone(),
            identity.clone(),
            remote.clone(),
            local.clone(),
        ));
        let wishlists: Arc<dyn WishlistsService> = Arc::new(SessionWishlistsService::new(
            collaborators.catalog.clone(),
            identity.clone(),
            remote,
            local,
        ));
        let orders = Arc::new(CheckoutService::new(
            identity.clone(),
            carts.clone(),
            Arc::new(DocumentOrdersRepository::new(collaborators.documents)),
            config.shipping_fee,
        ));

        Self {
            identity,
            catalog: collaborators.catalog,
            carts,
            wishlists,
            orders,
            images: Arc::new(CachedImageUrls::new(
                collaborators.images,
                config.image_url_ttl(),
            )),
        }
    }

    /// Restore the lists saved on the device and start following sign-in changes.
    pub async fn start(&self) -> Subscription {
        tokio::join!(self.carts.restore(), self.wishlists.restore());

        info!("session restored");

        session::watch_identity(
            self.identity.as_ref(),
            self.carts.clone(),
            self.wishlists.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            catalog::MemoryCatalog, images::PublicImageHost, remote::MemoryDocumentStore,
            sync::SyncStatus,
        },
        test::helpers::{catalog_fixtures, red},
    };

    async fn collaborators() -> Collaborators {
        let catalog = Arc::new(MemoryCatalog::new());

        for (id, snapshot) in catalog_fixtures() {
            catalog.put_product(id.into(), snapshot).await;
        }

        Collaborators {
            catalog,
            documents: Arc::new(MemoryDocumentStore::new()),
            images: Arc::new(PublicImageHost::new("https://cdn.example.com")),
        }
    }

    fn config(args: &[&str]) -> Result<SessionConfig, clap::Error> {
        SessionConfig::try_parse_from(std::iter::once("boutique").chain(args.iter().copied()))
    }

    #[tokio::test]
    async fn saved_lists_survive_a_restart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let state_dir = dir.path().to_string_lossy().into_owned();
        let config = config(&["--state-dir", &state_dir])?;
        let collaborators = collaborators().await;

        let first = AppContext::new(&config, collaborators.clone());
        let _first_session = first.start().await;
        first.carts.add_item("abaya".into(), 1, red()).await?;
        first.wishlists.add_item("hijab".into()).await?;

        let second = AppContext::new(&config, collaborators);
        let _second_session = second.start().await;

        assert_eq!(second.carts.items().await, first.carts.items().await);
        assert!(second.wishlists.contains(&"hijab".into()).await);

        Ok(())
    }

    #[tokio::test]
    async fn sign_in_reconciles_through_the_context() -> TestResult {
        let context = AppContext::new(&config(&[])?, collaborators().await);
        let _session = context.start().await;

        assert_eq!(
            context.carts.add_item("hijab".into(), 1, red()).await?,
            SyncStatus::LocalOnly
        );

        context.identity.sign_in("amna".into());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!context.carts.has_unsynced_changes().await);

        Ok(())
    }

    #[tokio::test]
    async fn image_urls_use_configured_host() -> TestResult {
        let context = AppContext::new(&config(&[])?, collaborators().await);

        assert_eq!(
            context.images.resolve("products/abaya.jpg").await?,
            "https://cdn.example.com/products/abaya.jpg"
        );

        Ok(())
    }
}
