use std::{path::Path, sync::Arc};

use boutique::catalog::ProductListing;
use boutique_app::{
    config::SessionConfig,
    context::{AppContext, Collaborators},
    domain::{
        catalog::MemoryCatalog, images::PublicImageHost, remote::MemoryDocumentStore,
    },
};
use clap::{Parser, Subcommand};

mod cart;
mod catalog;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "boutique", about = "Boutique storefront session", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: SessionConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let listings = load_listings(self.config.catalog_path.as_deref()).await?;

        match self.command {
            Commands::Catalog(command) => catalog::run(command, &listings),
            Commands::Cart(command) => {
                let context = session(&self.config, &listings);
                let _session = context.start().await;

                cart::run(command, &context).await
            }
            Commands::Wishlist(command) => {
                let context = session(&self.config, &listings);
                let _session = context.start().await;

                wishlist::run(command, &context).await
            }
        }
    }
}

fn session(config: &SessionConfig, listings: &[ProductListing]) -> AppContext {
    AppContext::new(
        config,
        Collaborators {
            catalog: Arc::new(MemoryCatalog::from_listings(listings)),
            documents: Arc::new(MemoryDocumentStore::new()),
            images: Arc::new(PublicImageHost::new(config.image_base_url.as_str())),
        },
    )
}

async fn load_listings(path: Option<&Path>) -> Result<Vec<ProductListing>, String> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| format!("failed to read catalog {}: {error}", path.display()))?;

    serde_json::from_slice(&bytes)
        .map_err(|error| format!("failed to parse catalog {}: {error}", path.display()))
}

/// Parses a `name=value` attribute choice.
fn parse_attribute(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, choice)) if !name.trim().is_empty() && !choice.trim().is_empty() => {
            Ok((name.trim().to_string(), choice.trim().to_string()))
        }
        _ => Err(format!("expected name=value, got {value:?}")),
    }
}
