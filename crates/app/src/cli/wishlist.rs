use boutique::products::ProductId;
use boutique_app::context::AppContext;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show the wishlist
    Show,

    /// Add a product
    Add { product: String },

    /// Remove a product
    Remove { product: String },

    /// Add a product, or remove it when already present
    Toggle { product: String },
}

pub(crate) async fn run(command: WishlistCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        WishlistSubcommand::Show => {}
        WishlistSubcommand::Add { product } => {
            context
                .wishlists
                .add_item(ProductId::from(product))
                .await
                .map_err(|error| format!("failed to add to wishlist: {error}"))?;
        }
        WishlistSubcommand::Remove { product } => {
            context.wishlists.remove_item(&ProductId::from(product)).await;
        }
        WishlistSubcommand::Toggle { product } => {
            let toggled = context
                .wishlists
                .toggle(ProductId::from(product.as_str()))
                .await
                .map_err(|error| format!("failed to toggle wishlist: {error}"))?;

            let verb = if toggled.wishlisted { "added" } else { "removed" };
            println!("{verb} {product}");
        }
    }

    let items = context.wishlists.items().await;

    if items.is_empty() {
        println!("wishlist is empty");
    }

    for item in &items {
        println!("{:<16} {}", item.product_id(), item.product().name);
    }

    Ok(())
}
