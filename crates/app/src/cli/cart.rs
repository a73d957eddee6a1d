use boutique::{
    attributes::SelectedAttributes,
    pricing::{format_currency, to_decimal},
    products::ProductId,
};
use boutique_app::{context::AppContext, domain::sync::SyncStatus};
use clap::{Args, Subcommand};

use super::parse_attribute;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        /// Product id
        product: String,

        /// Number of units
        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Attribute choice, e.g. `Size=M`
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },

    /// Change the quantity of a line
    Update {
        /// Line position, as shown by `cart show`
        index: usize,

        /// New number of units
        quantity: u32,
    },

    /// Remove a line
    Remove {
        /// Line position, as shown by `cart show`
        index: usize,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run(command: CartCommand, context: &AppContext) -> Result<(), String> {
    let status = match command.command {
        CartSubcommand::Show => return show(context).await,
        CartSubcommand::Add {
            product,
            quantity,
            attributes,
        } => context
            .carts
            .add_item(
                ProductId::from(product),
                quantity,
                attributes.into_iter().collect::<SelectedAttributes>(),
            )
            .await
            .map_err(|error| format!("failed to add to cart: {error}"))?,
        CartSubcommand::Update { index, quantity } => context
            .carts
            .update_quantity(index, quantity)
            .await
            .map_err(|error| format!("failed to update cart: {error}"))?,
        CartSubcommand::Remove { index } => context.carts.remove_item(index).await,
        CartSubcommand::Clear => context.carts.clear_cart().await,
    };

    if status == SyncStatus::Unchanged {
        println!("cart unchanged");
    }

    show(context).await
}

async fn show(context: &AppContext) -> Result<(), String> {
    let cart = context.carts.cart().await;

    if cart.is_empty() {
        println!("cart is empty");

        return Ok(());
    }

    for (index, item) in cart.iter().enumerate() {
        let attributes = item.attributes_selected();
        let line_total = item.line_total().map_or_else(|| "-".to_string(), format_currency);

        if attributes.is_empty() {
            println!("{index}. {} x{} {line_total}", item.product().name, item.quantity());
        } else {
            println!(
                "{index}. {} ({attributes}) x{} {line_total}",
                item.product().name,
                item.quantity()
            );
        }
    }

    let subtotal = cart
        .subtotal()
        .map_err(|error| format!("failed to total cart: {error}"))?;

    println!("subtotal: {}", format_currency(to_decimal(&subtotal)));

    Ok(())
}
