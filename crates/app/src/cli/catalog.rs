use boutique::{
    attributes::SelectedAttributes,
    catalog::{ProductFilter, ProductListing, SortOrder, filter_and_sort},
    pricing::format_currency,
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use super::parse_attribute;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products
    List(ListArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Lowest price, inclusive
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest price, inclusive
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Required attribute value, e.g. `Size=M`
    #[arg(long = "attr", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Only products in stock
    #[arg(long)]
    in_stock: bool,

    /// Only marked-down products
    #[arg(long)]
    on_sale: bool,

    /// Name search
    #[arg(long)]
    search: Option<String>,

    /// Sort order (featured, price-asc, price-desc, newest, name)
    #[arg(long, default_value = "featured")]
    sort: SortOrder,
}

pub(crate) fn run(command: CatalogCommand, listings: &[ProductListing]) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::List(args) => {
            list(args, listings);

            Ok(())
        }
    }
}

fn list(args: ListArgs, listings: &[ProductListing]) {
    let filter = ProductFilter {
        category: args.category,
        min_price: args.min_price,
        max_price: args.max_price,
        attributes: args.attributes.into_iter().collect::<SelectedAttributes>(),
        in_stock_only: args.in_stock,
        on_sale_only: args.on_sale,
        search: args.search,
    };

    let matched = filter_and_sort(listings, &filter, args.sort);

    for listing in &matched {
        let sale = if listing.on_sale() { " (sale)" } else { "" };
        let stock = if listing.in_stock() { "" } else { " [sold out]" };

        println!(
            "{:<16} {:<32} {:>14}{sale}{stock}",
            listing.id,
            listing.name,
            format_currency(listing.price)
        );
    }

    println!("{} of {} products", matched.len(), listings.len());
}
