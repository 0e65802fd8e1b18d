use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shopfront::tiers::PricingTier;
use shopfront_app::domain::products::{
    PgProductsService, ProductsService,
    models::{NewProduct, ProductUuid},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
    Restock(RestockProductArgs),
    Quote(QuoteProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// Stock keeping unit, unique across the catalogue
    #[arg(long)]
    sku: Option<String>,

    /// Price per unit before any tier applies
    #[arg(long)]
    price: Decimal,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Volume tier as MIN_QUANTITY:UNIT_PRICE, repeatable
    #[arg(long = "tier", value_parser = parse_tier)]
    tiers: Vec<PricingTier>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct RestockProductArgs {
    #[arg(long)]
    product: ProductUuid,

    /// Units to add
    #[arg(long)]
    amount: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct QuoteProductArgs {
    #[arg(long)]
    product: ProductUuid,

    #[arg(long)]
    quantity: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

fn parse_tier(value: &str) -> Result<PricingTier, String> {
    let (minimum_quantity, unit_price) = value
        .split_once(':')
        .ok_or_else(|| format!("expected MIN_QUANTITY:UNIT_PRICE, got `{value}`"))?;

    let minimum_quantity = minimum_quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid minimum quantity `{minimum_quantity}`: {error}"))?;

    let unit_price = unit_price
        .trim()
        .parse::<Decimal>()
        .map_err(|error| format!("invalid unit price `{unit_price}`: {error}"))?;

    Ok(PricingTier::new(minimum_quantity, unit_price))
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create_product(args).await,
        ProductSubcommand::Restock(args) => restock_product(args).await,
        ProductSubcommand::Quote(args) => quote_product(args).await,
    }
}

async fn create_product(args: CreateProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            description: args.description,
            sku: args.sku,
            base_price: args.price,
            stock: args.stock,
            tiers: args.tiers,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("base_price: {}", product.base_price);
    println!("stock: {}", product.stock);

    for tier in &product.tiers {
        println!("tier: {} @ {}", tier.minimum_quantity(), tier.unit_price());
    }

    Ok(())
}

async fn restock_product(args: RestockProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .restock_product(args.product, args.amount)
        .await
        .map_err(|error| format!("failed to restock product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("stock: {}", product.stock);

    Ok(())
}

async fn quote_product(args: QuoteProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let quote = service
        .quote(args.product, args.quantity)
        .await
        .map_err(|error| format!("failed to quote product: {error}"))?;

    println!("quantity: {}", quote.quantity);
    println!("base_price: {}", quote.base_price);
    println!("unit_price: {}", quote.unit_price);
    println!("line_total: {}", quote.line_total);
    println!("in_stock: {}", quote.in_stock);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tier_reads_quantity_and_price() {
        assert_eq!(
            parse_tier("10:85.50"),
            Ok(PricingTier::new(10, Decimal::new(8550, 2)))
        );
    }

    #[test]
    fn parse_tier_rejects_malformed_values() {
        assert!(parse_tier("10").is_err());
        assert!(parse_tier("ten:85").is_err());
        assert!(parse_tier("10:cheap").is_err());
    }
}
