use std::io;

use clap::{Args, Subcommand, ValueEnum};
use rusty_money::iso;
use shopfront::status::{OrderStatus, TransitionPolicy};
use shopfront_app::domain::orders::{
    OrdersService, PgOrdersService,
    models::{OrderSettings, OrderUuid},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Print an order as a receipt
    Show(ShowOrderArgs),

    /// Move an order along its lifecycle
    Status(UpdateStatusArgs),

    /// Print dashboard totals
    Stats(DatabaseArgs),
}

#[derive(Debug, Args)]
struct ShowOrderArgs {
    #[arg(long)]
    order: OrderUuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct UpdateStatusArgs {
    #[arg(long)]
    order: OrderUuid,

    /// PENDING, CONFIRMED, PROCESSING, SHIPPED, DELIVERED or CANCELLED
    #[arg(long)]
    status: OrderStatus,

    /// Status transition policy, shared with the JSON API
    #[arg(long, env = "STATUS_TRANSITIONS", value_enum, default_value_t = TransitionMode::Strict)]
    status_transitions: TransitionMode,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TransitionMode {
    /// Only lifecycle moves are allowed.
    Strict,

    /// Any status may be set at any time.
    Unguarded,
}

impl From<TransitionMode> for TransitionPolicy {
    fn from(mode: TransitionMode) -> Self {
        match mode {
            TransitionMode::Strict => TransitionPolicy::Strict,
            TransitionMode::Unguarded => TransitionPolicy::Unguarded,
        }
    }
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Show(args) => show_order(args).await,
        OrderSubcommand::Status(args) => update_status(args).await,
        OrderSubcommand::Stats(args) => show_stats(args).await,
    }
}

async fn orders(
    database: &DatabaseArgs,
    settings: OrderSettings,
) -> Result<PgOrdersService, String> {
    Ok(PgOrdersService::new(database.connect().await?, settings))
}

async fn show_order(args: ShowOrderArgs) -> Result<(), String> {
    let order = orders(&args.database, OrderSettings::default())
        .await?
        .get_order(args.order)
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    println!("buyer: {} <{}>", order.buyer.name, order.buyer.email);

    order
        .receipt(iso::ZAR)
        .and_then(|receipt| receipt.write_to(io::stdout()))
        .map_err(|error| format!("failed to print receipt: {error}"))
}

async fn update_status(args: UpdateStatusArgs) -> Result<(), String> {
    let settings = OrderSettings {
        transitions: args.status_transitions.into(),
        ..OrderSettings::default()
    };

    let order = orders(&args.database, settings)
        .await?
        .update_status(args.order, args.status)
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);

    Ok(())
}

async fn show_stats(args: DatabaseArgs) -> Result<(), String> {
    let stats = orders(&args, OrderSettings::default())
        .await?
        .stats()
        .await
        .map_err(|error| format!("failed to load stats: {error}"))?;

    println!("total_orders: {}", stats.total_orders);
    println!("total_revenue: {}", stats.total_revenue);
    println!("pending_orders: {}", stats.pending_orders);
    println!("delivered_orders: {}", stats.delivered_orders);
    println!("total_products: {}", stats.total_products);
    println!("total_users: {}", stats.total_users);

    Ok(())
}
