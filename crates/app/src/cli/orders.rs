use clap::{Args, Subcommand};
use lectern_app::domain::{
    orders::{OrdersService, data::NewOrder, records::OrderUuid},
    users::UserUuid,
};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Check out a student's cart into a new order
    Create(CreateArgs),

    /// Show an order with its items
    Get(GetArgs),

    /// List a student's orders
    List(ListArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    student_uuid: UserUuid,

    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    country: Option<String>,
}

#[derive(Debug, Args)]
struct GetArgs {
    order_uuid: OrderUuid,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    student_uuid: UserUuid,
}

pub(crate) async fn run(command: OrderCommand, orders: &dyn OrdersService) -> Result<String, String> {
    match command.command {
        OrderSubcommand::Create(args) => {
            let order = orders
                .create_order(NewOrder {
                    uuid: OrderUuid::new(),
                    student_uuid: args.student_uuid,
                    full_name: args.full_name,
                    email: args.email,
                    country: args.country,
                })
                .await
                .map_err(|error| format!("failed to create order: {}", error_chain(&error)))?;

            to_json(&order)
        }
        OrderSubcommand::Get(args) => {
            let order = orders
                .get_order(args.order_uuid)
                .await
                .map_err(|error| format!("failed to get order: {}", error_chain(&error)))?;

            to_json(&order)
        }
        OrderSubcommand::List(args) => {
            let list = orders
                .list_orders(args.student_uuid)
                .await
                .map_err(|error| format!("failed to list orders: {}", error_chain(&error)))?;

            to_json(&list)
        }
    }
}
