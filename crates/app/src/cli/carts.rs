use clap::{Args, Subcommand};
use lectern::money::format_amount;
use lectern_app::domain::{
    carts::{
        CartsService,
        data::NewCartItem,
        records::{CartItemUuid, CartStats},
    },
    catalog::records::CourseUuid,
    users::UserUuid,
};
use serde::Serialize;

use super::output::to_json;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a course to a user's cart
    Add(AddArgs),

    /// List a user's cart
    List(UserArgs),

    /// Remove an item from a user's cart
    Remove(RemoveArgs),

    /// Show the cart's item count and totals
    Stats(UserArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    user_uuid: UserUuid,

    #[arg(long)]
    course_uuid: CourseUuid,

    /// Country whose tax rate applies; untaxed when omitted or unknown
    #[arg(long)]
    country: Option<String>,
}

#[derive(Debug, Args)]
struct UserArgs {
    #[arg(long)]
    user_uuid: UserUuid,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    #[arg(long)]
    user_uuid: UserUuid,

    cart_item_uuid: CartItemUuid,
}

/// Cart stats with the amounts also rendered for display.
#[derive(Debug, Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    stats: CartStats,
    display_price: String,
    display_tax_fee: String,
    display_total: String,
}

impl StatsOutput {
    fn new(stats: CartStats) -> Result<Self, String> {
        let display = |amount| {
            format_amount(amount).map_err(|error| format!("failed to format amount: {error}"))
        };

        Ok(Self {
            display_price: display(stats.price)?,
            display_tax_fee: display(stats.tax_fee)?,
            display_total: display(stats.total)?,
            stats,
        })
    }
}

pub(crate) async fn run(command: CartCommand, carts: &dyn CartsService) -> Result<String, String> {
    match command.command {
        CartSubcommand::Add(args) => {
            let item = carts
                .add_item(NewCartItem {
                    uuid: CartItemUuid::new(),
                    user_uuid: args.user_uuid,
                    course_uuid: args.course_uuid,
                    country: args.country,
                })
                .await
                .map_err(|error| format!("failed to add cart item: {error}"))?;

            to_json(&item)
        }
        CartSubcommand::List(args) => {
            let items = carts
                .list_items(args.user_uuid)
                .await
                .map_err(|error| format!("failed to list cart items: {error}"))?;

            to_json(&items)
        }
        CartSubcommand::Remove(args) => {
            carts
                .remove_item(args.user_uuid, args.cart_item_uuid)
                .await
                .map_err(|error| format!("failed to remove cart item: {error}"))?;

            Ok(format!("removed cart item {}", args.cart_item_uuid))
        }
        CartSubcommand::Stats(args) => {
            let stats = carts
                .get_stats(args.user_uuid)
                .await
                .map_err(|error| format!("failed to get cart stats: {error}"))?;

            to_json(&StatsOutput::new(stats)?)
        }
    }
}
