use clap::{Parser, Subcommand};
use lectern_app::{
    config::{DatabaseConfig, LoggingConfig},
    context::AppContext,
};

mod carts;
mod catalog;
mod coupons;
mod db;
mod enrollments;
mod notifications;
mod orders;
mod output;
mod payments;
mod reviews;

#[derive(Debug, Parser)]
#[command(name = "lectern-app", about = "Lectern marketplace CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db(db::DbCommand),

    /// Teachers, courses, curriculum and countries
    Catalog(catalog::CatalogCommand),

    /// Student carts
    Cart(carts::CartCommand),

    /// Coupons and their redemption
    Coupon(coupons::CouponCommand),

    /// Checkout and orders
    Order(orders::OrderCommand),

    /// Payment gateway callbacks
    Payment(payments::PaymentCommand),

    /// Student enrollments
    Enrollment(enrollments::EnrollmentCommand),

    /// Student and teacher notifications
    Notification(notifications::NotificationCommand),

    /// Course reviews and ratings
    Review(reviews::ReviewCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<String, String> {
        let database_url = self.database.database_url;

        match self.command {
            Commands::Db(command) => db::run(command, &database_url).await,
            Commands::Catalog(command) => {
                let app = connect(&database_url).await?;
                catalog::run(command, app.catalog.as_ref()).await
            }
            Commands::Cart(command) => {
                let app = connect(&database_url).await?;
                carts::run(command, app.carts.as_ref()).await
            }
            Commands::Coupon(command) => {
                let app = connect(&database_url).await?;
                coupons::run(command, app.coupons.as_ref()).await
            }
            Commands::Order(command) => {
                let app = connect(&database_url).await?;
                orders::run(command, app.orders.as_ref()).await
            }
            Commands::Payment(command) => {
                let app = connect(&database_url).await?;
                payments::run(command, app.enrollments.as_ref(), app.orders.as_ref()).await
            }
            Commands::Enrollment(command) => {
                let app = connect(&database_url).await?;
                enrollments::run(command, app.enrollments.as_ref()).await
            }
            Commands::Notification(command) => {
                let app = connect(&database_url).await?;
                notifications::run(command, app.notifications.as_ref()).await
            }
            Commands::Review(command) => {
                let app = connect(&database_url).await?;
                reviews::run(command, app.reviews.as_ref()).await
            }
        }
    }
}

async fn connect(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_cart_add_with_country() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "lectern-app",
            "--database-url",
            "postgres://localhost/lectern",
            "cart",
            "add",
            "--user-uuid",
            "0190b3a4-7c3e-7000-8000-000000000001",
            "--course-uuid",
            "0190b3a4-7c3e-7000-8000-000000000002",
            "--country",
            "Ghana",
        ])?;

        assert!(matches!(cli.command, Commands::Cart(_)));
        assert_eq!(cli.database.database_url, "postgres://localhost/lectern");

        Ok(())
    }

    #[test]
    fn parses_review_create() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "lectern-app",
            "--database-url",
            "postgres://localhost/lectern",
            "review",
            "create",
            "--user-uuid",
            "0190b3a4-7c3e-7000-8000-000000000001",
            "--course-uuid",
            "0190b3a4-7c3e-7000-8000-000000000002",
            "--rating",
            "4",
            "--review",
            "Solid introduction",
        ])?;

        assert!(matches!(cli.command, Commands::Review(_)));

        Ok(())
    }

    #[test]
    fn rejects_malformed_uuids() {
        let result = Cli::try_parse_from([
            "lectern-app",
            "--database-url",
            "postgres://localhost/lectern",
            "order",
            "get",
            "not-a-uuid",
        ]);

        assert!(result.is_err());
    }
}
