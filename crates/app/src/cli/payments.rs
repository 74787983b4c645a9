use clap::{Args, Subcommand};
use lectern_app::domain::{
    enrollments::EnrollmentsService,
    orders::{OrdersService, records::OrderUuid},
};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct PaymentCommand {
    #[command(subcommand)]
    command: PaymentSubcommand,
}

#[derive(Debug, Subcommand)]
enum PaymentSubcommand {
    /// Mark an order paid and enroll the student in its courses
    Confirm(ConfirmArgs),

    /// Record a failed payment attempt
    Fail(FailArgs),
}

#[derive(Debug, Args)]
struct ConfirmArgs {
    order_uuid: OrderUuid,

    /// Payment provider reference for the settled charge
    #[arg(long)]
    reference: Option<String>,
}

#[derive(Debug, Args)]
struct FailArgs {
    order_uuid: OrderUuid,
}

pub(crate) async fn run(
    command: PaymentCommand,
    enrollments: &dyn EnrollmentsService,
    orders: &dyn OrdersService,
) -> Result<String, String> {
    match command.command {
        PaymentSubcommand::Confirm(args) => {
            let confirmation = enrollments
                .confirm_payment(args.order_uuid, args.reference)
                .await
                .map_err(|error| format!("failed to confirm payment: {}", error_chain(&error)))?;

            to_json(&confirmation)
        }
        PaymentSubcommand::Fail(args) => {
            let order = orders
                .fail_payment(args.order_uuid)
                .await
                .map_err(|error| format!("failed to record payment failure: {}", error_chain(&error)))?;

            to_json(&order)
        }
    }
}

#[cfg(test)]
mod tests {
    use lectern::payments::PaymentStatusError;
    use lectern_app::domain::{
        enrollments::{EnrollmentsServiceError, MockEnrollmentsService},
        orders::{MockOrdersService, OrdersServiceError},
    };

    use super::*;

    #[tokio::test]
    async fn confirm_passes_the_reference() {
        let mut enrollments = MockEnrollmentsService::new();
        let orders = MockOrdersService::new();
        let order = OrderUuid::new();

        enrollments
            .expect_confirm_payment()
            .withf(move |requested, reference| {
                *requested == order && reference.as_deref() == Some("ch_42")
            })
            .times(1)
            .returning(|_, _| Err(EnrollmentsServiceError::NotFound));

        let command = PaymentCommand {
            command: PaymentSubcommand::Confirm(ConfirmArgs {
                order_uuid: order,
                reference: Some("ch_42".to_string()),
            }),
        };

        let result = run(command, &enrollments, &orders).await;

        assert_eq!(
            result,
            Err("failed to confirm payment: order not found".to_string())
        );
    }

    #[tokio::test]
    async fn paid_orders_cannot_fail() {
        let enrollments = MockEnrollmentsService::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_fail_payment()
            .times(1)
            .returning(|_| Err(OrdersServiceError::from(PaymentStatusError::AlreadyPaid)));

        let command = PaymentCommand {
            command: PaymentSubcommand::Fail(FailArgs {
                order_uuid: OrderUuid::new(),
            }),
        };

        let result = run(command, &enrollments, &orders).await;

        assert_eq!(
            result,
            Err("failed to record payment failure: order has already been paid".to_string())
        );
    }
}
