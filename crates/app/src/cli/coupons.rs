use clap::{Args, Subcommand};
use lectern_app::domain::{
    catalog::records::TeacherUuid,
    coupons::{CouponsService, data::NewCoupon, records::CouponUuid},
    orders::records::{OrderItemUuid, OrderUuid},
    users::UserUuid,
};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Create a coupon
    Create(CreateArgs),

    /// Show a coupon by code
    Find(FindArgs),

    /// Redeem a coupon against one order item
    Apply(ApplyArgs),

    /// Redeem a coupon against every eligible item of an order
    ApplyOrder(ApplyOrderArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    code: String,

    /// Percentage taken off the item price (0-100)
    #[arg(long)]
    discount: u32,

    /// Restrict the coupon to one teacher's courses
    #[arg(long)]
    teacher_uuid: Option<TeacherUuid>,

    /// Create the coupon switched off
    #[arg(long)]
    inactive: bool,
}

#[derive(Debug, Args)]
struct FindArgs {
    code: String,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    #[arg(long)]
    user_uuid: UserUuid,

    #[arg(long)]
    order_item_uuid: OrderItemUuid,

    #[arg(long)]
    code: String,
}

#[derive(Debug, Args)]
struct ApplyOrderArgs {
    #[arg(long)]
    user_uuid: UserUuid,

    #[arg(long)]
    order_uuid: OrderUuid,

    #[arg(long)]
    code: String,
}

pub(crate) async fn run(
    command: CouponCommand,
    coupons: &dyn CouponsService,
) -> Result<String, String> {
    match command.command {
        CouponSubcommand::Create(args) => {
            let coupon = coupons
                .create_coupon(NewCoupon {
                    uuid: CouponUuid::new(),
                    teacher_uuid: args.teacher_uuid,
                    code: args.code,
                    discount: args.discount,
                    active: !args.inactive,
                })
                .await
                .map_err(|error| format!("failed to create coupon: {}", error_chain(&error)))?;

            to_json(&coupon)
        }
        CouponSubcommand::Find(args) => {
            let coupon = coupons
                .find_coupon(&args.code)
                .await
                .map_err(|error| format!("failed to find coupon: {}", error_chain(&error)))?;

            to_json(&coupon)
        }
        CouponSubcommand::Apply(args) => {
            let order = coupons
                .apply_coupon(args.user_uuid, args.order_item_uuid, &args.code)
                .await
                .map_err(|error| format!("failed to apply coupon: {}", error_chain(&error)))?;

            to_json(&order)
        }
        CouponSubcommand::ApplyOrder(args) => {
            let order = coupons
                .apply_coupon_to_order(args.user_uuid, args.order_uuid, &args.code)
                .await
                .map_err(|error| format!("failed to apply coupon: {}", error_chain(&error)))?;

            to_json(&order)
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use lectern::coupons::CouponRejection;
    use lectern_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, records::CouponRecord,
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn create_defaults_to_active() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .withf(|coupon| coupon.code == "SPRING10" && coupon.discount == 10 && coupon.active)
            .times(1)
            .returning(|coupon| {
                Ok(CouponRecord {
                    uuid: coupon.uuid,
                    teacher_uuid: coupon.teacher_uuid,
                    code: coupon.code,
                    discount: coupon.discount,
                    active: coupon.active,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let command = CouponCommand {
            command: CouponSubcommand::Create(CreateArgs {
                code: "SPRING10".to_string(),
                discount: 10,
                teacher_uuid: None,
                inactive: false,
            }),
        };

        let output = run(command, &coupons).await?;
        let json: serde_json::Value = serde_json::from_str(&output)?;

        assert_eq!(json["code"], "SPRING10");
        assert_eq!(json["active"], true);

        Ok(())
    }

    #[tokio::test]
    async fn rejections_explain_the_reason() {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_apply_coupon()
            .times(1)
            .returning(|_, _, _| Err(CouponsServiceError::from(CouponRejection::AlreadyUsed)));

        let command = CouponCommand {
            command: CouponSubcommand::Apply(ApplyArgs {
                user_uuid: UserUuid::new(),
                order_item_uuid: OrderItemUuid::new(),
                code: "SPRING10".to_string(),
            }),
        };

        let result = run(command, &coupons).await;

        assert_eq!(
            result,
            Err("failed to apply coupon: invalid coupon: coupon has already been used".to_string())
        );
    }
}
