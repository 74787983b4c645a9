//! Order Records

use jiff::Timestamp;
use lectern::{
    orders::{OrderLine, OrderTotals},
    payments::PaymentStatus,
};
use serde::Serialize;

use crate::{
    domain::{
        catalog::records::{CourseUuid, TeacherUuid},
        coupons::records::CouponUuid,
        users::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// The aggregate amounts always equal the sums over `items`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub student_uuid: UserUuid,
    pub sub_total: u64,
    pub tax_fee: u64,
    pub total: u64,
    pub initial_total: u64,
    pub saved: u64,
    pub payment_status: PaymentStatus,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub payment_reference: Option<String>,
    pub teachers: Vec<TeacherUuid>,
    pub coupons: Vec<CouponUuid>,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            sub_total: self.sub_total,
            tax_fee: self.tax_fee,
            total: self.total,
            initial_total: self.initial_total,
            saved: self.saved,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = OrderLine> + '_ {
        self.items.iter().map(OrderItemRecord::line)
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub course_uuid: CourseUuid,
    pub teacher_uuid: Option<TeacherUuid>,
    pub price: u64,
    pub tax_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub initial_total: u64,
    pub saved: u64,
    pub coupon_uuid: Option<CouponUuid>,
    pub applied_coupon: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderItemRecord {
    /// The item's amounts as an engine order line.
    #[must_use]
    pub fn line(&self) -> OrderLine {
        OrderLine {
            price: self.price,
            tax_fee: self.tax_fee,
            discount: self.discount,
            total: self.total,
            initial_total: self.initial_total,
            saved: self.saved,
        }
    }
}
