//! Order Data

use crate::domain::{orders::records::OrderUuid, users::UserUuid};

/// New Order Data
///
/// Items are taken from the student's cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub student_uuid: UserUuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
}
