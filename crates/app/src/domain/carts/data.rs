//! Cart Data

use crate::domain::{
    carts::records::CartItemUuid, catalog::records::CourseUuid, users::UserUuid,
};

/// New Cart Item Data
///
/// Amounts are not supplied: they come from the course price and the country tax rate.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub course_uuid: CourseUuid,
    pub country: Option<String>,
}
