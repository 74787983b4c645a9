//! Users
//!
//! Users belong to the external identity store; only their identifiers are stored here.

use crate::uuids::TypedUuid;

/// Marker for identifiers issued by the identity store.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;
