//! Notification Repositories

mod notifications;

pub(crate) use notifications::PgNotificationsRepository;
