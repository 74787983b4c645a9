//! Notification Kinds

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored kind text did not match a known kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown notification kind {0:?}")]
pub struct UnknownNotificationKind(pub String);

/// Kinds of notification the marketplace records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A teacher sold a course.
    NewOrder,

    /// A student reviewed a course.
    NewReview,

    /// A student asked a question on a course.
    NewCourseQuestion,

    /// A course was saved as a draft.
    Draft,

    /// A course went live.
    CoursePublished,

    /// A student's enrollment finished after payment.
    CourseEnrollmentCompleted,
}

impl NotificationKind {
    /// Kind text as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewOrder => "New Order",
            Self::NewReview => "New Review",
            Self::NewCourseQuestion => "New Course Question",
            Self::Draft => "Draft",
            Self::CoursePublished => "Course Published",
            Self::CourseEnrollmentCompleted => "Course Enrollment Completed",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New Order" => Ok(Self::NewOrder),
            "New Review" => Ok(Self::NewReview),
            "New Course Question" => Ok(Self::NewCourseQuestion),
            "Draft" => Ok(Self::Draft),
            "Course Published" => Ok(Self::CoursePublished),
            "Course Enrollment Completed" => Ok(Self::CourseEnrollmentCompleted),
            other => Err(UnknownNotificationKind(other.to_string())),
        }
    }
}
