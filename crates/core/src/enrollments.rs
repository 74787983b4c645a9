//! Enrollment Fan-out
//!
//! Plans the enrollments and notifications a paid order produces. Items that already have
//! an enrollment are skipped, so planning the same order twice yields nothing new.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::notifications::NotificationKind;

/// A paid order item, identified by `I`, sold by an optional teacher `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidItem<I, T> {
    /// Order item identifier.
    pub item: I,

    /// Teacher of the purchased course.
    pub teacher: Option<T>,
}

/// Who a planned notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient<T> {
    /// The teacher who sold the course.
    Teacher(T),

    /// The student who placed the order.
    Student,
}

/// A notification to record alongside a new enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedNotification<I, T> {
    /// Order item the notification refers to.
    pub item: I,

    /// Addressee.
    pub recipient: Recipient<T>,

    /// Notification kind.
    pub kind: NotificationKind,
}

/// Enrollments and notifications to create for a paid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOut<I, T> {
    /// Items needing an enrollment, in order.
    pub enroll: Vec<PaidItem<I, T>>,
}

impl<I: Copy, T: Copy> FanOut<I, T> {
    /// Whether there is nothing left to create.
    pub fn is_empty(&self) -> bool {
        self.enroll.is_empty()
    }

    /// Notifications for the planned enrollments: "New Order" for the teacher when there
    /// is one, then "Course Enrollment Completed" for the student.
    pub fn notifications(&self) -> impl Iterator<Item = PlannedNotification<I, T>> + '_ {
        self.enroll.iter().flat_map(|paid| {
            let teacher = paid.teacher.map(|teacher| PlannedNotification {
                item: paid.item,
                recipient: Recipient::Teacher(teacher),
                kind: NotificationKind::NewOrder,
            });

            let student = PlannedNotification {
                item: paid.item,
                recipient: Recipient::Student,
                kind: NotificationKind::CourseEnrollmentCompleted,
            };

            teacher.into_iter().chain([student])
        })
    }
}

/// Plans the fan-out for `items`, skipping any in `already_enrolled`.
pub fn plan_fan_out<I, T>(items: &[PaidItem<I, T>], already_enrolled: &FxHashSet<I>) -> FanOut<I, T>
where
    I: Copy + Eq + Hash,
    T: Copy,
{
    let mut seen = FxHashSet::default();

    let enroll = items
        .iter()
        .filter(|paid| !already_enrolled.contains(&paid.item) && seen.insert(paid.item))
        .copied()
        .collect();

    FanOut { enroll }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> [PaidItem<u32, &'static str>; 3] {
        [
            PaidItem {
                item: 1,
                teacher: Some("ada"),
            },
            PaidItem {
                item: 2,
                teacher: None,
            },
            PaidItem {
                item: 3,
                teacher: Some("grace"),
            },
        ]
    }

    #[test]
    fn every_item_is_enrolled_on_first_run() {
        let plan = plan_fan_out(&items(), &FxHashSet::default());

        assert_eq!(plan.enroll.len(), 3);
    }

    #[test]
    fn teacher_and_student_are_notified() {
        let plan = plan_fan_out(&items(), &FxHashSet::default());
        let notifications: Vec<_> = plan.notifications().collect();

        // Item 2 has no teacher, so only its student is notified.
        assert_eq!(notifications.len(), 5);
        assert_eq!(
            notifications.first(),
            Some(&PlannedNotification {
                item: 1,
                recipient: Recipient::Teacher("ada"),
                kind: NotificationKind::NewOrder,
            })
        );
        assert_eq!(
            notifications.get(1),
            Some(&PlannedNotification {
                item: 1,
                recipient: Recipient::Student,
                kind: NotificationKind::CourseEnrollmentCompleted,
            })
        );
    }

    #[test]
    fn second_run_plans_nothing() {
        let first = plan_fan_out(&items(), &FxHashSet::default());
        let enrolled: FxHashSet<u32> = first.enroll.iter().map(|paid| paid.item).collect();

        let second = plan_fan_out(&items(), &enrolled);

        assert!(second.is_empty());
        assert_eq!(second.notifications().count(), 0);
    }

    #[test]
    fn partially_enrolled_order_only_plans_the_rest() {
        let enrolled: FxHashSet<u32> = [2].into_iter().collect();

        let plan = plan_fan_out(&items(), &enrolled);

        let planned: Vec<u32> = plan.enroll.iter().map(|paid| paid.item).collect();
        assert_eq!(planned, vec![1, 3]);
    }

    #[test]
    fn duplicate_items_are_enrolled_once() {
        let [first, ..] = items();

        let plan = plan_fan_out(&[first, first], &FxHashSet::default());

        assert_eq!(plan.enroll.len(), 1);
    }
}
