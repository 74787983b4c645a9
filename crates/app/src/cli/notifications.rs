use clap::{Args, Subcommand};
use lectern_app::domain::{
    catalog::records::TeacherUuid,
    notifications::{NotificationsService, records::NotificationUuid},
    users::UserUuid,
};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct NotificationCommand {
    #[command(subcommand)]
    command: NotificationSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationSubcommand {
    /// List a student's or a teacher's notifications
    List(ListArgs),

    /// Mark a notification as seen
    Seen(SeenArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false, id = "recipient")]
struct RecipientArgs {
    #[arg(long)]
    user_uuid: Option<UserUuid>,

    #[arg(long)]
    teacher_uuid: Option<TeacherUuid>,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    recipient: RecipientArgs,

    /// Only notifications not yet seen
    #[arg(long)]
    unseen: bool,
}

#[derive(Debug, Args)]
struct SeenArgs {
    notification_uuid: NotificationUuid,
}

pub(crate) async fn run(
    command: NotificationCommand,
    notifications: &dyn NotificationsService,
) -> Result<String, String> {
    match command.command {
        NotificationSubcommand::List(args) => {
            let list = match args.recipient {
                RecipientArgs {
                    user_uuid: Some(user),
                    ..
                } => notifications.list_for_user(user, args.unseen).await,
                RecipientArgs {
                    teacher_uuid: Some(teacher),
                    ..
                } => notifications.list_for_teacher(teacher, args.unseen).await,
                RecipientArgs { .. } => {
                    return Err("either --user-uuid or --teacher-uuid is required".to_string());
                }
            }
            .map_err(|error| format!("failed to list notifications: {}", error_chain(&error)))?;

            to_json(&list)
        }
        NotificationSubcommand::Seen(args) => {
            let notification = notifications
                .mark_seen(args.notification_uuid)
                .await
                .map_err(|error| format!("failed to mark notification seen: {}", error_chain(&error)))?;

            to_json(&notification)
        }
    }
}
