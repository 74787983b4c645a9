use clap::{Args, Subcommand};
use lectern_app::domain::{enrollments::EnrollmentsService, users::UserUuid};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct EnrollmentCommand {
    #[command(subcommand)]
    command: EnrollmentSubcommand,
}

#[derive(Debug, Subcommand)]
enum EnrollmentSubcommand {
    /// List a student's enrollments
    List(ListArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    user_uuid: UserUuid,
}

pub(crate) async fn run(
    command: EnrollmentCommand,
    enrollments: &dyn EnrollmentsService,
) -> Result<String, String> {
    match command.command {
        EnrollmentSubcommand::List(args) => {
            let list = enrollments
                .list_enrollments(args.user_uuid)
                .await
                .map_err(|error| format!("failed to list enrollments: {}", error_chain(&error)))?;

            to_json(&list)
        }
    }
}
