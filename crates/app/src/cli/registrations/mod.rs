use clap::{Args, Subcommand};

mod expire_due;

#[derive(Debug, Args)]
pub(crate) struct RegistrationsCommand {
    #[command(subcommand)]
    command: RegistrationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum RegistrationsSubcommand {
    ExpireDue(expire_due::ExpireDueArgs),
}

pub(crate) async fn run(command: RegistrationsCommand) -> Result<(), String> {
    match command.command {
        RegistrationsSubcommand::ExpireDue(args) => expire_due::run(args).await,
    }
}
