use clap::{Args, Subcommand};
use fishery::registrations::Registration;
use tabled::{
    builder::Builder,
    settings::{Style, Theme},
};

mod eligible;
mod issue;
mod watch;

#[derive(Debug, Args)]
pub(crate) struct LicensesCommand {
    #[command(subcommand)]
    command: LicensesSubcommand,
}

#[derive(Debug, Subcommand)]
enum LicensesSubcommand {
    Eligible(eligible::EligibleArgs),
    Issue(issue::IssueArgs),
    Watch(watch::WatchArgs),
}

pub(crate) async fn run(command: LicensesCommand) -> Result<(), String> {
    match command.command {
        LicensesSubcommand::Eligible(args) => eligible::run(args).await,
        LicensesSubcommand::Issue(args) => issue::run(args).await,
        LicensesSubcommand::Watch(args) => watch::run(args).await,
    }
}

/// Render registrations awaiting a license as a table.
fn eligible_table(registrations: &[Registration]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Registration", "Type", "Owner", "Registered", "Expires"]);

    for registration in registrations {
        builder.push_record([
            registration.id.to_string(),
            registration.kind.to_string(),
            registration.owner.name.clone(),
            registration.registration_date.to_string(),
            registration.expiry_date.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));

    table.to_string()
}
