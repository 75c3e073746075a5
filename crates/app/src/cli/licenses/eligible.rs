use clap::Args;
use fishery_app::{
    clock::Clock,
    domain::licenses::{LicensesService, StoreLicensesService},
};

use crate::cli::{connect_store, licenses::eligible_table, operator};

#[derive(Debug, Args)]
pub(crate) struct EligibleArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: EligibleArgs) -> Result<(), String> {
    let store = connect_store(&args.database_url).await?;

    let eligible = StoreLicensesService::new(store, Clock::system())
        .eligible(operator("Operator"))
        .await
        .map_err(|error| format!("failed to list eligible registrations: {error}"))?;

    if eligible.is_empty() {
        println!("no registrations are awaiting a license");
        return Ok(());
    }

    println!("{}", eligible_table(&eligible));

    Ok(())
}
