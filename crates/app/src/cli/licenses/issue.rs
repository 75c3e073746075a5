use clap::Args;
use fishery::ids::RegistrationId;
use fishery_app::{
    clock::Clock,
    domain::licenses::{LicensesService, StoreLicensesService},
};

use crate::cli::{connect_store, operator};

#[derive(Debug, Args)]
pub(crate) struct IssueArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Registration to license
    #[arg(long)]
    registration: String,

    /// Officer name recorded on the license
    #[arg(long, default_value = "Municipal Agriculture Office")]
    issued_by: String,
}

pub(crate) async fn run(args: IssueArgs) -> Result<(), String> {
    let store = connect_store(&args.database_url).await?;

    let license = StoreLicensesService::new(store, Clock::system())
        .issue(
            operator(&args.issued_by),
            RegistrationId::new(args.registration),
        )
        .await
        .map_err(|error| format!("failed to issue license: {error}"))?;

    println!("license_id: {}", license.id);
    println!("registration_id: {}", license.registration_id);
    println!("owner: {}", license.owner.name);
    println!("issue_date: {}", license.issue_date);
    println!("expiry_date: {}", license.expiry_date);

    Ok(())
}
