use clap::Args;
use fishery::actors::Actor;
use fishery_app::{
    clock::Clock,
    domain::registrations::{RegistrationsService, StoreRegistrationsService},
};
use jiff::civil::Date;

use crate::cli::connect_store;

#[derive(Debug, Args)]
pub(crate) struct ExpireDueArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Treat this date as today (YYYY-MM-DD); defaults to the current Philippine date
    #[arg(long)]
    today: Option<Date>,
}

pub(crate) async fn run(args: ExpireDueArgs) -> Result<(), String> {
    let store = connect_store(&args.database_url).await?;
    let clock = Clock::system();
    let today = args.today.unwrap_or_else(|| clock.today());

    let expired = StoreRegistrationsService::new(store, clock)
        .expire_due(Actor::system(), today)
        .await
        .map_err(|error| format!("failed to expire registrations: {error}"))?;

    if expired.is_empty() {
        println!("no registrations were due for expiry on {today}");
        return Ok(());
    }

    for id in &expired {
        println!("expired: {id}");
    }

    println!("{} registration(s) expired", expired.len());

    Ok(())
}
