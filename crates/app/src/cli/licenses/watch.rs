use clap::Args;
use fishery_app::domain::licenses::EligibilityMonitor;

use crate::cli::{connect_store, licenses::eligible_table};

#[derive(Debug, Args)]
pub(crate) struct WatchArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: WatchArgs) -> Result<(), String> {
    let store = connect_store(&args.database_url).await?;

    let mut monitor = EligibilityMonitor::start(store.as_ref())
        .await
        .map_err(|error| format!("failed to subscribe: {error}"))?;

    loop {
        tokio::select! {
            eligible = monitor.next() => {
                let eligible = eligible
                    .map_err(|error| format!("eligibility feed failed: {error}"))?;

                println!("{} registration(s) awaiting a license", eligible.len());

                if !eligible.is_empty() {
                    println!("{}", eligible_table(&eligible));
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
