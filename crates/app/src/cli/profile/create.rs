use clap::{Args, ValueEnum};
use fishery::{actors::Role, ids::UserId};
use fishery_app::domain::profiles::{Profile, StoreProfilesService};

use crate::cli::connect_store;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Fisherfolk,
    Mao,
    Mto,
    Inspector,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Fisherfolk => Self::Fisherfolk,
            RoleArg::Mao => Self::Mao,
            RoleArg::Mto => Self::Mto,
            RoleArg::Inspector => Self::Inspector,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Identity provider user ID
    #[arg(long)]
    user_id: String,

    /// Display name recorded in history entries
    #[arg(long)]
    name: String,

    /// Portal role
    #[arg(long, value_enum)]
    role: RoleArg,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    if args.user_id.trim().is_empty() {
        return Err("user_id cannot be empty".to_string());
    }

    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let store = connect_store(&args.database_url).await?;

    let profile = StoreProfilesService::new(store)
        .put(Profile {
            user_id: UserId::new(args.user_id),
            name: args.name,
            role: args.role.into(),
        })
        .await
        .map_err(|error| format!("failed to save profile: {error}"))?;

    println!("user_id: {}", profile.user_id);
    println!("name: {}", profile.name);
    println!("role: {}", profile.role);

    Ok(())
}
