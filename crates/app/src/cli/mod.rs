use std::sync::Arc;

use clap::{Parser, Subcommand};
use fishery::{
    actors::{Actor, Role},
    ids::UserId,
};
use fishery_app::{
    database,
    store::{DocumentStore, PgDocumentStore},
};

mod db;
mod licenses;
mod profile;
mod registrations;

#[derive(Debug, Parser)]
#[command(name = "fishery-app", about = "Fishery portal operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Profile(profile::ProfileCommand),
    Registrations(registrations::RegistrationsCommand),
    Licenses(licenses::LicensesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Profile(command) => profile::run(command).await,
            Commands::Registrations(command) => registrations::run(command).await,
            Commands::Licenses(command) => licenses::run(command).await,
        }
    }
}

pub(crate) async fn connect_store(database_url: &str) -> Result<Arc<dyn DocumentStore>, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Arc::new(PgDocumentStore::new(pool)))
}

/// The MAO officer running a command from the terminal.
pub(crate) fn operator(name: &str) -> Actor {
    Actor {
        user_id: UserId::new("operator"),
        name: name.to_string(),
        email: String::new(),
        role: Role::Mao,
    }
}
