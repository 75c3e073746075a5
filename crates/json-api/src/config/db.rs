//! Database Config

use clap::{Args, ValueEnum};

/// Document store backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process-local store; everything is lost on restart.
    Memory,

    /// `PostgreSQL` JSONB documents.
    Postgres,
}

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Store backend (memory, postgres)
    #[arg(long, env = "STORE", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store: StoreBackend,

    /// `PostgreSQL` connection string, required for the postgres store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
