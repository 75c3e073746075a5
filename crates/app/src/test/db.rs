//! Database test utilities
//!
//! One `PostgreSQL` container is started per test binary and reused. Every [`TestDb`] gets
//! its own freshly migrated database inside it, so tests never see each other's documents.

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, TestcontainersError, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use testresult::TestResult;
use tokio::sync::OnceCell;

use crate::database;

const USER: &str = "fishery_test";
const PASSWORD: &str = "fishery_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static NEXT_DATABASE: AtomicU64 = AtomicU64::new(1);

async fn init_postgres_container() -> Result<ContainerAsync<PostgresImage>, TestcontainersError> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("fishery_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
}

/// An isolated, migrated database.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl TestDb {
    pub async fn new() -> TestResult<Self> {
        let container = POSTGRES_CONTAINER
            .get_or_try_init(init_postgres_container)
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;

        let host =
            std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".into());

        let name = format!(
            "fishery_store_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut admin =
            PgConnection::connect(&format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/postgres"))
                .await?;

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await?;

        admin.close().await?;

        let pool = database::connect(&format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{name}"))
            .await?;

        database::migrate(&pool).await?;

        Ok(Self { pool, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn databases_are_migrated_and_distinct() -> TestResult {
        let first = TestDb::new().await?;
        let second = TestDb::new().await?;

        assert_ne!(first.name, second.name, "each test gets its own database");

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN ('documents', 'document_sequences')",
        )
        .fetch_one(&first.pool)
        .await?;

        assert_eq!(tables, 2, "migrations should create both tables");

        Ok(())
    }
}
