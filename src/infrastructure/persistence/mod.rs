use sqlx::{
    any::{AnyConnectOptions, AnyPoolOptions},
    AnyPool, ConnectOptions,
};
use std::str::FromStr;
use log::LevelFilter;

mod comments;
mod discussions;
mod sessions;
mod teams;
mod users;

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        // Ensure drivers are installed for AnyPool
        sqlx::any::install_default_drivers();

        let connect_options = AnyConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, std::time::Duration::from_secs(1));

        let pool = AnyPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .connect_with(connect_options)
            .await?;

        // Foreign keys and the busy timeout are already on in sqlx's SQLite defaults
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await?;
        }

        tracing::info!("Database pool ready");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}
