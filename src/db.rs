use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::submission::StoredSubmission;

/// In-process fallback used when no database is configured.
/// Submissions live only as long as the process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub(crate) rows: Arc<RwLock<Vec<StoredSubmission>>>,
}

/// Where submissions are persisted.
#[derive(Clone)]
pub enum Store {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::default())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

pub async fn init_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Connect to Postgres when a URL is given, otherwise fall back to memory.
pub async fn connect(database_url: Option<&str>) -> Result<Store, AppError> {
    match database_url {
        Some(url) => {
            let pool = init_pool(url).await?;
            run_migrations(&pool).await?;
            Ok(Store::Postgres(pool))
        }
        None => {
            log::warn!("No DATABASE_URL set; storing submissions in memory (lost on restart)");
            Ok(Store::memory())
        }
    }
}
