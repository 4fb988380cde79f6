use crate::domain::{AdvisorStatus, DayCount};
use crate::models::activity::{AccessInput, ActivityEvent, QuotationInput};
use crate::models::advisor::{Advisor, NewAdvisor, Renewal};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::activity::ANONYMOUS_CLIENT;

/// Filesystem path named by a `sqlite:` URL, without any `?mode=...` options.
fn sqlite_file_path(db_url: &str) -> &Path {
    let path = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
    Path::new(path.split_once('?').map_or(path, |(file, _)| file))
}

/// Handle to the persistent store. Constructed once at startup and passed
/// down to every service; cloning shares the underlying pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path = sqlite_file_path(db_url);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)?;
            }
        }

        // Every pooled connection to `:memory:` would see its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes the pool. Other clones of this store become unusable.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn advisor_repo(&self) -> repositories::advisor::AdvisorRepository {
        repositories::advisor::AdvisorRepository::new(self.conn.clone())
    }

    fn activity_repo(&self) -> repositories::activity::ActivityRepository {
        repositories::activity::ActivityRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Advisors
    // ========================================================================

    pub async fn create_advisor(
        &self,
        input: &NewAdvisor,
        slug_base: &str,
        now: DateTime<Utc>,
    ) -> Result<Advisor> {
        self.advisor_repo().insert(input, slug_base, now).await
    }

    pub async fn get_advisor(&self, slug: &str) -> Result<Option<Advisor>> {
        self.advisor_repo().get(slug).await
    }

    pub async fn list_advisors(&self) -> Result<Vec<Advisor>> {
        self.advisor_repo().list_all().await
    }

    pub async fn count_advisors(&self) -> Result<u64> {
        self.advisor_repo().count().await
    }

    pub async fn renew_advisor(
        &self,
        slug: &str,
        days: DayCount,
        now: DateTime<Utc>,
    ) -> Result<Option<Renewal>> {
        self.advisor_repo().renew(slug, days, now).await
    }

    pub async fn set_advisor_status(&self, slug: &str, status: AdvisorStatus) -> Result<bool> {
        self.advisor_repo().set_status(slug, status).await
    }

    pub async fn revoke_advisor(
        &self,
        slug: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.advisor_repo().revoke(slug, reason, now).await
    }

    // ========================================================================
    // Activity
    // ========================================================================

    pub async fn record_access(
        &self,
        slug: &str,
        input: &AccessInput,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.activity_repo().record_access(slug, input, now).await
    }

    pub async fn record_quotation(
        &self,
        slug: &str,
        input: &QuotationInput,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.activity_repo().record_quotation(slug, input, now).await
    }

    pub async fn recent_activity(&self, slug: &str, limit: u64) -> Result<Vec<ActivityEvent>> {
        self.activity_repo().list_recent(slug, limit).await
    }

    pub async fn activity_count(&self, slug: &str) -> Result<u64> {
        self.activity_repo().count_for(slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path_drops_query() {
        assert_eq!(
            sqlite_file_path("sqlite:data/colmena.db?mode=rwc"),
            Path::new("data/colmena.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite:///var/lib/colmena.db"),
            Path::new("/var/lib/colmena.db")
        );
        assert_eq!(sqlite_file_path("sqlite:colmena.db"), Path::new("colmena.db"));
    }

    #[tokio::test]
    async fn test_store_creates_file_without_query_suffix() {
        let dir = std::env::temp_dir().join(format!("colmena-store-{}", uuid::Uuid::new_v4()));
        let file = dir.join("colmena.db");
        let url = format!("sqlite:{}?mode=rwc", file.display());

        let store = Store::with_pool_options(&url, 2, 1).await.unwrap();
        store.ping().await.unwrap();
        store.close().await.unwrap();

        assert!(file.exists());
        assert!(!dir.join("colmena.db?mode=rwc").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
