//! Domain service for the activity log: landing page visits and quotations.

use crate::models::activity::{AccessInput, ActivityEvent, QuotationInput};
use thiserror::Error;

/// Maximum number of events returned when listing an advisor's activity.
pub const ACTIVITY_LIST_LIMIT: u64 = 100;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Asesor no encontrado: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ActivityError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ActivityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait ActivityService: Send + Sync {
    /// Appends an access event and bumps the advisor's access counter.
    async fn record_access(&self, slug: &str, input: AccessInput) -> Result<(), ActivityError>;

    /// Appends a quotation event and bumps the advisor's quotation counter.
    async fn record_quotation(
        &self,
        slug: &str,
        input: QuotationInput,
    ) -> Result<(), ActivityError>;

    /// Returns the most recent events for `slug`, newest first.
    async fn list(&self, slug: &str) -> Result<Vec<ActivityEvent>, ActivityError>;
}
