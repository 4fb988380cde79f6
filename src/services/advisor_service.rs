//! Domain service for the advisor lifecycle.
//!
//! Covers creation with slug allocation, renewal, suspension, activation,
//! revocation and the read-time validity check used by landing pages.

use crate::domain::DayCount;
use crate::models::advisor::{Advisor, Renewal, Validation};
use thiserror::Error;

/// Default reason stored when an advisor is revoked without one.
pub const DEFAULT_REVOCATION_REASON: &str = "Revocado por administrador";

/// Errors specific to advisor operations.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("{0}")]
    Validation(String),

    #[error("Asesor no encontrado: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AdvisorError {
    pub fn missing_fields() -> Self {
        Self::Validation("Faltan datos requeridos".to_string())
    }

    pub fn missing_days() -> Self {
        Self::Validation("Especifica días".to_string())
    }
}

impl From<sea_orm::DbErr> for AdvisorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AdvisorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Unvalidated creation input as received from the admin panel or CLI.
#[derive(Debug, Clone, Default)]
pub struct AdvisorDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub paid_days: Option<DayCount>,
}

/// Domain service trait for advisors.
#[async_trait::async_trait]
pub trait AdvisorService: Send + Sync {
    /// Creates an advisor under a freshly allocated unique slug.
    async fn create(&self, draft: AdvisorDraft) -> Result<Advisor, AdvisorError>;

    /// Lists every advisor with its client set and renewal history.
    async fn list(&self) -> Result<Vec<Advisor>, AdvisorError>;

    /// Gets a single advisor by slug.
    async fn get(&self, slug: &str) -> Result<Advisor, AdvisorError>;

    /// Checks whether the landing page for `slug` may be shown right now.
    async fn validate(&self, slug: &str) -> Result<Validation, AdvisorError>;

    /// Extends the expiration by `days` on top of the current expiration.
    async fn renew(&self, slug: &str, days: Option<DayCount>) -> Result<Renewal, AdvisorError>;

    async fn suspend(&self, slug: &str) -> Result<(), AdvisorError>;

    async fn activate(&self, slug: &str) -> Result<(), AdvisorError>;

    /// Revokes access, stamping the cancellation date and reason.
    async fn revoke(&self, slug: &str, reason: Option<String>) -> Result<(), AdvisorError>;
}
