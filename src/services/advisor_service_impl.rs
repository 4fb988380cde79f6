//! `SeaORM` implementation of the `AdvisorService` trait.

use crate::db::Store;
use crate::domain::{AdvisorStatus, Clock, DayCount, normalize_slug};
use crate::models::advisor::{Advisor, NewAdvisor, PublicAdvisor, Renewal, Validation};
use crate::services::advisor_service::{
    AdvisorDraft, AdvisorError, AdvisorService, DEFAULT_REVOCATION_REASON,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SeaOrmAdvisorService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl SeaOrmAdvisorService {
    #[must_use]
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn required(value: Option<String>) -> Result<String, AdvisorError> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(AdvisorError::missing_fields)
    }

    fn validate_draft(draft: AdvisorDraft) -> Result<NewAdvisor, AdvisorError> {
        Ok(NewAdvisor {
            name: Self::required(draft.name)?,
            email: Self::required(draft.email)?,
            phone: Self::required(draft.phone)?,
            company: Self::required(draft.company)?,
            paid_days: draft.paid_days.ok_or_else(AdvisorError::missing_fields)?,
        })
    }

    async fn update_status(&self, slug: &str, status: AdvisorStatus) -> Result<(), AdvisorError> {
        if !self.store.set_advisor_status(slug, status).await? {
            return Err(AdvisorError::NotFound(slug.to_string()));
        }
        info!(slug = %slug, status = %status, "Advisor status changed");
        Ok(())
    }
}

#[async_trait]
impl AdvisorService for SeaOrmAdvisorService {
    async fn create(&self, draft: AdvisorDraft) -> Result<Advisor, AdvisorError> {
        let input = Self::validate_draft(draft)?;

        let base = normalize_slug(&input.name);
        if base.is_empty() {
            return Err(AdvisorError::missing_fields());
        }

        let advisor = self
            .store
            .create_advisor(&input, &base, self.clock.now())
            .await?;

        metrics::counter!("advisors_created_total").increment(1);
        Ok(advisor)
    }

    async fn list(&self) -> Result<Vec<Advisor>, AdvisorError> {
        Ok(self.store.list_advisors().await?)
    }

    async fn get(&self, slug: &str) -> Result<Advisor, AdvisorError> {
        self.store
            .get_advisor(slug)
            .await?
            .ok_or_else(|| AdvisorError::NotFound(slug.to_string()))
    }

    async fn validate(&self, slug: &str) -> Result<Validation, AdvisorError> {
        let Some(advisor) = self.store.get_advisor(slug).await? else {
            return Ok(Validation::NotFound);
        };

        if advisor.is_expired_at(self.clock.now()) {
            return Ok(Validation::Expired);
        }

        if !advisor.status.is_active() {
            return Ok(Validation::Inactive(advisor.status));
        }

        Ok(Validation::Valid(PublicAdvisor::from(&advisor)))
    }

    async fn renew(&self, slug: &str, days: Option<DayCount>) -> Result<Renewal, AdvisorError> {
        let days = days.ok_or_else(AdvisorError::missing_days)?;

        let renewal = self
            .store
            .renew_advisor(slug, days, self.clock.now())
            .await?
            .ok_or_else(|| AdvisorError::NotFound(slug.to_string()))?;

        info!(
            slug = %slug,
            days = days.value(),
            new_expiration = %renewal.new_expiration,
            "Advisor renewed"
        );
        Ok(renewal)
    }

    async fn suspend(&self, slug: &str) -> Result<(), AdvisorError> {
        self.update_status(slug, AdvisorStatus::Suspended).await
    }

    async fn activate(&self, slug: &str) -> Result<(), AdvisorError> {
        self.update_status(slug, AdvisorStatus::Active).await
    }

    async fn revoke(&self, slug: &str, reason: Option<String>) -> Result<(), AdvisorError> {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REVOCATION_REASON.to_string());

        if !self
            .store
            .revoke_advisor(slug, &reason, self.clock.now())
            .await?
        {
            return Err(AdvisorError::NotFound(slug.to_string()));
        }

        warn!(slug = %slug, reason = %reason, "Advisor access revoked");
        Ok(())
    }
}
