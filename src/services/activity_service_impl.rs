//! `SeaORM` implementation of the `ActivityService` trait.

use crate::db::Store;
use crate::domain::Clock;
use crate::models::activity::{AccessInput, ActivityEvent, QuotationInput};
use crate::services::activity_service::{ACTIVITY_LIST_LIMIT, ActivityError, ActivityService};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct SeaOrmActivityService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl SeaOrmActivityService {
    #[must_use]
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl ActivityService for SeaOrmActivityService {
    async fn record_access(&self, slug: &str, input: AccessInput) -> Result<(), ActivityError> {
        if !self
            .store
            .record_access(slug, &input, self.clock.now())
            .await?
        {
            return Err(ActivityError::NotFound(slug.to_string()));
        }

        metrics::counter!("advisor_accesses_total").increment(1);
        debug!(slug = %slug, ip = %input.ip, "Access recorded");
        Ok(())
    }

    async fn record_quotation(
        &self,
        slug: &str,
        input: QuotationInput,
    ) -> Result<(), ActivityError> {
        if !self
            .store
            .record_quotation(slug, &input, self.clock.now())
            .await?
        {
            return Err(ActivityError::NotFound(slug.to_string()));
        }

        metrics::counter!("advisor_quotations_total").increment(1);
        debug!(slug = %slug, ip = %input.ip, "Quotation recorded");
        Ok(())
    }

    async fn list(&self, slug: &str) -> Result<Vec<ActivityEvent>, ActivityError> {
        Ok(self
            .store
            .recent_activity(slug, ACTIVITY_LIST_LIMIT)
            .await?)
    }
}
