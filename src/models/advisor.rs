use crate::domain::{AdvisorStatus, DayCount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisor {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: AdvisorStatus,
    pub start_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub paid_days: i32,
    pub total_accesses: i64,
    pub quotes_generated: i64,
    pub unique_clients: Vec<String>,
    pub last_access: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub renewals: Vec<Renewal>,
}

impl Advisor {
    /// Expiration wins over status: an expired advisor is never usable.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renewal {
    pub renewed_at: DateTime<Utc>,
    pub days: i32,
    pub new_expiration: DateTime<Utc>,
}

/// Validated input for creating an advisor.
#[derive(Debug, Clone)]
pub struct NewAdvisor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub paid_days: DayCount,
}

/// Contact details exposed to the public landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAdvisor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

impl From<&Advisor> for PublicAdvisor {
    fn from(advisor: &Advisor) -> Self {
        Self {
            name: advisor.name.clone(),
            email: advisor.email.clone(),
            phone: advisor.phone.clone(),
            company: advisor.company.clone(),
        }
    }
}

/// Outcome of checking whether an advisor's landing page may be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(PublicAdvisor),
    NotFound,
    Expired,
    Inactive(AdvisorStatus),
}

impl Validation {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}
