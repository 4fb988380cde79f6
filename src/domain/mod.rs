//! Domain types for the advisor referral system.
//!
//! Status and activity kinds are stored and serialized with the Spanish wire
//! values the landing page and admin panel already speak.

pub mod clock;
pub mod slug;

pub use clock::{Clock, ManualClock, SystemClock};
pub use slug::{Slug, normalize_slug};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an advisor. Transitions are always admin-driven;
/// expiration never changes the stored status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AdvisorStatus {
    #[sea_orm(string_value = "activo")]
    #[serde(rename = "activo")]
    Active,

    #[sea_orm(string_value = "suspendido")]
    #[serde(rename = "suspendido")]
    Suspended,

    #[sea_orm(string_value = "revocado")]
    #[serde(rename = "revocado")]
    Revoked,
}

impl AdvisorStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::Suspended => "suspendido",
            Self::Revoked => "revocado",
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AdvisorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of event appended to the activity log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ActivityKind {
    #[sea_orm(string_value = "acceso")]
    #[serde(rename = "acceso")]
    Access,

    #[sea_orm(string_value = "cotizacion")]
    #[serde(rename = "cotizacion")]
    Quotation,
}

impl ActivityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "acceso",
            Self::Quotation => "cotizacion",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strictly positive number of days, as accepted for paid periods and renewals.
///
/// The admin panel sends day counts either as JSON numbers or as numeric
/// strings, so both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCount(u32);

impl DayCount {
    /// Upper bound keeps date arithmetic far away from chrono's range limits.
    pub const MAX: u32 = 36_500;

    #[must_use]
    pub const fn new(days: u32) -> Option<Self> {
        if days == 0 || days > Self::MAX {
            None
        } else {
            Some(Self(days))
        }
    }

    /// Parses a JSON value into a day count, returning `None` for anything
    /// that is missing, non-numeric, fractional, or not positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                let days = n.as_u64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f > 0.0)
                        .map(|f| f as u64)
                })?;
                Self::new(u32::try_from(days).ok()?)
            }
            serde_json::Value::String(s) => Self::new(s.trim().parse().ok()?),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Lossless because the value never exceeds [`DayCount::MAX`].
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_i32(&self) -> i32 {
        self.0 as i32
    }

    #[must_use]
    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.0))
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_count_accepts_numbers_and_numeric_strings() {
        assert_eq!(DayCount::from_json(&json!(30)).map(|d| d.value()), Some(30));
        assert_eq!(DayCount::from_json(&json!("45")).map(|d| d.value()), Some(45));
        assert_eq!(DayCount::from_json(&json!(" 7 ")).map(|d| d.value()), Some(7));
        assert_eq!(DayCount::from_json(&json!(10.0)).map(|d| d.value()), Some(10));
    }

    #[test]
    fn test_day_count_rejects_invalid_values() {
        assert!(DayCount::from_json(&json!(0)).is_none());
        assert!(DayCount::from_json(&json!(-5)).is_none());
        assert!(DayCount::from_json(&json!(2.5)).is_none());
        assert!(DayCount::from_json(&json!("treinta")).is_none());
        assert!(DayCount::from_json(&json!("")).is_none());
        assert!(DayCount::from_json(&json!(null)).is_none());
        assert!(DayCount::from_json(&json!(DayCount::MAX + 1)).is_none());
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_value(AdvisorStatus::Revoked).unwrap(),
            json!("revocado")
        );
        assert_eq!(AdvisorStatus::Suspended.to_string(), "suspendido");
        assert!(AdvisorStatus::Active.is_active());
        assert_eq!(
            serde_json::to_value(ActivityKind::Quotation).unwrap(),
            json!("cotizacion")
        );
    }
}
