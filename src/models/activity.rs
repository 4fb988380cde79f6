use crate::domain::ActivityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: i32,
    pub slug: String,
    pub kind: ActivityKind,
    pub occurred_at: DateTime<Utc>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub ip: Option<String>,
    pub plan1: Option<String>,
    pub plan2: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AccessInput {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub ip: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuotationInput {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub plan1: Option<String>,
    pub plan2: Option<String>,
    pub amount: Option<f64>,
    pub ip: String,
}

/// Identity used for the unique-client set: the email when one was given,
/// otherwise the request IP.
#[must_use]
pub fn client_identity(email: Option<&str>, ip: &str) -> String {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(ip)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_identity_prefers_email() {
        assert_eq!(
            client_identity(Some("ana@example.com"), "10.0.0.1"),
            "ana@example.com"
        );
        assert_eq!(client_identity(None, "10.0.0.1"), "10.0.0.1");
        assert_eq!(client_identity(Some("  "), "10.0.0.1"), "10.0.0.1");
    }
}
