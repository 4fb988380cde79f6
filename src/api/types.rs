use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ActivityKind, AdvisorStatus};
use crate::models::activity::ActivityEvent;
use crate::models::advisor::{Advisor, PublicAdvisor, Renewal, Validation};

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detalle: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl SuccessResponse {
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub const fn with_message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub asesores: u64,
}

// ============================================================================
// Advisors
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateAdvisorRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
    pub dias_pagados: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RenewalDto {
    pub fecha: DateTime<Utc>,
    pub dias: i32,
    pub nueva_expiracion: DateTime<Utc>,
}

impl From<Renewal> for RenewalDto {
    fn from(r: Renewal) -> Self {
        Self {
            fecha: r.renewed_at,
            dias: r.days,
            nueva_expiracion: r.new_expiration,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdvisorDto {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub empresa: String,
    pub url_slug: String,
    pub estado: AdvisorStatus,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_expiracion: DateTime<Utc>,
    pub dias_pagados: i32,
    pub accesos_total: i64,
    pub cotizaciones_generadas: i64,
    pub clientes_unicos: Vec<String>,
    pub ultimo_acceso: Option<DateTime<Utc>>,
    pub fecha_cancelacion: Option<DateTime<Utc>>,
    pub razon_cancelacion: Option<String>,
    pub renovaciones: Vec<RenewalDto>,
    pub url: String,
}

impl AdvisorDto {
    pub fn new(advisor: Advisor, url: String) -> Self {
        Self {
            id: advisor.id,
            nombre: advisor.name,
            email: advisor.email,
            telefono: advisor.phone,
            empresa: advisor.company,
            url_slug: advisor.slug,
            estado: advisor.status,
            fecha_inicio: advisor.start_date,
            fecha_expiracion: advisor.expires_at,
            dias_pagados: advisor.paid_days,
            accesos_total: advisor.total_accesses,
            cotizaciones_generadas: advisor.quotes_generated,
            clientes_unicos: advisor.unique_clients,
            ultimo_acceso: advisor.last_access,
            fecha_cancelacion: advisor.cancelled_at,
            razon_cancelacion: advisor.cancellation_reason,
            renovaciones: advisor.renewals.into_iter().map(RenewalDto::from).collect(),
            url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAdvisorResponse {
    pub success: bool,
    pub message: &'static str,
    pub asesor: AdvisorDto,
}

#[derive(Debug, Serialize)]
pub struct PublicAdvisorDto {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub empresa: String,
}

impl From<PublicAdvisor> for PublicAdvisorDto {
    fn from(p: PublicAdvisor) -> Self {
        Self {
            nombre: p.name,
            email: p.email,
            telefono: p.phone,
            empresa: p.company,
        }
    }
}

/// Landing page validity check. "Invalid" is a normal answer, not an error.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asesor: Option<PublicAdvisorDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResponse {
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            asesor: None,
            error: Some(error.into()),
        }
    }
}

impl From<Validation> for ValidationResponse {
    fn from(v: Validation) -> Self {
        match v {
            Validation::Valid(advisor) => Self {
                valid: true,
                asesor: Some(advisor.into()),
                error: None,
            },
            Validation::NotFound => Self::invalid("Asesor no encontrado"),
            Validation::Expired => Self::invalid("Acceso expirado"),
            Validation::Inactive(status) => Self::invalid(format!("Acceso {status}")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RenewRequest {
    pub dias: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RenewResponse {
    pub success: bool,
    pub message: &'static str,
    pub nueva_expiracion: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RevokeRequest {
    pub razon: Option<String>,
}

// ============================================================================
// Activity
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RecordAccessRequest {
    pub cliente_nombre: Option<String>,
    pub cliente_email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuotationRequest {
    pub cliente_nombre: Option<String>,
    pub cliente_email: Option<String>,
    pub plan1: Option<serde_json::Value>,
    pub plan2: Option<serde_json::Value>,
    pub monto: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ActivityDto {
    pub id: i32,
    pub url_slug: String,
    pub tipo: ActivityKind,
    pub fecha: DateTime<Utc>,
    pub cliente_nombre: Option<String>,
    pub cliente_email: Option<String>,
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto: Option<f64>,
}

impl From<ActivityEvent> for ActivityDto {
    fn from(e: ActivityEvent) -> Self {
        Self {
            id: e.id,
            url_slug: e.slug,
            tipo: e.kind,
            fecha: e.occurred_at,
            cliente_nombre: e.client_name,
            cliente_email: e.client_email,
            ip: e.ip,
            plan1: e.plan1,
            plan2: e.plan2,
            monto: e.amount,
        }
    }
}
