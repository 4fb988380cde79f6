use crate::domain::{AdvisorStatus, DayCount, Slug};
use crate::entities::{asesor_clientes, asesores, prelude::*, renovaciones};
use crate::models::advisor::{Advisor, NewAdvisor, Renewal};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Repository for advisor records, their unique-client set and renewal history.
pub struct AdvisorRepository {
    conn: DatabaseConnection,
}

impl AdvisorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(
        model: asesores::Model,
        clients: Vec<String>,
        renewals: Vec<renovaciones::Model>,
    ) -> Advisor {
        Advisor {
            id: model.id,
            slug: model.url_slug,
            name: model.nombre,
            email: model.email,
            phone: model.telefono,
            company: model.empresa,
            status: model.estado,
            start_date: model.fecha_inicio,
            expires_at: model.fecha_expiracion,
            paid_days: model.dias_pagados,
            total_accesses: model.accesos_total,
            quotes_generated: model.cotizaciones_generadas,
            unique_clients: clients,
            last_access: model.ultimo_acceso,
            cancelled_at: model.fecha_cancelacion,
            cancellation_reason: model.razon_cancelacion,
            renewals: renewals.into_iter().map(Self::map_renewal).collect(),
        }
    }

    fn map_renewal(r: renovaciones::Model) -> Renewal {
        Renewal {
            renewed_at: r.fecha,
            days: r.dias,
            new_expiration: r.nueva_expiracion,
        }
    }

    fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn exists(&self, slug: &str) -> Result<bool> {
        let count = Asesores::find()
            .filter(asesores::Column::UrlSlug.eq(slug))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn get(&self, slug: &str) -> Result<Option<Advisor>> {
        let Some(model) = Asesores::find()
            .filter(asesores::Column::UrlSlug.eq(slug))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let clients = AsesorClientes::find()
            .filter(asesor_clientes::Column::UrlSlug.eq(slug))
            .order_by_asc(asesor_clientes::Column::PrimerRegistro)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|c| c.cliente)
            .collect();

        let renewals = Renovaciones::find()
            .filter(renovaciones::Column::UrlSlug.eq(slug))
            .order_by_asc(renovaciones::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(Some(Self::map_model(model, clients, renewals)))
    }

    pub async fn list_all(&self) -> Result<Vec<Advisor>> {
        let models = Asesores::find()
            .order_by_asc(asesores::Column::Id)
            .all(&self.conn)
            .await?;

        let mut clients: HashMap<String, Vec<String>> = HashMap::new();
        for row in AsesorClientes::find()
            .order_by_asc(asesor_clientes::Column::PrimerRegistro)
            .all(&self.conn)
            .await?
        {
            clients.entry(row.url_slug).or_default().push(row.cliente);
        }

        let mut renewals: HashMap<String, Vec<renovaciones::Model>> = HashMap::new();
        for row in Renovaciones::find()
            .order_by_asc(renovaciones::Column::Id)
            .all(&self.conn)
            .await?
        {
            renewals.entry(row.url_slug.clone()).or_default().push(row);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let c = clients.remove(&model.url_slug).unwrap_or_default();
                let r = renewals.remove(&model.url_slug).unwrap_or_default();
                Self::map_model(model, c, r)
            })
            .collect())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts a new advisor under the first free slug derived from `base`.
    ///
    /// The probe skips slugs that are visibly taken; the unique index on
    /// `url_slug` is what actually guarantees uniqueness, so losing an insert
    /// race just moves on to the next suffix.
    pub async fn insert(
        &self,
        input: &NewAdvisor,
        base: &str,
        now: DateTime<Utc>,
    ) -> Result<Advisor> {
        let expires_at = now
            .checked_add_signed(input.paid_days.as_duration())
            .context("Expiration date out of range")?;

        let mut attempt: u32 = 0;
        loop {
            let candidate = Slug::candidate(base, attempt);
            attempt += 1;

            if self.exists(candidate.as_str()).await? {
                continue;
            }

            let active_model = asesores::ActiveModel {
                url_slug: Set(candidate.to_string()),
                nombre: Set(input.name.clone()),
                email: Set(input.email.clone()),
                telefono: Set(input.phone.clone()),
                empresa: Set(input.company.clone()),
                estado: Set(AdvisorStatus::Active),
                fecha_inicio: Set(now),
                fecha_expiracion: Set(expires_at),
                dias_pagados: Set(input.paid_days.as_i32()),
                accesos_total: Set(0),
                cotizaciones_generadas: Set(0),
                ultimo_acceso: Set(None),
                fecha_cancelacion: Set(None),
                razon_cancelacion: Set(None),
                ..Default::default()
            };

            match Asesores::insert(active_model).exec(&self.conn).await {
                Ok(res) => {
                    info!("Created advisor {} ({})", input.name, candidate);
                    return Ok(Advisor {
                        id: res.last_insert_id,
                        slug: candidate.into_inner(),
                        name: input.name.clone(),
                        email: input.email.clone(),
                        phone: input.phone.clone(),
                        company: input.company.clone(),
                        status: AdvisorStatus::Active,
                        start_date: now,
                        expires_at,
                        paid_days: input.paid_days.as_i32(),
                        total_accesses: 0,
                        quotes_generated: 0,
                        unique_clients: Vec::new(),
                        last_access: None,
                        cancelled_at: None,
                        cancellation_reason: None,
                        renewals: Vec::new(),
                    });
                }
                Err(err) if Self::is_unique_violation(&err) => {
                    debug!("Slug {} taken concurrently, probing next", candidate);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Extends the expiration additively, reactivates the advisor and appends
    /// a renewal entry, all in one transaction. Any cancellation is cleared.
    /// Returns `None` when the slug does not exist.
    ///
    /// The reactivation update runs first so the transaction holds the write
    /// lock before it reads the current expiration.
    pub async fn renew(
        &self,
        slug: &str,
        days: DayCount,
        now: DateTime<Utc>,
    ) -> Result<Option<Renewal>> {
        let txn = self.conn.begin().await?;

        let reactivated = Asesores::update_many()
            .col_expr(
                asesores::Column::Estado,
                Expr::value(AdvisorStatus::Active.as_str()),
            )
            .col_expr(
                asesores::Column::FechaCancelacion,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(
                asesores::Column::RazonCancelacion,
                Expr::value(Option::<String>::None),
            )
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&txn)
            .await?;
        if reactivated.rows_affected == 0 {
            return Ok(None);
        }

        let model = Asesores::find()
            .filter(asesores::Column::UrlSlug.eq(slug))
            .one(&txn)
            .await?
            .context("Advisor vanished during renewal")?;

        let new_expiration = model
            .fecha_expiracion
            .checked_add_signed(days.as_duration())
            .context("Expiration date out of range")?;

        Asesores::update_many()
            .col_expr(
                asesores::Column::FechaExpiracion,
                Expr::value(new_expiration),
            )
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&txn)
            .await?;

        let renewal = renovaciones::ActiveModel {
            url_slug: Set(slug.to_string()),
            fecha: Set(now),
            dias: Set(days.as_i32()),
            nueva_expiracion: Set(new_expiration),
            ..Default::default()
        };
        Renovaciones::insert(renewal).exec(&txn).await?;

        txn.commit().await?;

        Ok(Some(Renewal {
            renewed_at: now,
            days: days.as_i32(),
            new_expiration,
        }))
    }

    /// Returns `false` when no advisor has that slug.
    pub async fn set_status(&self, slug: &str, status: AdvisorStatus) -> Result<bool> {
        let result = Asesores::update_many()
            .col_expr(asesores::Column::Estado, Expr::value(status.as_str()))
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn revoke(&self, slug: &str, reason: &str, now: DateTime<Utc>) -> Result<bool> {
        let result = Asesores::update_many()
            .col_expr(
                asesores::Column::Estado,
                Expr::value(AdvisorStatus::Revoked.as_str()),
            )
            .col_expr(asesores::Column::FechaCancelacion, Expr::value(now))
            .col_expr(asesores::Column::RazonCancelacion, Expr::value(reason))
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Asesores::find().count(&self.conn).await?)
    }
}
