use crate::domain::ActivityKind;
use crate::entities::{actividad, asesor_clientes, asesores, prelude::*};
use crate::models::activity::{AccessInput, ActivityEvent, QuotationInput, client_identity};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Fallback client name for visits that don't identify themselves.
pub const ANONYMOUS_CLIENT: &str = "anónimo";

/// Repository for the append-only activity log and the counters it feeds.
///
/// Recording transactions must open with a write (the counter update). A
/// SQLite transaction that reads first cannot wait for the write lock later.
pub struct ActivityRepository {
    conn: DatabaseConnection,
}

impl ActivityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: actividad::Model) -> ActivityEvent {
        ActivityEvent {
            id: m.id,
            slug: m.url_slug,
            kind: m.tipo,
            occurred_at: m.fecha,
            client_name: m.cliente_nombre,
            client_email: m.cliente_email,
            ip: m.ip,
            plan1: m.plan1,
            plan2: m.plan2,
            amount: m.monto,
        }
    }

    /// Adds a client to the advisor's unique-client set; duplicates are
    /// absorbed by the primary key.
    async fn add_client<C: ConnectionTrait>(
        conn: &C,
        slug: &str,
        client: String,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let row = asesor_clientes::ActiveModel {
            url_slug: Set(slug.to_string()),
            cliente: Set(client),
            primer_registro: Set(now),
        };

        AsesorClientes::insert(row)
            .on_conflict(
                OnConflict::columns([
                    asesor_clientes::Column::UrlSlug,
                    asesor_clientes::Column::Cliente,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(())
    }

    /// Records a landing page visit. Returns `false` if the advisor does not exist.
    pub async fn record_access(
        &self,
        slug: &str,
        input: &AccessInput,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let bumped = Asesores::update_many()
            .col_expr(
                asesores::Column::AccesosTotal,
                Expr::col(asesores::Column::AccesosTotal).add(1),
            )
            .col_expr(asesores::Column::UltimoAcceso, Expr::value(now))
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&txn)
            .await?;
        if bumped.rows_affected == 0 {
            return Ok(false);
        }

        let event = actividad::ActiveModel {
            url_slug: Set(slug.to_string()),
            tipo: Set(ActivityKind::Access),
            fecha: Set(now),
            cliente_nombre: Set(Some(
                input
                    .client_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string()),
            )),
            cliente_email: Set(input.client_email.clone()),
            ip: Set(Some(input.ip.clone())),
            plan1: Set(None),
            plan2: Set(None),
            monto: Set(None),
            ..Default::default()
        };
        Actividad::insert(event).exec(&txn).await?;

        let client = client_identity(input.client_email.as_deref(), &input.ip);
        Self::add_client(&txn, slug, client, now).await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Records a generated quotation. Returns `false` if the advisor does not exist.
    pub async fn record_quotation(
        &self,
        slug: &str,
        input: &QuotationInput,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let bumped = Asesores::update_many()
            .col_expr(
                asesores::Column::CotizacionesGeneradas,
                Expr::col(asesores::Column::CotizacionesGeneradas).add(1),
            )
            .filter(asesores::Column::UrlSlug.eq(slug))
            .exec(&txn)
            .await?;
        if bumped.rows_affected == 0 {
            return Ok(false);
        }

        let event = actividad::ActiveModel {
            url_slug: Set(slug.to_string()),
            tipo: Set(ActivityKind::Quotation),
            fecha: Set(now),
            cliente_nombre: Set(input.client_name.clone()),
            cliente_email: Set(input.client_email.clone()),
            ip: Set(Some(input.ip.clone())),
            plan1: Set(input.plan1.clone()),
            plan2: Set(input.plan2.clone()),
            monto: Set(input.amount),
            ..Default::default()
        };
        Actividad::insert(event).exec(&txn).await?;

        let client = client_identity(input.client_email.as_deref(), &input.ip);
        Self::add_client(&txn, slug, client, now).await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Most recent events first; events sharing a timestamp keep insertion order reversed.
    pub async fn list_recent(&self, slug: &str, limit: u64) -> Result<Vec<ActivityEvent>> {
        let rows = Actividad::find()
            .filter(actividad::Column::UrlSlug.eq(slug))
            .order_by_desc(actividad::Column::Fecha)
            .order_by_desc(actividad::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count_for(&self, slug: &str) -> Result<u64> {
        Ok(Actividad::find()
            .filter(actividad::Column::UrlSlug.eq(slug))
            .count(&self.conn)
            .await?)
    }
}
