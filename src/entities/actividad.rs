use crate::domain::ActivityKind;
use sea_orm::entity::prelude::*;

/// Append-only log of landing page visits and generated quotations.
///
/// `url_slug` is a plain reference, not a foreign key: the log outlives
/// whatever happens to the advisor row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "actividad")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub url_slug: String,

    pub tipo: ActivityKind,

    pub fecha: DateTimeUtc,

    pub cliente_nombre: Option<String>,

    pub cliente_email: Option<String>,

    pub ip: Option<String>,

    pub plan1: Option<String>,

    pub plan2: Option<String>,

    pub monto: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
