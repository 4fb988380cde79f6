use crate::domain::AdvisorStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "asesores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub url_slug: String,

    pub nombre: String,

    pub email: String,

    pub telefono: String,

    pub empresa: String,

    pub estado: AdvisorStatus,

    pub fecha_inicio: DateTimeUtc,

    pub fecha_expiracion: DateTimeUtc,

    pub dias_pagados: i32,

    pub accesos_total: i64,

    pub cotizaciones_generadas: i64,

    pub ultimo_acceso: Option<DateTimeUtc>,

    pub fecha_cancelacion: Option<DateTimeUtc>,

    pub razon_cancelacion: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::asesor_clientes::Entity")]
    AsesorClientes,
    #[sea_orm(has_many = "super::renovaciones::Entity")]
    Renovaciones,
}

impl Related<super::asesor_clientes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AsesorClientes.def()
    }
}

impl Related<super::renovaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Renovaciones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
