use sea_orm::entity::prelude::*;

/// Unique client identifiers (email or IP) per advisor. The composite primary
/// key gives the collection set semantics.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "asesor_clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub url_slug: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub cliente: String,

    pub primer_registro: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asesores::Entity",
        from = "Column::UrlSlug",
        to = "super::asesores::Column::UrlSlug",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Asesores,
}

impl Related<super::asesores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asesores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
