use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "renovaciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub url_slug: String,

    pub fecha: DateTimeUtc,

    pub dias: i32,

    pub nueva_expiracion: DateTimeUtc,
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
