use crate::entities::{actividad, asesores, prelude::*, renovaciones};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_asesores_fecha_expiracion")
                    .table(Asesores)
                    .col(asesores::Column::FechaExpiracion)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_renovaciones_url_slug")
                    .table(Renovaciones)
                    .col(renovaciones::Column::UrlSlug)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Activity listing filters by slug and sorts by date descending.
        manager
            .create_index(
                Index::create()
                    .name("idx_actividad_url_slug_fecha")
                    .table(Actividad)
                    .col(actividad::Column::UrlSlug)
                    .col(actividad::Column::Fecha)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_actividad_url_slug_fecha")
                    .table(Actividad)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_renovaciones_url_slug")
                    .table(Renovaciones)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_asesores_fecha_expiracion")
                    .table(Asesores)
                    .to_owned(),
            )
            .await
    }
}
