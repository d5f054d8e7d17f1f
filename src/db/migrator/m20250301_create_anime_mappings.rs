use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnimeMappings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnimeMappings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnimeMappings::CatalogId).integer().not_null())
                    .col(
                        ColumnDef::new(AnimeMappings::MediaType)
                            .string()
                            .not_null()
                            .default("series"),
                    )
                    .col(ColumnDef::new(AnimeMappings::ProviderId).string().not_null())
                    .col(ColumnDef::new(AnimeMappings::Title).string().not_null())
                    .col(ColumnDef::new(AnimeMappings::OriginalTitle).string().null())
                    .col(
                        ColumnDef::new(AnimeMappings::SeasonOverrides)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(AnimeMappings::Status)
                            .string()
                            .not_null()
                            .default("unverified"),
                    )
                    .col(
                        ColumnDef::new(AnimeMappings::Metadata)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ColumnDef::new(AnimeMappings::CreatedBy).string().null())
                    .col(ColumnDef::new(AnimeMappings::CreatedAt).string().not_null())
                    .col(ColumnDef::new(AnimeMappings::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_anime_mappings_catalog_media_unique")
                    .table(AnimeMappings::Table)
                    .col(AnimeMappings::CatalogId)
                    .col(AnimeMappings::MediaType)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_anime_mappings_provider_id")
                    .table(AnimeMappings::Table)
                    .col(AnimeMappings::ProviderId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnimeMappings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnimeMappings {
    Table,
    Id,
    CatalogId,
    MediaType,
    ProviderId,
    Title,
    OriginalTitle,
    SeasonOverrides,
    Status,
    Metadata,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
