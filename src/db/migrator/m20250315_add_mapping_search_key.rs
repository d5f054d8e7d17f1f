use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("anime_mappings", "search_key").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(AnimeMappings::Table)
                        .add_column(
                            ColumnDef::new(AnimeMappings::SearchKey)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await?;

            // Existing rows get SQLite's ASCII-only fold; the next upsert
            // rewrites the key with full case folding.
            manager
                .get_connection()
                .execute_unprepared(
                    "UPDATE anime_mappings SET search_key = lower(title || char(10) || \
                     coalesce(original_title, '') || char(10) || provider_id)",
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(AnimeMappings::Table)
                    .drop_column(AnimeMappings::SearchKey)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum AnimeMappings {
    Table,
    SearchKey,
}
