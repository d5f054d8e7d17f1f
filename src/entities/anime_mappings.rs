use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime_mappings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub catalog_id: i32,
    /// "series" or "movie"
    pub media_type: String,
    pub provider_id: String,
    pub title: String,
    pub original_title: Option<String>,
    /// JSON array of `{season_number, provider_id}`
    #[sea_orm(column_type = "Text")]
    pub season_overrides: String,
    pub status: String,
    /// JSON object
    #[sea_orm(column_type = "Text")]
    pub metadata: String,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Lower-cased title, original title and provider id for list search
    #[sea_orm(column_type = "Text")]
    pub search_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
