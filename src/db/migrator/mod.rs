use sea_orm_migration::prelude::*;

mod m20250301_create_anime_mappings;
mod m20250315_add_mapping_search_key;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_create_anime_mappings::Migration),
            Box::new(m20250315_add_mapping_search_key::Migration),
        ]
    }
}
