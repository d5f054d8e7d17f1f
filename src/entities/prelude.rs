pub use super::anime_mappings::Entity as AnimeMappings;
