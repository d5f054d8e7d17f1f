pub mod prelude;

pub mod anime_mappings;
