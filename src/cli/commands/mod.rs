mod mappings;
mod resolve;
mod search;

pub use mappings::{cmd_mapping_add, cmd_mapping_remove, cmd_mapping_verify, cmd_mappings_list};
pub use resolve::cmd_resolve;
pub use search::cmd_search_provider;
