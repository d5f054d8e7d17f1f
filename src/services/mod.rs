pub mod mapping_store;
pub mod mapping_store_impl;
pub use mapping_store::{MappingError, MappingPage, MappingStore};
pub use mapping_store_impl::SeaOrmMappingStore;

pub mod provider_search;
pub use provider_search::ProviderSearchClient;

pub mod title_resolver;
pub use title_resolver::TitleResolver;

pub mod episode_locator;
pub use episode_locator::EpisodeLocator;

pub mod stream_fetcher;
pub use stream_fetcher::StreamFetcher;

pub mod resolution;
pub use resolution::{
    ResolutionService, ResolveError, ResolveFailure, ResolveOutcome, StreamRequest,
};

#[cfg(test)]
pub mod test_support;
