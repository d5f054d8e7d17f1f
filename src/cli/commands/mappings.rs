use crate::config::Config;
use crate::db::Store;
use crate::domain::{CatalogId, MappingStatus, MediaType};
use crate::models::mapping::{MappingFilter, MappingInput, SeasonOverride};
use crate::services::{MappingError, MappingStore, SeaOrmMappingStore};

async fn open_store(config: &Config) -> anyhow::Result<SeaOrmMappingStore> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(SeaOrmMappingStore::new(store))
}

const fn media_type(movie: bool) -> MediaType {
    if movie { MediaType::Movie } else { MediaType::Series }
}

pub async fn cmd_mappings_list(
    config: &Config,
    status: Option<&str>,
    media_type: Option<&str>,
    search: Option<String>,
    page: u64,
    limit: u64,
) -> anyhow::Result<()> {
    let filter = MappingFilter {
        status: status
            .map(str::parse::<MappingStatus>)
            .transpose()
            .map_err(anyhow::Error::msg)?,
        media_type: media_type
            .map(str::parse::<MediaType>)
            .transpose()
            .map_err(anyhow::Error::msg)?,
        search,
    };

    let store = open_store(config).await?;
    let result = store.list_all(&filter, page.max(1), limit.max(1)).await?;

    if result.items.is_empty() {
        println!("No mappings found.");
        return Ok(());
    }

    println!(
        "Mappings (page {}, {} of {} total)",
        page.max(1),
        result.items.len(),
        result.total
    );
    println!("{:-<70}", "");

    for mapping in result.items {
        let status_indicator = match mapping.status {
            MappingStatus::Verified => "✓",
            MappingStatus::Unverified => "?",
        };

        println!("{status_indicator} {} [{}]", mapping.title, mapping.media_type);
        println!(
            "  Catalog ID: {} | Provider ID: {}",
            mapping.catalog_id, mapping.provider_id
        );
        for o in &mapping.season_overrides {
            println!("  Season {}: {}", o.season_number, o.provider_id);
        }
    }

    println!();
    println!("Legend: ✓ Verified | ? Unverified");

    Ok(())
}

pub async fn cmd_mapping_add(
    config: &Config,
    catalog_id: CatalogId,
    provider_id: &str,
    title: &str,
    movie: bool,
    season_overrides: Vec<SeasonOverride>,
    created_by: Option<String>,
) -> anyhow::Result<()> {
    let mut input = MappingInput::new(
        catalog_id,
        media_type(movie),
        provider_id,
        title,
    );
    if !season_overrides.is_empty() {
        input.season_overrides = Some(season_overrides);
    }
    input.created_by = created_by;

    let store = open_store(config).await?;
    match store.upsert(input).await {
        Ok(mapping) => {
            println!(
                "✓ Mapped {} ({}) → {}",
                mapping.catalog_id, mapping.media_type, mapping.provider_id
            );
        }
        Err(MappingError::Validation(msg)) => println!("Invalid mapping: {msg}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_mapping_remove(
    config: &Config,
    catalog_id: CatalogId,
    movie: bool,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let media_type = media_type(movie);

    match store.remove(catalog_id, media_type).await {
        Ok(()) => println!("✓ Removed mapping for {catalog_id} ({media_type})"),
        Err(MappingError::NotFound { .. }) => {
            println!("No mapping for catalog ID {catalog_id} ({media_type}).");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_mapping_verify(
    config: &Config,
    catalog_id: CatalogId,
    movie: bool,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let media_type = media_type(movie);

    match store
        .mark_verified(catalog_id, media_type)
        .await
    {
        Ok(mapping) => println!("✓ Verified: {} → {}", mapping.title, mapping.provider_id),
        Err(MappingError::NotFound { .. }) => {
            println!("No mapping for catalog ID {catalog_id} ({media_type}).");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
