use crate::clients::ConsumetClient;
use crate::config::Config;
use crate::services::ProviderSearchClient;
use std::sync::Arc;

pub async fn cmd_search_provider(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Searching {} for: {query}", config.provider.provider);

    let client = Arc::new(ConsumetClient::new(&config.provider)?);
    let search = ProviderSearchClient::new(client, config.provider.request_timeout());
    let results = search.search(query).await;

    if results.is_empty() {
        println!("No provider entries found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for candidate in results.iter().take(20) {
        println!("• {}", candidate.display_title);
        println!("  Provider ID: {}", candidate.provider_id);
    }

    println!();
    println!("To map an entry: anistream mappings add <catalog_id> <provider_id> \"<title>\"");

    Ok(())
}
