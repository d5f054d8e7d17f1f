use crate::config::Config;
use crate::domain::{CatalogId, MediaType};
use crate::services::{ResolveError, StreamRequest};
use crate::state::SharedState;

pub async fn cmd_resolve(
    config: Config,
    catalog_id: CatalogId,
    movie: bool,
    season: Option<i32>,
    episode: Option<i32>,
    title: Option<String>,
) -> anyhow::Result<()> {
    let media_type = if movie {
        MediaType::Movie
    } else {
        MediaType::Series
    };

    let episode_number = match (media_type, episode) {
        (_, Some(e)) if e > 0 => e,
        (MediaType::Movie, None) => 1,
        _ => {
            println!("A positive --episode is required for series.");
            return Ok(());
        }
    };

    let state = SharedState::new(config).await?;
    let request = StreamRequest {
        catalog_id,
        media_type,
        season_number: season,
        episode_number,
        title,
    };

    match state.resolution.resolve_stream(request).await {
        Ok(stream) => {
            println!("✓ Provider ID: {}", stream.provider_id);
            if let Some(referer) = &stream.referer {
                println!("  Referer: {referer}");
            }
            println!("{:-<60}", "");
            for source in &stream.sources {
                let kind = if source.is_m3u8 { "hls" } else { "file" };
                println!("• [{}] ({kind}) {}", source.quality_label, source.url);
            }
        }
        Err(ResolveError::Failure(failure)) => {
            println!("✗ {} ({})", failure.user_message(), failure.reason());
        }
        Err(ResolveError::Internal(detail)) => {
            anyhow::bail!("Resolution failed: {detail}");
        }
    }

    Ok(())
}
