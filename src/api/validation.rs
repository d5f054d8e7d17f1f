use super::ApiError;
use crate::domain::{CatalogId, MappingStatus, MediaType};

pub fn validate_catalog_id(id: i32) -> Result<CatalogId, ApiError> {
    CatalogId::try_from(id).map_err(|_| {
        ApiError::validation(format!(
            "Invalid catalog ID: {id}. ID must be a non-negative integer"
        ))
    })
}

pub fn validate_episode_number(episode: i32) -> Result<i32, ApiError> {
    if episode <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid episode number: {episode}. Episode must be a positive integer"
        )));
    }
    Ok(episode)
}

/// Season 0 holds specials.
pub fn validate_season_number(season: Option<i32>) -> Result<Option<i32>, ApiError> {
    match season {
        Some(s) if s < 0 => Err(ApiError::validation(format!(
            "Invalid season number: {s}. Season must not be negative"
        ))),
        other => Ok(other),
    }
}

/// Movies are listed by providers as a single episode, so the number is
/// optional for them and defaults to 1.
pub fn resolve_episode_number(
    media_type: MediaType,
    episode: Option<i32>,
) -> Result<i32, ApiError> {
    match (media_type, episode) {
        (_, Some(episode)) => validate_episode_number(episode),
        (MediaType::Movie, None) => Ok(1),
        (MediaType::Series, None) => Err(ApiError::validation(
            "episode_number is required for series",
        )),
    }
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MAX_LIMIT: u64 = 200;
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_LIMIT}"
        )));
    }
    Ok(limit)
}

pub fn validate_page(page: u64) -> Result<u64, ApiError> {
    if page == 0 {
        return Err(ApiError::validation("Invalid page: pages start at 1"));
    }
    Ok(page)
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

/// Missing or blank means `series`.
pub fn parse_media_type(value: Option<&str>) -> Result<MediaType, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(MediaType::default()),
        Some(v) => v.parse().map_err(ApiError::validation),
    }
}

pub fn parse_optional_media_type(value: Option<&str>) -> Result<Option<MediaType>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(ApiError::validation),
    }
}

pub fn parse_status(value: Option<&str>) -> Result<Option<MappingStatus>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(ApiError::validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_catalog_id() {
        assert_eq!(validate_catalog_id(500).unwrap(), CatalogId::new(500));
        assert!(validate_catalog_id(0).is_ok());
        assert!(validate_catalog_id(-1).is_err());
    }

    #[test]
    fn test_resolve_episode_number() {
        assert_eq!(resolve_episode_number(MediaType::Movie, None).unwrap(), 1);
        assert_eq!(resolve_episode_number(MediaType::Series, Some(3)).unwrap(), 3);
        assert!(resolve_episode_number(MediaType::Series, None).is_err());
        assert!(resolve_episode_number(MediaType::Series, Some(0)).is_err());
    }

    #[test]
    fn test_validate_season_number() {
        assert_eq!(validate_season_number(None).unwrap(), None);
        assert_eq!(validate_season_number(Some(0)).unwrap(), Some(0));
        assert!(validate_season_number(Some(-2)).is_err());
    }

    #[test]
    fn test_validate_limit_and_page() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(200).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(201).is_err());
        assert!(validate_page(0).is_err());
        assert!(validate_page(3).is_ok());
    }

    #[test]
    fn test_parse_media_type() {
        assert_eq!(parse_media_type(None).unwrap(), MediaType::Series);
        assert_eq!(parse_media_type(Some("tv")).unwrap(), MediaType::Series);
        assert_eq!(parse_media_type(Some("movie")).unwrap(), MediaType::Movie);
        assert!(parse_media_type(Some("ova")).is_err());
        assert_eq!(parse_optional_media_type(Some(" ")).unwrap(), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(
            parse_status(Some("verified")).unwrap(),
            Some(MappingStatus::Verified)
        );
        assert!(parse_status(Some("pending")).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  Sample Anime ").unwrap(), "Sample Anime");
        assert!(validate_search_query("   ").is_err());
    }
}
