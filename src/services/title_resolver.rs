//! Best-effort discovery of a provider id from a free-text title.
//!
//! The chain relaxes the query step by step and trusts the provider's
//! ranking on the first non-empty result. Anything learned here is stored
//! as unverified.

use crate::services::provider_search::ProviderSearchClient;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

fn parenthetical_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"\s*\([^)]*\)\s*")
}

fn season_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"(?i)\bseason\s+\d+\b")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"Example Show (2021)"` → `"Example Show"`.
#[must_use]
pub fn strip_parentheticals(title: &str) -> String {
    collapse_whitespace(&parenthetical_regex().replace_all(title, " "))
}

/// `"Example Show Season 2"` → `"Example Show"`.
#[must_use]
pub fn strip_season_token(title: &str) -> String {
    collapse_whitespace(&season_regex().replace_all(title, " "))
}

/// Queries tried for `title`, in order, without blanks or repeats.
#[must_use]
pub fn query_chain(title: &str) -> Vec<String> {
    let attempts = [
        title.trim().to_string(),
        strip_parentheticals(title),
        strip_season_token(title),
    ];

    let mut queries: Vec<String> = Vec::with_capacity(attempts.len());
    for query in attempts {
        if !query.is_empty() && !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}

#[derive(Clone)]
pub struct TitleResolver {
    search: ProviderSearchClient,
}

impl TitleResolver {
    #[must_use]
    pub const fn new(search: ProviderSearchClient) -> Self {
        Self { search }
    }

    /// First candidate's provider id from the first query that finds
    /// anything, or `None` once every relaxation came back empty.
    pub async fn resolve_by_title(&self, title: &str) -> Option<String> {
        for (attempt, query) in query_chain(title).into_iter().enumerate() {
            let candidates = self.search.search(&query).await;

            if let Some(first) = candidates.into_iter().next() {
                info!(
                    title,
                    query = %query,
                    attempt = attempt + 1,
                    provider_id = %first.provider_id,
                    display_title = %first.display_title,
                    "Title resolved"
                );
                return Some(first.provider_id);
            }

            debug!(title, query = %query, "No candidates, relaxing query");
        }

        info!(title, "Title not resolvable");
        None
    }
}
