//! CLI module - Command-line interface for Anistream
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::CatalogId;
use crate::models::mapping::SeasonOverride;

/// Anistream - stream resolution for anime catalogs
/// Maps catalog ids to streaming-provider entries and fetches playable sources
#[derive(Parser)]
#[command(name = "anistream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API server (default)
    #[command(alias = "web")]
    Serve,

    /// Resolve playable sources for one catalog entry
    #[command(alias = "r")]
    Resolve {
        /// Catalog ID
        #[arg(value_parser = parse_catalog_id)]
        catalog_id: CatalogId,
        /// Treat the entry as a movie
        #[arg(long)]
        movie: bool,
        /// Season number, for season overrides
        #[arg(long)]
        season: Option<i32>,
        /// Episode number (defaults to 1 for movies)
        #[arg(long)]
        episode: Option<i32>,
        /// Title used to discover the provider entry when no mapping exists
        #[arg(long)]
        title: Option<String>,
    },

    /// Search the streaming provider catalog
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Manage catalog-to-provider mappings
    #[command(alias = "m")]
    Mappings {
        #[command(subcommand)]
        command: MappingCommands,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum MappingCommands {
    /// List stored mappings
    #[command(alias = "ls")]
    List {
        /// Filter by status (verified, unverified)
        #[arg(long)]
        status: Option<String>,
        /// Filter by media type (series, movie)
        #[arg(long)]
        media_type: Option<String>,
        /// Case-insensitive match on title, original title or provider id
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u64,
        #[arg(long, default_value = "20")]
        limit: u64,
    },

    /// Create or update a mapping
    Add {
        /// Catalog ID
        #[arg(value_parser = parse_catalog_id)]
        catalog_id: CatalogId,
        /// Provider ID
        provider_id: String,
        /// Title
        title: String,
        /// Map a movie instead of a series
        #[arg(long)]
        movie: bool,
        /// Per-season provider id, as SEASON=PROVIDER_ID (repeatable)
        #[arg(long = "season-override", value_parser = parse_season_override)]
        season_overrides: Vec<SeasonOverride>,
        /// Operator name recorded as creator
        #[arg(long)]
        created_by: Option<String>,
    },

    /// Delete a mapping
    #[command(alias = "rm")]
    Remove {
        /// Catalog ID
        #[arg(value_parser = parse_catalog_id)]
        catalog_id: CatalogId,
        #[arg(long)]
        movie: bool,
    },

    /// Mark a mapping as verified
    Verify {
        /// Catalog ID
        #[arg(value_parser = parse_catalog_id)]
        catalog_id: CatalogId,
        #[arg(long)]
        movie: bool,
    },
}

/// Catalog ids are non-negative.
pub fn parse_catalog_id(value: &str) -> Result<CatalogId, String> {
    let id: i32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid catalog ID: '{value}'"))?;
    CatalogId::try_from(id)
}

/// Parses `2=example-show-season-2`.
pub fn parse_season_override(value: &str) -> Result<SeasonOverride, String> {
    let (season, provider_id) = value
        .split_once('=')
        .ok_or_else(|| format!("Expected SEASON=PROVIDER_ID, got '{value}'"))?;

    let season_number: i32 = season
        .trim()
        .parse()
        .map_err(|_| format!("Invalid season number: '{season}'"))?;
    if season_number < 0 {
        return Err(format!("Season number must not be negative: {season_number}"));
    }

    let provider_id = provider_id.trim();
    if provider_id.is_empty() {
        return Err("Provider ID cannot be empty".to_string());
    }

    Ok(SeasonOverride {
        season_number,
        provider_id: provider_id.to_string(),
    })
}

pub use commands::*;
