pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, MappingCommands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = init_metrics(&config)?;
    init_tracing(&config)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server(config, prometheus_handle).await,

        Some(Commands::Resolve {
            catalog_id,
            movie,
            season,
            episode,
            title,
        }) => cli::cmd_resolve(config, catalog_id, movie, season, episode, title).await,

        Some(Commands::Search { query }) => {
            cli::cmd_search_provider(&config, &query.join(" ")).await
        }

        Some(Commands::Mappings { command }) => match command {
            MappingCommands::List {
                status,
                media_type,
                search,
                page,
                limit,
            } => {
                cli::cmd_mappings_list(
                    &config,
                    status.as_deref(),
                    media_type.as_deref(),
                    search,
                    page,
                    limit,
                )
                .await
            }
            MappingCommands::Add {
                catalog_id,
                provider_id,
                title,
                movie,
                season_overrides,
                created_by,
            } => {
                cli::cmd_mapping_add(
                    &config,
                    catalog_id,
                    &provider_id,
                    &title,
                    movie,
                    season_overrides,
                    created_by,
                )
                .await
            }
            MappingCommands::Remove { catalog_id, movie } => {
                cli::cmd_mapping_remove(&config, catalog_id, movie).await
            }
            MappingCommands::Verify { catalog_id, movie } => {
                cli::cmd_mapping_verify(&config, catalog_id, movie).await
            }
        },

        Some(Commands::Init) => Ok(()),
    }
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "anistream")?
            .extra_field("provider", config.provider.provider.clone())?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Anistream v{} starting...", env!("CARGO_PKG_VERSION"));

    let port = config.server.port;
    let api_state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(api_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web API running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
