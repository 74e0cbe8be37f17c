use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storynest::api::ApiClient;
use storynest::config::Config;
use storynest::model::StoryList;
use storynest::session;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting storynest demo client");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(api_base_url = %config.api_base_url, "Configuration loaded");

    let client = ApiClient::from_config(&config);

    let list = StoryList::fetch(&client)
        .await
        .context("Failed to fetch stories")?;
    info!(count = list.stories.len(), "Fetched story list");

    // Favorites membership is computed from the user, not stored on the
    // story, so the merge happens here at presentation time.
    let user = match (
        config.demo_username.as_deref(),
        config.demo_password.as_deref(),
    ) {
        (Some(username), Some(password)) => {
            let user = session::login(&client, username, password)
                .await
                .context("Login failed")?;
            info!(
                username = %user.username,
                favorites = user.favorites().len(),
                own_stories = user.own_stories.len(),
                "Authenticated"
            );
            Some(user)
        }
        _ => {
            warn!("STORYNEST_USERNAME/STORYNEST_PASSWORD not set; listing without favorites");
            None
        }
    };

    for story in &list.stories {
        let marker = match &user {
            Some(u) if u.is_favorite(&story.story_id) => "*",
            _ => " ",
        };
        println!(
            "{marker} {} ({}) by {} [posted by {}]",
            story.title,
            story.host_or_placeholder(),
            story.author,
            story.username
        );
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,storynest=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Pretty-printed logging for development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
