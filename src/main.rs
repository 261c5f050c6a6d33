use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use feedsync::config::Config;
use feedsync::feed::{sync_all, SyncOptions};
use feedsync::storage::Database;
use feedsync::util::{extract_domain, is_valid_rss_path, normalize_url, validate_title};

/// Get the config directory path (~/.config/feedsync/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedsync"))
}

#[derive(Parser, Debug)]
#[command(
    name = "feedsync",
    about = "Fetches RSS/Atom feeds and stores new posts locally"
)]
struct Args {
    /// Subscribe to a feed URL (schemeless URLs get https://)
    #[arg(long, value_name = "URL")]
    add: Option<String>,

    /// Display name for --add; defaults to the feed's domain
    #[arg(long, value_name = "TITLE", requires = "add")]
    title: Option<String>,

    /// Unsubscribe from a feed by id
    #[arg(long, value_name = "ID")]
    remove: Option<i64>,

    /// List subscriptions with unread counts instead of syncing
    #[arg(long)]
    list: bool,

    /// Database file (overrides config)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let config = Config::load(&config_dir.join("config.toml")).context("Invalid config file")?;

    let db_path = args
        .db
        .clone()
        .or_else(|| {
            if config.database_path.is_empty() {
                None
            } else {
                Some(PathBuf::from(&config.database_path))
            }
        })
        .unwrap_or_else(|| config_dir.join("feedsync.db"));
    let db_path = db_path.to_string_lossy();

    // Store construction failure is the one fatal error class
    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    if let Some(raw_url) = &args.add {
        let url = normalize_url(raw_url).context("Invalid feed URL")?;
        let looks_like_feed = url::Url::parse(&url)
            .map(|u| is_valid_rss_path(u.path()))
            .unwrap_or(false);
        if !looks_like_feed {
            tracing::debug!(url = %url, "URL does not look like a feed path, adding anyway");
        }
        let title = match &args.title {
            Some(title) => {
                validate_title(title).context("Invalid feed title")?;
                title.trim().to_string()
            }
            None => extract_domain(&url).context("Invalid feed URL")?,
        };
        let id = db.add_feed(&url, &title).await?;
        println!("Subscribed to {} ({}) with id {}", title, url, id);
        return Ok(());
    }

    if let Some(id) = args.remove {
        db.delete_feed(id).await?;
        println!("Removed feed {}", id);
        return Ok(());
    }

    if args.list {
        let feeds = db.get_feeds().await?;
        if feeds.is_empty() {
            println!("No subscriptions. Add one with --add <URL>.");
            return Ok(());
        }
        for mut feed in feeds {
            feed.posts = db.get_posts(feed.id).await?;
            println!(
                "{:>4}  {} ({}): {} unread of {}",
                feed.id,
                feed.title,
                feed.url,
                feed.unread_count(),
                feed.posts.len()
            );
        }
        return Ok(());
    }

    // Default action: one sync pass over all subscriptions
    let client = reqwest::Client::new();
    let outcomes = sync_all(
        &db,
        &client,
        &SyncOptions {
            max_description_length: config.max_description_length,
            fetch_timeout: std::time::Duration::from_secs(config.fetch_timeout_secs),
        },
    )
    .await?;

    if outcomes.is_empty() {
        println!("No subscriptions. Add one with --add <URL>.");
        return Ok(());
    }

    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(inserted) => println!("{}: {} new posts", outcome.title, inserted),
            Err(e) => {
                failures += 1;
                println!("{}: {}", outcome.title, e);
            }
        }
    }
    println!(
        "Synced {} feeds ({} failed) at {}",
        outcomes.len(),
        failures,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}
