//! CLI entry point for headless-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use headless_blog::config::SiteConfig;
use headless_blog::store::{ContentStore, HttpStore, MemoryStore};
use headless_blog::{commands, Blog};

#[derive(Parser)]
#[command(name = "headless-blog")]
#[command(version)]
#[command(about = "A server-rendered blog backed by a headless CMS", long_about = None)]
struct Cli {
    /// Directory holding _config.yml (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Read content from a local JSON fixture file instead of the remote store
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (posts, featured, authors, categories)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Show a single post or author
    Show {
        /// post or author
        r#type: String,

        /// Slug to look up
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "headless_blog=debug,tower_http=debug,info"
    } else {
        "headless_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Version = cli.command {
        println!("headless-blog version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let config = SiteConfig::load_from_dir(&base_dir)?;

    // The store client is built once and shared by every request
    let store: Arc<dyn ContentStore> = match &cli.fixtures {
        Some(path) => Arc::new(MemoryStore::from_file(path)?),
        None => Arc::new(HttpStore::new(&config.store)?),
    };
    tracing::debug!("Using {:?}", config.store);

    let blog = Blog::new(config, store);

    match cli.command {
        Commands::Serve { port, ip } => commands::serve::run(&blog, &ip, port).await?,
        Commands::List { r#type } => commands::list::run(&blog, &r#type).await?,
        Commands::Show { r#type, slug } => commands::show::run(&blog, &r#type, &slug).await?,
        Commands::Version => {}
    }

    Ok(())
}
