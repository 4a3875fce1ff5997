//! CLI entry point for repo-cms

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repo-cms")]
#[command(version)]
#[command(about = "A database-free CMS that stores its content in a GitHub repository", long_about = None)]
struct Cli {
    /// Configuration file (optional, environment variables override it)
    #[arg(short, long, global = true, default_value = "cms.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    #[command(alias = "s")]
    Serve {
        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Rebuild the article index from the Markdown directory
    Sync,

    /// List stored content
    List {
        /// Type of content to list (articles, resources, categories)
        #[arg(default_value = "articles")]
        r#type: String,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Slug for the file name (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "repo_cms=debug,info"
    } else {
        "repo_cms=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Version = cli.command {
        println!("repo-cms version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cms = repo_cms::Cms::load(&cli.config)?;

    match cli.command {
        Commands::Serve { ip, port } => {
            cms.config.validate_for_server()?;
            let ip = ip.unwrap_or_else(|| cms.config.server.ip.clone());
            let port = port.unwrap_or(cms.config.server.port);

            tracing::info!(
                "Serving {}/{} at http://{}:{}",
                cms.config.github.owner,
                cms.config.github.repo,
                ip,
                port
            );
            repo_cms::server::start(cms, &ip, port).await?;
        }

        Commands::Sync => {
            cms.config.validate()?;
            tracing::info!("Syncing articles...");
            repo_cms::commands::sync::run(&cms).await?;
        }

        Commands::List { r#type } => {
            cms.config.validate()?;
            repo_cms::commands::list::run(&cms, &r#type).await?;
        }

        Commands::New {
            title,
            slug,
            description,
        } => {
            cms.config.validate()?;
            tracing::info!("Creating new article with title: {}", title);
            repo_cms::commands::new::create_article(
                &cms,
                &title,
                slug.as_deref(),
                description.as_deref(),
            )
            .await?;
        }

        Commands::Version => {}
    }

    Ok(())
}
