//! CLI entry point for wildcat

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wildcat::commands;
use wildcat::config::SiteConfig;
use wildcat::Wildcat;

#[derive(Parser)]
#[command(name = "wildcat")]
#[command(version)]
#[command(about = "Render blog posts and JSON Feed items from source files", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Site configuration file (defaults to <site>/_config.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one post to HTML
    #[command(alias = "r")]
    Render {
        /// Source file of the post
        file: PathBuf,

        /// Permalink of the post
        #[arg(short, long)]
        permalink: String,

        /// Render the listing variant, linking to the permalink
        #[arg(short = 'l', long)]
        including_link: bool,
    },

    /// Print the JSON Feed item for one post
    FeedItem {
        /// Source file of the post
        file: PathBuf,

        /// Permalink of the post
        #[arg(short, long)]
        permalink: String,
    },

    /// Print a JSON Feed document for the given posts, in order
    Feed {
        /// Posts as FILE=PERMALINK
        #[arg(required = true, value_parser = commands::feed::parse_entry)]
        entries: Vec<(PathBuf, String)>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "wildcat=debug,info"
    } else {
        "wildcat=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let open_site = || -> Result<Wildcat> {
        match &cli.config {
            Some(path) => Wildcat::with_config(&base_dir, SiteConfig::load(path)?),
            None => Wildcat::new(&base_dir),
        }
    };

    match cli.command {
        Commands::Render {
            ref file,
            ref permalink,
            including_link,
        } => {
            let site = open_site()?;
            tracing::debug!("Rendering {:?} as {}", file, permalink);
            println!(
                "{}",
                commands::render::run(&site, file, permalink, including_link)?
            );
        }

        Commands::FeedItem {
            ref file,
            ref permalink,
        } => {
            let site = open_site()?;
            println!("{}", commands::feed::item(&site, file, permalink)?);
        }

        Commands::Feed { ref entries } => {
            let site = open_site()?;
            println!("{}", commands::feed::document(&site, entries)?);
        }

        Commands::Version => {
            println!("wildcat version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
