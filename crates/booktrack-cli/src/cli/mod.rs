//! CLI entry and dispatch.

use anyhow::{Context, Result};
use booktrack_core::api::ReadingStatus;
use booktrack_core::config;
use booktrack_core::logging;
use booktrack_core::view::{CatalogSort, SortKey, StatusFilter};
use clap::Parser;

mod commands;

/// Default log filter for one-shot commands; stdout carries the output.
const CLI_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "booktrack")]
#[command(version)]
#[command(about = "Track the books you want to read, are reading and have read")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account
    Register(CredentialArgs),
    /// Log in and persist the session token
    Login(CredentialArgs),
    /// Forget the persisted session (no network call)
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse and extend the shared catalog
    Books {
        #[command(subcommand)]
        command: BooksCommands,
    },
    /// Manage your personal collection
    #[command(name = "mybooks")]
    MyBooks {
        #[command(subcommand)]
        command: MyBooksCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct CredentialArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "BOOKTRACK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(clap::Subcommand)]
enum BooksCommands {
    /// List the catalog
    List {
        /// Case-insensitive match on title or author
        #[arg(long)]
        search: Option<String>,
        /// listed, title or author
        #[arg(long, default_value = "listed")]
        sort: CatalogSort,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a book to the catalog
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,
        /// Mark the book as not available for reading
        #[arg(long)]
        unavailable: bool,
    },
}

#[derive(clap::Subcommand)]
enum MyBooksCommands {
    /// List your collection
    List {
        /// all, want-to-read, currently-reading, read or dropped
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Case-insensitive match on title or author
        #[arg(long)]
        search: Option<String>,
        /// title, author, status, rating or date
        #[arg(long)]
        sort: Option<SortKey>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a catalog book to your collection
    Add {
        #[arg(value_name = "BOOK_ID")]
        book_id: String,
    },
    /// Set the reading status of a tracked book
    Status {
        #[arg(value_name = "BOOK_ID")]
        book_id: String,
        /// want-to-read, currently-reading, read or dropped
        #[arg(value_name = "STATUS")]
        status: ReadingStatus,
    },
    /// Rate a tracked book (0 clears the rating)
    Rate {
        #[arg(value_name = "BOOK_ID")]
        book_id: String,
        #[arg(value_name = "RATING", value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,
    },
    /// Show counts per status
    Stats,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the API base URL, keeping the rest of the file intact
    SetApiUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive UI, which logs to a file instead
    let Some(command) = cli.command else {
        return commands::ui::run(&config);
    };

    if let Err(err) = logging::init_stderr(CLI_LOG_FILTER) {
        eprintln!("Warning: {err:#}");
    }
    tracing::debug!(api_url = %config.api_url, "loaded config");

    match command {
        Commands::Register(args) => commands::auth::register(&config, &args.email, &args.password).await,
        Commands::Login(args) => commands::auth::login(&config, &args.email, &args.password).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(&config).await,

        Commands::Books { command } => match command {
            BooksCommands::List { search, sort, json } => {
                commands::books::list(&config, search.unwrap_or_default(), sort, json).await
            }
            BooksCommands::Add {
                title,
                author,
                cover,
                unavailable,
            } => {
                commands::books::add(
                    &config,
                    commands::books::AddArgs {
                        title,
                        author,
                        cover: cover.unwrap_or_default(),
                        available: !unavailable,
                    },
                )
                .await
            }
        },

        Commands::MyBooks { command } => match command {
            MyBooksCommands::List {
                status,
                search,
                sort,
                json,
            } => {
                let query = booktrack_core::view::CollectionQuery {
                    status,
                    search: search.unwrap_or_default(),
                    sort: sort.unwrap_or(config.collection.default_sort),
                };
                commands::collection::list(&config, &query, json).await
            }
            MyBooksCommands::Add { book_id } => commands::collection::add(&config, book_id.into()).await,
            MyBooksCommands::Status { book_id, status } => {
                commands::collection::set_status(&config, book_id.into(), status).await
            }
            MyBooksCommands::Rate { book_id, rating } => {
                commands::collection::rate(&config, book_id.into(), rating).await
            }
            MyBooksCommands::Stats => commands::collection::stats(&config).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetApiUrl { url } => commands::config::set_api_url(&url),
        },
    }
}
