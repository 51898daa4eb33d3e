//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use vitrola_core::config::Config;
use vitrola_core::{interrupt, logging};

mod commands;

#[derive(Parser)]
#[command(name = "vitrola")]
#[command(version)]
#[command(about = "Browse, buy and collect albums from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Screen to open when starting the interactive UI (e.g. /home, /wallet)
    #[arg(long, default_value = "/", value_name = "PATH")]
    route: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive UI (default)
    Tui {
        /// Screen to open (e.g. /login, /my-collection)
        #[arg(value_name = "PATH")]
        route: Option<String>,
    },

    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "VITROLA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Create a new account
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "VITROLA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Search, buy and manage albums
    Albums {
        #[command(subcommand)]
        command: AlbumCommands,
    },

    /// Show or top up the wallet
    Wallet {
        #[command(subcommand)]
        command: WalletCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum AlbumCommands {
    /// Search the catalog
    Search {
        /// Search text (defaults to the configured carousel query)
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },
    /// Buy an album found by a search
    Buy {
        /// Catalog id of the album
        #[arg(value_name = "ALBUM_ID")]
        id: String,

        /// Search text used to look the album up
        #[arg(short, long, value_name = "TEXT")]
        query: Option<String>,
    },
    /// List owned albums with totals
    Collection,
    /// Remove an owned album from the collection
    Remove {
        /// Collection id of the album
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum WalletCommands {
    /// Show balance and points
    Show,
    /// Add credit to the wallet
    Credit {
        /// Amount to add (accepts `,` as decimal separator)
        #[arg(value_name = "AMOUNT")]
        amount: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the base URL of a backend service
    SetUrl {
        /// Service name: users or albums
        #[arg(value_name = "SERVICE")]
        service: String,
        /// Base URL including the /api prefix
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let Cli { command, route } = Cli::parse();

    // Config commands never load the config file.
    let command = match command {
        Some(Commands::Config { command }) => return run_config(command),
        other => other,
    };

    let config = Config::load().context("load config")?;
    let _log_guard = logging::init(&config).context("init logging")?;

    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(command, &route, config).await })
}

fn run_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
        ConfigCommands::SetUrl { service, url } => commands::config::set_url(&service, &url),
    }
}

async fn dispatch(command: Option<Commands>, route: &str, config: Config) -> Result<()> {
    // default to the interactive UI
    let Some(command) = command else {
        return commands::tui::run(config, route).await;
    };

    match command {
        Commands::Tui { route: explicit } => {
            commands::tui::run(config, explicit.as_deref().unwrap_or(route)).await
        }

        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&config),
        Commands::Signup {
            name,
            email,
            password,
        } => commands::auth::signup(&config, &name, &email, &password).await,
        Commands::Whoami => commands::auth::whoami(&config),

        Commands::Albums { command } => match command {
            AlbumCommands::Search { text } => {
                commands::albums::search(&config, text.as_deref()).await
            }
            AlbumCommands::Buy { id, query } => {
                commands::albums::buy(&config, &id, query.as_deref()).await
            }
            AlbumCommands::Collection => commands::albums::collection(&config).await,
            AlbumCommands::Remove { id } => commands::albums::remove(&config, id).await,
        },

        Commands::Wallet { command } => match command {
            WalletCommands::Show => commands::wallet::show(&config).await,
            WalletCommands::Credit { amount } => commands::wallet::credit(&config, &amount).await,
        },

        Commands::Config { command } => run_config(command),
    }
}
