//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::backend::Backend;
use roster_core::config::{self, Config};
use roster_core::logging::{self, WorkerGuard};
use roster_core::records::SortColumn;

mod commands;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Manage user records from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use the in-memory demo backend (sign in as admin@example.com / admin)
    #[arg(long, global = true)]
    demo: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Work with user records
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

#[derive(clap::Subcommand)]
enum UsersCommands {
    /// Sign in and print every user as a table
    List {
        #[arg(long, env = "ROSTER_EMAIL")]
        email: String,

        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Column to sort by (name, email, department, group)
        #[arg(long, default_value = "name", value_parser = parse_sort_column)]
        sort: SortColumn,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

fn parse_sort_column(s: &str) -> Result<SortColumn, String> {
    SortColumn::parse(s).ok_or_else(|| {
        format!("unknown column '{s}' (expected name, email, department or group)")
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, demo } = cli;

    match command {
        // Config commands must work even when the config file is broken.
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },

        None => {
            let (config, backend, _log_guard) = prepare(demo)?;
            commands::tui::run(config, backend)
        }

        Some(Commands::Register { email, password }) => {
            let (_, backend, _log_guard) = prepare(demo)?;
            commands::register::run(&backend, &email, &password).await
        }

        Some(Commands::Users { command }) => match command {
            UsersCommands::List {
                email,
                password,
                sort,
                desc,
            } => {
                let (_, backend, _log_guard) = prepare(demo)?;
                commands::users::list(&backend, &email, &password, sort, desc).await
            }
        },
    }
}

/// Loads config, starts file logging and picks the backend.
fn prepare(demo: bool) -> Result<(Config, Backend, WorkerGuard)> {
    let config = Config::load().context("load config")?;
    let guard = logging::init(&config.log).context("init logging")?;
    tracing::debug!(path = %config::paths::config_path().display(), demo, "config loaded");

    let backend = if demo {
        Backend::demo()
    } else {
        Backend::from_config(&config.backend).context("connect to backend")?
    };
    Ok((config, backend, guard))
}
