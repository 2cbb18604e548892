//! Market Link CLI - Resolve and open app storefront deep links.
//!
//! # Usage
//!
//! ```bash
//! # Open an app's page on Google Play
//! mlink show-app --store google --package com.evernote
//!
//! # Open a developer's page on Samsung Apps
//! mlink show-all --store samsung --vendor-id adevqewb3c -n "Simplify Now"
//!
//! # Use Amazon web URLs and load extra storefronts
//! mlink --web --registry stores.json show-app --store slideme --package com.evernote
//!
//! # List registered storefronts
//! mlink stores
//! ```
//!
//! # Commands
//!
//! - `show-app` - Open a single app's page
//! - `show-all` - Open every app by a developer
//! - `stores` - List registered storefronts
//!
//! See [`config`] for the environment variables that set defaults. Set
//! `MARKET_LINK_LOG_FORMAT=json` for JSON logs on stderr.
//!
//! Exits with status 1 on configuration or registry errors, and 2 when the
//! link could not be opened and the fallback message was shown instead.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use market_link_core::{Operation, Outcome};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod error;
mod launcher;

use commands::open::IdentityArgs;
use config::MarketLinkConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "mlink")]
#[command(author, version, about = "Open app storefront deep links")]
struct Cli {
    /// Use web URLs instead of native schemes where a storefront offers both
    #[arg(long, global = true)]
    web: bool,

    /// Package name of the calling app, used when a rule falls back to it
    #[arg(long, global = true)]
    host_package: Option<String>,

    /// JSON file with extra storefront templates
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a single app's page
    ShowApp(IdentityArgs),
    /// Open the list of every app by a developer
    ShowAll(IdentityArgs),
    /// List registered storefronts
    Stores {
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
}

/// How the process exits after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The command did what was asked.
    Success,
    /// The link was not opened and the fallback message was shown.
    FellBack,
}

impl Exit {
    const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::FellBack => 2,
        }
    }
}

impl From<Outcome> for Exit {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Opened => Self::Success,
            Outcome::FellBack(reason) => {
                tracing::debug!(?reason, "Fallback message shown");
                Self::FellBack
            }
        }
    }
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "market_link_cli=info,market_link_core=info".into());

    // JSON for log collectors, text on a terminal. Stdout is reserved for links.
    let is_json = std::env::var("MARKET_LINK_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(Exit::Success) => {}
        Ok(exit) => std::process::exit(exit.code()),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Exit, CliError> {
    let mut config = MarketLinkConfig::from_env()?;
    if cli.web {
        config.amazon_use_http = true;
    }
    if let Some(host_package) = cli.host_package {
        config.host_package = market_link_core::PackageName::new(host_package);
    }
    if let Some(path) = cli.registry {
        config.registry_path = Some(path);
    }

    let registry = commands::load_registry(config.registry_path.as_deref())?;

    let exit = match cli.command {
        Commands::ShowApp(args) => {
            commands::open::run(&registry, config.resolver_config(), Operation::ShowApp, &args)
                .into()
        }
        Commands::ShowAll(args) => commands::open::run(
            &registry,
            config.resolver_config(),
            Operation::ShowAllByDeveloper,
            &args,
        )
        .into(),
        Commands::Stores { json } => {
            commands::stores::list(&registry, json)?;
            Exit::Success
        }
    };
    Ok(exit)
}
