mod api;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod events;
mod logging;
mod navigation;
mod roles;
mod session;
mod ui;

use crate::config::{Config, get_config_path};
use crate::logging::get_rust_log_level;
use crate::navigation::{Route, build_nav_links};
use crate::roles::RoleSet;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Settings that override the config file and the environment.
#[derive(ClapArgs, Debug, Default)]
struct Overrides {
    /// Role of the signed-in user. Repeat or comma-separate for several.
    #[arg(long = "role", value_name = "ROLE", value_delimiter = ',')]
    roles: Vec<String>,

    /// Base URL of the TRE API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token sent with every API request
    #[arg(long, value_name = "TOKEN")]
    access_token: Option<String>,

    /// Emit debug diagnostics from the dashboard loader
    #[arg(long)]
    debug: bool,

    /// Give up on throttled cost requests after this many retries
    #[arg(long, value_name = "COUNT")]
    max_cost_retries: Option<u32>,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if !self.roles.is_empty() {
            config.roles = RoleSet::new(&self.roles).iter().map(str::to_string).collect();
        }
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(token) = self.access_token {
            config.access_token = Some(token);
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(retries) = self.max_cost_retries {
            config.max_cost_retries = Some(retries);
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the console
    Start {
        #[command(flatten)]
        overrides: Overrides,

        /// Route to open first, e.g. `/dashboard`
        #[arg(long, value_name = "PATH", default_value = "/")]
        route: String,

        /// Run without the terminal UI: load the dashboard once and print it
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Enable background colors
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Print the navigation entries visible to the resolved roles
    Nav {
        /// Role of the signed-in user. Repeat or comma-separate for several.
        #[arg(long = "role", value_name = "ROLE", value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Write settings to the config file
    Configure {
        #[command(flatten)]
        overrides: Overrides,

        /// Print the stored configuration instead of changing it
        #[arg(long, action = clap::ArgAction::SetTrue)]
        show: bool,
    },
    /// Clear the configuration and logout.
    Logout,
}

/// Loads the config file and applies environment and command-line overrides.
fn resolve_config(config_path: &Path, overrides: Overrides) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load_or_default(config_path)?;
    config.apply_env();
    overrides.apply(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log::set_max_level(get_rust_log_level().into());
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            overrides,
            route,
            headless,
            with_background,
        } => {
            let config = resolve_config(&config_path, overrides)?;
            let session = setup_session(&config)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, Route::from_path(&route), with_background).await
            }
        }
        Command::Nav { roles } => {
            let overrides = Overrides {
                roles,
                ..Overrides::default()
            };
            let config = resolve_config(&config_path, overrides)?;
            let role_set = config.role_set();
            crate::print_cmd_info!("Roles", "{}", role_set);
            for entry in build_nav_links(&role_set) {
                println!("{:<16} {:<18} {}", entry.name, entry.url, entry.icon);
            }
            Ok(())
        }
        Command::Configure { overrides, show } => {
            let mut config = Config::load_or_default(&config_path)?;
            if show {
                let mut shown = config.clone();
                if shown.access_token.is_some() {
                    shown.access_token = Some("********".to_string());
                }
                println!("{}", serde_json::to_string_pretty(&shown)?);
                return Ok(());
            }
            overrides.apply(&mut config);
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        Command::Logout => {
            println!("Logging out and clearing configuration file...");
            if !Config::clear(&config_path)? {
                crate::print_cmd_info!("Nothing to clear", "{}", config_path.display());
            }
            Ok(())
        }
    }
}
