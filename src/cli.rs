use std::path::PathBuf;

use app_registry::{AppType, LaunchType};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "get-apps")]
#[command(about = "Query, open and uninstall installed applications")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ~/.config/get-apps/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AppTypeArg {
    #[default]
    All,
    System,
    User,
}

impl From<AppTypeArg> for AppType {
    fn from(arg: AppTypeArg) -> Self {
        match arg {
            AppTypeArg::All => AppType::All,
            AppTypeArg::System => AppType::System,
            AppTypeArg::User => AppType::User,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LaunchTypeArg {
    #[default]
    All,
    Launchable,
    NonLaunchable,
}

impl From<LaunchTypeArg> for LaunchType {
    fn from(arg: LaunchTypeArg) -> Self {
        match arg {
            LaunchTypeArg::All => LaunchType::All,
            LaunchTypeArg::Launchable => LaunchType::Launchable,
            LaunchTypeArg::NonLaunchable => LaunchType::NonLaunchable,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List installed applications
    List {
        /// System or user applications
        #[arg(short = 't', long, value_enum, default_value_t = AppTypeArg::All)]
        app_type: AppTypeArg,

        /// Launchable or hidden applications
        #[arg(short, long, value_enum, default_value_t = LaunchTypeArg::All)]
        launch_type: LaunchTypeArg,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Include PNG icon bytes in JSON output
        #[arg(long, requires = "json")]
        with_icons: bool,
    },

    /// Show a single application
    Info {
        /// Package identifier (desktop file name without .desktop)
        package: String,

        /// Resolve directly instead of scanning every application first
        #[arg(long)]
        no_init: bool,

        /// Write the icon PNG to this path
        #[arg(long)]
        icon_out: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Open an application
    Open {
        package: String,
    },

    /// Uninstall an application using the configured uninstall command
    Uninstall {
        package: String,
    },

    /// Load the registry, then resolve and cache one more application
    Add {
        package: String,
    },

    /// Load the registry, then drop every record for an application
    Remove {
        package: String,
    },

    /// Read commands from stdin against one registry (list, info, add, remove, ...)
    Session,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
