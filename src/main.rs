//! get-apps - installed application registry for Linux desktops
//!
//! One process owns one registry handle. Metadata comes from .desktop
//! entries; open and uninstall are delegated to child processes.

mod cli;
mod output;
mod session;

use app_registry::AppsHandle;
use clap::Parser;
use cli::{Cli, Commands};
use desktop_apps::{DesktopConfig, DesktopProvider, ProcessStarter};
use log::{debug, info};
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::format_error(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(DesktopConfig::default_path);

    let config = match config_path.as_deref() {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            DesktopConfig::load(path)
        }
        None => DesktopConfig::default(),
    };

    let provider = Arc::new(DesktopProvider::new(&config));
    let starter = Arc::new(ProcessStarter::new(config.uninstall_command.clone()));
    let handle = AppsHandle::new(provider, starter.clone());
    // The terminal session is the foreground context for uninstall requests.
    handle.set_foreground(Some(starter));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            app_type,
            launch_type,
            json,
            with_icons,
        } => {
            let records = handle.apps(app_type.into(), launch_type.into());
            output::write_records(&mut out, &records, json, with_icons)?;
        }
        Commands::Info {
            package,
            no_init,
            icon_out,
            json,
        } => {
            let record = handle.app_info(&package, !no_init)?;
            if let Some(path) = icon_out {
                fs::write(&path, &record.icon)?;
                info!("Wrote icon for {} to {}", package, path.display());
            }
            output::write_record(&mut out, &record, json)?;
        }
        Commands::Open { package } => handle.open(&package)?,
        Commands::Uninstall { package } => handle.uninstall(&package)?,
        Commands::Add { package } => {
            handle.add(&package)?;
            let record = handle.app_info(&package, false)?;
            output::write_record(&mut out, &record, false)?;
        }
        Commands::Remove { package } => {
            let removed = handle.remove(&package);
            writeln!(out, "removed {} ({})", package, removed)?;
        }
        Commands::Session => {
            session::run_session(&handle, io::stdin().lock(), &mut out)?;
        }
        Commands::InitConfig { force } => {
            let path = config_path.ok_or("No config directory available")?;
            write_default_config(&path, force)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn write_default_config(path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force)", path.display()).into());
    }

    DesktopConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
