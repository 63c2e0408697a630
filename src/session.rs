//! Line-oriented command loop over one long-lived handle.
//!
//! Lets a host keep the registry warm and report installs and removals with
//! `add` / `remove` instead of rescanning.

use crate::cli::{AppTypeArg, LaunchTypeArg};
use crate::output::{format_error, write_record, write_records};
use app_registry::AppsHandle;
use clap::ValueEnum;
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Init,
    List(AppTypeArg, LaunchTypeArg),
    Info { package: String, no_init: bool },
    Add(String),
    Remove(String),
    Open(String),
    Uninstall(String),
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| "empty command".to_string())?;
    let rest: Vec<&str> = words.collect();

    let package = |rest: &[&str]| -> Result<String, String> {
        match rest {
            [package] => Ok(package.to_string()),
            _ => Err(format!("usage: {} <package>", verb)),
        }
    };

    match verb {
        "init" => Ok(SessionCommand::Init),
        "list" => {
            if rest.len() > 2 {
                return Err("usage: list [all|system|user] [all|launchable|non-launchable]".into());
            }
            let app_type = match rest.first() {
                Some(word) => AppTypeArg::from_str(word, true)?,
                None => AppTypeArg::All,
            };
            let launch_type = match rest.get(1) {
                Some(word) => LaunchTypeArg::from_str(word, true)?,
                None => LaunchTypeArg::All,
            };
            Ok(SessionCommand::List(app_type, launch_type))
        }
        "info" => match rest.as_slice() {
            [package] => Ok(SessionCommand::Info {
                package: package.to_string(),
                no_init: false,
            }),
            [package, "--no-init"] => Ok(SessionCommand::Info {
                package: package.to_string(),
                no_init: true,
            }),
            _ => Err("usage: info <package> [--no-init]".into()),
        },
        "add" => package(&rest).map(SessionCommand::Add),
        "remove" => package(&rest).map(SessionCommand::Remove),
        "open" => package(&rest).map(SessionCommand::Open),
        "uninstall" => package(&rest).map(SessionCommand::Uninstall),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Run commands until EOF or `quit`. Command failures are reported and the
/// session continues.
pub fn run_session<R: BufRead, W: Write>(
    handle: &AppsHandle,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        let result = match command {
            SessionCommand::Quit => break,
            SessionCommand::Init => {
                let report = handle.initialize();
                writeln!(out, "ready: {} apps, {} skipped", report.loaded, report.skipped)?;
                Ok(())
            }
            SessionCommand::List(app_type, launch_type) => {
                let records = handle.apps(app_type.into(), launch_type.into());
                write_records(out, &records, false, false)?;
                Ok(())
            }
            SessionCommand::Info { package, no_init } => {
                match handle.app_info(&package, !no_init) {
                    Ok(record) => {
                        write_record(out, &record, false)?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            SessionCommand::Add(package) => match handle.add(&package) {
                Ok(()) => {
                    writeln!(out, "added {}", package)?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            SessionCommand::Remove(package) => {
                let removed = handle.remove(&package);
                writeln!(out, "removed {} ({})", package, removed)?;
                Ok(())
            }
            SessionCommand::Open(package) => handle.open(&package),
            SessionCommand::Uninstall(package) => handle.uninstall(&package),
        };

        if let Err(e) = result {
            writeln!(out, "{}", format_error(&e))?;
        }
    }

    out.flush()
}
