//! Desktop entry parsing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed from .desktop files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesktopApp {
    /// File name without the ".desktop" suffix, used as package identifier.
    pub id: String,
    pub name: String,
    pub exec: Option<String>,
    pub icon_name: Option<String>,
    pub comment: Option<String>,
    pub no_display: bool,
    /// Hidden=true means the entry is deleted and must be ignored.
    pub hidden: bool,
    pub version_name: Option<String>,
    pub version_code: Option<i64>,
    pub desktop_file_path: PathBuf,
}

impl DesktopApp {
    /// Exec split into program and arguments, field codes removed.
    /// None if the entry has no usable Exec line.
    pub fn launch_command(&self) -> Option<Vec<String>> {
        let exec = self.exec.as_deref()?;
        let command: Vec<String> = split_exec(exec)
            .into_iter()
            .filter_map(|arg| strip_field_codes(&arg))
            .collect();

        if command.is_empty() {
            None
        } else {
            Some(command)
        }
    }

    /// Shown in launchers and has something to run.
    pub fn is_launchable(&self) -> bool {
        !self.no_display && self.launch_command().is_some()
    }
}

/// Desktop file ID of `path` below the applications directory `root`.
///
/// Subdirectory names become dash-separated prefixes, so
/// `<root>/kde4/konsole.desktop` is `kde4-konsole`.
pub fn desktop_file_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    parts.join("-").strip_suffix(".desktop").map(String::from)
}

/// Parse a .desktop file into a DesktopApp struct.
pub fn parse_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = fs::read_to_string(path).ok()?;
    parse_desktop_entry(&content, path)
}

/// Parse .desktop content. Only `Type=Application` entries with a name are accepted.
pub fn parse_desktop_entry(content: &str, path: &Path) -> Option<DesktopApp> {
    let mut entries = HashMap::new();
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if in_desktop_entry {
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    if entries.get("Type").map(|s| s.as_str()) != Some("Application") {
        return None;
    }

    let flag = |key: &str| entries.get(key).map(|s| s == "true").unwrap_or(false);

    Some(DesktopApp {
        id: path
            .file_name()?
            .to_str()?
            .strip_suffix(".desktop")?
            .to_string(),
        name: entries.get("Name")?.clone(),
        exec: entries.get("Exec").filter(|s| !s.is_empty()).cloned(),
        icon_name: entries.get("Icon").filter(|s| !s.is_empty()).cloned(),
        comment: entries.get("Comment").cloned(),
        no_display: flag("NoDisplay"),
        hidden: flag("Hidden"),
        version_name: entries.get("X-AppVersion").cloned(),
        version_code: entries
            .get("X-AppVersionCode")
            .and_then(|s| s.parse().ok()),
        desktop_file_path: path.to_path_buf(),
    })
}

/// Split an Exec value into arguments, honouring double quotes.
fn split_exec(exec: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        args.push(current);
    }
    args
}

/// Remove %f, %U etc. An argument made only of a field code is dropped.
fn strip_field_codes(arg: &str) -> Option<String> {
    let mut out = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    let mut removed_any = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(_) | None => removed_any = true,
        }
    }

    if out.is_empty() && removed_any {
        None
    } else {
        Some(out)
    }
}
