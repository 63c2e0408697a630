//! Path helpers for XDG directories and icon theme files.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

/// Where an application directory lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Per-user install, e.g. ~/.local/share/applications.
    User,
    /// System-wide install, e.g. /usr/share/applications.
    System,
}

/// A directory holding .desktop files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationDir {
    pub path: PathBuf,
    pub scope: Scope,
}

impl ApplicationDir {
    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scope: Scope::User,
        }
    }

    pub fn system(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scope: Scope::System,
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

fn xdg_data_home() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".local/share"))
}

fn xdg_data_dirs() -> Vec<PathBuf> {
    let dirs = std::env::var("XDG_DATA_DIRS")
        .unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());

    dirs.split(':')
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Get base icon directories (XDG + Flatpak + Snap).
pub fn get_icon_base_directories() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let home = home_dir();

    // User icons
    dirs.push(xdg_data_home().join("icons"));
    dirs.push(home.join(".icons"));

    // System icons
    for data_dir in xdg_data_dirs() {
        dirs.push(data_dir.join("icons"));
        dirs.push(data_dir.join("pixmaps"));
    }

    dirs.push(PathBuf::from("/usr/share/pixmaps"));

    // App formats (flatpak, snap)
    dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/icons"));
    dirs.push(home.join(".local/share/flatpak/exports/share/icons"));
    dirs.push(PathBuf::from("/var/lib/snapd/desktop/icons"));

    dirs
}

/// Get all application .desktop directories, user directories first.
/// Extra directories are treated as user installs and searched first.
pub fn get_application_directories(extra: &[PathBuf]) -> Vec<ApplicationDir> {
    let mut dirs: Vec<ApplicationDir> = extra.iter().cloned().map(ApplicationDir::user).collect();
    let home = home_dir();

    dirs.push(ApplicationDir::user(xdg_data_home().join("applications")));
    dirs.push(ApplicationDir::user(
        home.join(".local/share/flatpak/exports/share/applications"),
    ));

    for data_dir in xdg_data_dirs() {
        dirs.push(ApplicationDir::system(data_dir.join("applications")));
    }

    dirs.push(ApplicationDir::system(
        "/var/lib/flatpak/exports/share/applications",
    ));
    dirs.push(ApplicationDir::system("/var/lib/snapd/desktop/applications"));

    // XDG_DATA_DIRS may repeat entries
    let mut seen = HashSet::new();
    dirs.retain(|d| seen.insert(d.path.clone()));
    dirs
}

/// Parsed index.theme content.
pub struct ParsedIconTheme {
    pub directories: Vec<String>,
    pub inherits: Vec<String>,
}

pub fn parse_icon_theme_index(theme_root: &Path) -> Option<ParsedIconTheme> {
    let content = fs::read_to_string(theme_root.join("index.theme")).ok()?;
    Some(parse_icon_theme_content(&content))
}

fn parse_icon_theme_content(content: &str) -> ParsedIconTheme {
    let mut directories = Vec::new();
    let mut inherits = Vec::new();
    let mut section = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            section = line.to_string();
            continue;
        }

        if section.eq_ignore_ascii_case("[Icon Theme]") {
            if let Some((k, v)) = line.split_once('=') {
                let values = v
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
                match k.trim() {
                    "Directories" => directories = values.collect(),
                    "Inherits" => inherits = values.collect(),
                    _ => {}
                }
            }
        }
    }

    ParsedIconTheme {
        directories,
        inherits,
    }
}

/// Ordered list of icon themes: preferred themes, then the fallbacks,
/// expanded with everything they inherit from.
pub fn get_icon_theme_order(preferred: &[String], base_dirs: &[PathBuf]) -> Vec<String> {
    let mut themes: Vec<String> = preferred.to_vec();

    if let Ok(theme) = std::env::var("GTK_THEME") {
        themes.push(theme);
    }

    themes.push("Adwaita".to_string());
    themes.push("hicolor".to_string());

    resolve_theme_inheritance(themes, base_dirs)
}

fn resolve_theme_inheritance(start_themes: Vec<String>, base_dirs: &[PathBuf]) -> Vec<String> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start_themes);

    while let Some(theme) = queue.pop_front() {
        if !visited.insert(theme.clone()) {
            continue;
        }
        result.push(theme.clone());

        for base in base_dirs {
            if let Some(parsed) = parse_icon_theme_index(&base.join(&theme)) {
                for parent in parsed.inherits {
                    if !visited.contains(&parent) {
                        queue.push_back(parent);
                    }
                }
                break; // Only parse first found theme instance
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_icon_theme_content() {
        let parsed = parse_icon_theme_content(
            "[Icon Theme]\nName=Papirus\nInherits=breeze, hicolor\nDirectories=48x48/apps,scalable/apps\n\n[48x48/apps]\nSize=48\n",
        );

        assert_eq!(parsed.inherits, vec!["breeze", "hicolor"]);
        assert_eq!(parsed.directories, vec!["48x48/apps", "scalable/apps"]);
    }

    #[test]
    fn test_theme_inheritance_follows_index_files() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().to_path_buf();
        fs::create_dir_all(base.join("Custom")).unwrap();
        fs::write(
            base.join("Custom/index.theme"),
            "[Icon Theme]\nInherits=Parent\n",
        )
        .unwrap();
        fs::create_dir_all(base.join("Parent")).unwrap();
        fs::write(
            base.join("Parent/index.theme"),
            "[Icon Theme]\nInherits=hicolor\n",
        )
        .unwrap();

        let order = resolve_theme_inheritance(
            vec!["Custom".to_string(), "hicolor".to_string()],
            &[base],
        );

        assert_eq!(order, vec!["Custom", "hicolor", "Parent"]);
    }

    #[test]
    fn test_extra_application_dirs_come_first() {
        let dirs = get_application_directories(&[PathBuf::from("/opt/apps")]);

        assert_eq!(dirs[0], ApplicationDir::user("/opt/apps"));
        let first_system = dirs.iter().position(|d| d.scope == Scope::System).unwrap();
        assert!(dirs[..first_system].iter().all(|d| d.scope == Scope::User));
    }
}
