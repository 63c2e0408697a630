//! Icon theme handling and indexing.

use crate::paths::{get_icon_base_directories, get_icon_theme_order, parse_icon_theme_index};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "svg", "xpm", "webp", "jpg", "ico"];

/// Formats the `image` crate can decode into a bitmap.
const RASTER_EXTENSIONS: [&str; 6] = ["png", "webp", "jpg", "jpeg", "bmp", "ico"];

/// Handles icon lookups across multiple themes and directories.
pub struct IconTheme {
    search_dirs: Vec<PathBuf>,
    /// Icon name (lowercase, no ext) -> path. Built on first lookup.
    index: OnceLock<HashMap<String, PathBuf>>,
}

impl IconTheme {
    /// Icon theme over the system icon directories.
    pub fn from_system(preferred_themes: &[String]) -> Self {
        let base_dirs = get_icon_base_directories();
        let theme_order = get_icon_theme_order(preferred_themes, &base_dirs);
        Self::with_search_dirs(search_directories(&base_dirs, &theme_order))
    }

    /// Icon theme over an explicit, ordered list of directories.
    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            index: OnceLock::new(),
        }
    }

    /// Resolve an icon name to a path. Absolute paths are used as-is.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if name.starts_with('/') {
            let path = PathBuf::from(name);
            return path.exists().then_some(path);
        }

        let index = self.index.get_or_init(|| self.build_index());
        let name_lower = name.to_lowercase();

        if let Some(path) = index.get(&name_lower) {
            return Some(path.clone());
        }

        let variations = [name_lower.replace(' ', "-"), name_lower.replace('_', "-")];
        variations.iter().find_map(|v| index.get(v).cloned())
    }

    /// Index every icon file. First match wins, so earlier directories
    /// (preferred themes) shadow later ones.
    fn build_index(&self) -> HashMap<String, PathBuf> {
        let mut index = HashMap::new();
        debug!("Scanning {} icon directories...", self.search_dirs.len());

        for dir_path in &self.search_dirs {
            if !dir_path.exists() {
                continue;
            }

            let walker = walkdir::WalkDir::new(dir_path)
                .follow_links(true)
                .max_depth(10)
                .sort_by_file_name();

            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_dir() {
                    continue;
                }

                let path = entry.path();
                let ext = match path.extension().and_then(|e| e.to_str()) {
                    Some(e) => e.to_lowercase(),
                    None => continue,
                };

                if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
                    continue;
                }

                let stem = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(s) => s.to_lowercase(),
                    None => continue,
                };

                index.entry(stem).or_insert_with(|| path.to_path_buf());
            }
        }

        debug!("Indexed {} icons", index.len());
        index
    }
}

/// Whether an icon file can be decoded into a bitmap.
pub fn is_raster(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RASTER_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn search_directories(icon_dirs: &[PathBuf], theme_order: &[String]) -> Vec<PathBuf> {
    let mut result = Vec::new();

    for theme in theme_order {
        for base_dir in icon_dirs {
            let theme_root = base_dir.join(theme);
            if !theme_root.exists() {
                continue;
            }

            match parse_icon_theme_index(&theme_root) {
                Some(parsed) if !parsed.directories.is_empty() => {
                    for relative in &parsed.directories {
                        result.push(theme_root.join(relative));
                    }
                }
                // Fallback for directories without index.theme
                _ => result.push(theme_root),
            }
        }
    }

    // Always search base directories (pixmaps, icons root)
    result.extend(icon_dirs.iter().cloned());
    result
}
