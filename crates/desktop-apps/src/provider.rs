//! Platform provider backed by freedesktop .desktop entries.

use crate::config::DesktopConfig;
use crate::desktop_entry::{DesktopApp, desktop_file_id, parse_desktop_file};
use crate::icons::{IconTheme, is_raster};
use crate::paths::{ApplicationDir, Scope, get_application_directories};
use crate::tile::SolidTile;
use app_registry::{
    FLAG_SYSTEM, FLAG_UPDATED_SYSTEM_APP, Intent, PlatformIcon, PlatformProvider, ProviderError,
    ProviderResult, RawDescriptor, VersionInfo,
};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A desktop entry plus where it was found.
#[derive(Clone, Debug)]
struct LocatedApp {
    app: DesktopApp,
    scope: Scope,
    /// A user entry overriding a system entry with the same id.
    shadows_system: bool,
}

impl LocatedApp {
    fn flags(&self) -> u32 {
        match (self.scope, self.shadows_system) {
            (Scope::System, _) => FLAG_SYSTEM,
            (Scope::User, true) => FLAG_UPDATED_SYSTEM_APP,
            (Scope::User, false) => 0,
        }
    }

    fn descriptor(&self) -> RawDescriptor {
        RawDescriptor {
            package_identifier: self.app.id.clone(),
            label: self.app.name.clone(),
            description: self.app.comment.clone().unwrap_or_default(),
            flags: self.flags(),
        }
    }
}

/// Provider for Linux desktops.
pub struct DesktopProvider {
    app_dirs: Vec<ApplicationDir>,
    icon_theme: IconTheme,
    icon_size: u32,
    /// Entries seen so far, keyed by package id.
    entries: RwLock<HashMap<String, LocatedApp>>,
}

impl DesktopProvider {
    /// Provider over the standard XDG, Flatpak and Snap locations.
    pub fn new(config: &DesktopConfig) -> Self {
        Self::with_dirs(
            get_application_directories(&config.extra_application_dirs),
            IconTheme::from_system(&config.icon_themes),
            config.icon_size,
        )
    }

    /// Provider over explicit directories, in search order.
    pub fn with_dirs(app_dirs: Vec<ApplicationDir>, icon_theme: IconTheme, icon_size: u32) -> Self {
        Self {
            app_dirs,
            icon_theme,
            icon_size,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Walk the application directories. With `only`, just that package.
    /// Returns ids in discovery order and the effective entry for each id.
    fn scan(&self, only: Option<&str>) -> (Vec<String>, HashMap<String, LocatedApp>) {
        let mut order = Vec::new();
        let mut found: HashMap<String, LocatedApp> = HashMap::new();

        for dir in &self.app_dirs {
            if !dir.path.exists() {
                continue;
            }

            let walker = walkdir::WalkDir::new(&dir.path)
                .follow_links(true)
                .max_depth(3)
                .sort_by_file_name();

            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let Some(id) = desktop_file_id(&dir.path, path) else {
                    continue;
                };
                if only.is_some_and(|wanted| wanted != id) {
                    continue;
                }

                if let Some(existing) = found.get_mut(&id) {
                    if existing.scope == Scope::User && dir.scope == Scope::System {
                        existing.shadows_system = true;
                    }
                    debug!(
                        "{} shadows {}",
                        existing.app.desktop_file_path.display(),
                        path.display()
                    );
                    continue;
                }

                match parse_desktop_file(path) {
                    Some(mut app) => {
                        app.id = id.clone();
                        order.push(id.clone());
                        found.insert(
                            id,
                            LocatedApp {
                                app,
                                scope: dir.scope,
                                shadows_system: false,
                            },
                        );
                    }
                    None => debug!("Skipping {}: not an application entry", path.display()),
                }
            }
        }

        (order, found)
    }

    /// Effective entry for a package, from the lookup cache or a fresh scan.
    fn locate(&self, package: &str) -> ProviderResult<LocatedApp> {
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(package)
        {
            return Ok(hit.clone());
        }

        self.refresh(package)
    }

    /// Re-read a package from disk and update the lookup cache to match.
    fn refresh(&self, package: &str) -> ProviderResult<LocatedApp> {
        let (_, mut found) = self.scan(Some(package));
        let located = found.remove(package).filter(|l| !l.app.hidden);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match located {
            Some(located) => {
                entries.insert(package.to_string(), located.clone());
                Ok(located)
            }
            None => {
                entries.remove(package);
                Err(ProviderError::PackageNotFound(package.to_string()))
            }
        }
    }
}

impl PlatformProvider for DesktopProvider {
    fn list_all_descriptors(&self) -> ProviderResult<Vec<RawDescriptor>> {
        info!("Scanning {} application directories...", self.app_dirs.len());

        let (order, found) = self.scan(None);
        let visible: HashMap<String, LocatedApp> =
            found.into_iter().filter(|(_, l)| !l.app.hidden).collect();

        let descriptors = order
            .iter()
            .filter_map(|id| visible.get(id))
            .map(LocatedApp::descriptor)
            .collect::<Vec<_>>();

        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner) = visible;

        Ok(descriptors)
    }

    fn resolve_descriptor(&self, package: &str) -> ProviderResult<RawDescriptor> {
        self.refresh(package).map(|l| l.descriptor())
    }

    fn launch_intent(&self, package: &str) -> Option<Intent> {
        let located = self.locate(package).ok()?;
        if !located.app.is_launchable() {
            return None;
        }

        located.app.launch_command().map(|command| Intent::Launch {
            package: package.to_string(),
            command,
        })
    }

    fn render_icon(&self, descriptor: &RawDescriptor) -> ProviderResult<PlatformIcon> {
        let package = &descriptor.package_identifier;
        let located = self.locate(package)?;

        let icon_path = located
            .app
            .icon_name
            .as_deref()
            .and_then(|name| self.icon_theme.resolve(name));

        if let Some(path) = icon_path.filter(|p| is_raster(p)) {
            match image::open(&path) {
                Ok(bitmap) => return Ok(PlatformIcon::Bitmap(bitmap)),
                Err(e) => debug!("Can't decode icon {}: {}", path.display(), e),
            }
        }

        Ok(PlatformIcon::Drawable(Box::new(SolidTile::for_package(
            package,
            self.icon_size,
        ))))
    }

    fn resolve_version_info(&self, package: &str) -> ProviderResult<VersionInfo> {
        let app = self.locate(package)?.app;

        Ok(VersionInfo {
            name: app.version_name.unwrap_or_default(),
            code: app.version_code.unwrap_or(0),
        })
    }
}
