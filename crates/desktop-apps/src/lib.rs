//! desktop-apps: installed application metadata for Linux desktops.
//!
//! Implements the app-registry platform provider on top of:
//! - .desktop entries from XDG, Flatpak and Snap directories
//! - Icon theme lookup with theme inheritance
//! - Child processes for launching and uninstalling

mod config;
mod desktop_entry;
mod icons;
mod launcher;
mod paths;
mod provider;
mod tile;

pub use config::{DEFAULT_ICON_SIZE, DesktopConfig};
pub use desktop_entry::DesktopApp;
pub use icons::IconTheme;
pub use launcher::ProcessStarter;
pub use paths::{ApplicationDir, Scope};
pub use provider::DesktopProvider;
pub use tile::SolidTile;
