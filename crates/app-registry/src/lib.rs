//! app-registry: cached view of a platform's installed applications.
//!
//! Provides:
//! - A lazily populated, filterable registry of app metadata
//! - PNG icon encoding for bitmap and drawable icons
//! - Open/uninstall actions delegated to platform contexts
//!
//! Platform access goes through the [`PlatformProvider`] trait.

pub mod actions;
pub mod error;
pub mod handle;
pub mod icon;
pub mod provider;
pub mod record;
pub mod registry;

#[cfg(test)]
mod testing;

pub use actions::{ActivityStarter, AppActions, Intent};
pub use error::{RegistryError, Result};
pub use handle::AppsHandle;
pub use icon::encode_icon;
pub use provider::{
    Drawable, FLAG_SYSTEM, FLAG_UPDATED_SYSTEM_APP, PlatformIcon, PlatformProvider,
    ProviderError, ProviderResult, RawDescriptor, VersionInfo,
};
pub use record::{AppRecord, AppType, LaunchType};
pub use registry::{AppRegistry, InitReport, Phase, RegistryEvent};
