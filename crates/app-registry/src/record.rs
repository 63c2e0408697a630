//! Application records and query filters.

use crate::error::{RegistryError, Result};
use crate::provider::{PlatformProvider, ProviderResult, RawDescriptor};
use serde::{Deserialize, Serialize};

/// Cached metadata for one installed application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub app_name: String,
    pub package_name: String,
    /// PNG encoded icon.
    pub icon: Vec<u8>,
    pub description: String,
    pub version_name: String,
    pub version_code: i64,
    pub is_launchable: bool,
    pub is_system_app: bool,
}

impl AppRecord {
    /// Build a record from a raw descriptor, querying the provider for the rest.
    /// Any provider failure aborts the whole record.
    pub fn from_descriptor(
        provider: &dyn PlatformProvider,
        descriptor: &RawDescriptor,
    ) -> ProviderResult<Self> {
        let package = &descriptor.package_identifier;

        let icon = provider.render_icon(descriptor)?;
        let icon = provider.encode_image_to_bytes(icon)?;
        let version = provider.resolve_version_info(package)?;
        let is_launchable = provider.has_launch_entry_point(package);

        Ok(Self {
            app_name: descriptor.label.clone(),
            package_name: package.clone(),
            icon,
            description: descriptor.description.clone(),
            version_name: version.name,
            version_code: version.code,
            is_launchable,
            is_system_app: descriptor.is_system_app(),
        })
    }
}

/// System/user classification filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppType {
    #[default]
    All,
    System,
    User,
}

impl AppType {
    /// Decode the integer discriminant used across the bridge.
    pub fn from_value(value: i32) -> Result<Self> {
        match value {
            0 => Ok(AppType::All),
            1 => Ok(AppType::System),
            2 => Ok(AppType::User),
            other => Err(RegistryError::InvalidAppType(other)),
        }
    }

    pub fn value(self) -> i32 {
        match self {
            AppType::All => 0,
            AppType::System => 1,
            AppType::User => 2,
        }
    }

    pub fn matches(self, record: &AppRecord) -> bool {
        match self {
            AppType::All => true,
            AppType::System => record.is_system_app,
            AppType::User => !record.is_system_app,
        }
    }
}

/// Launchability filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchType {
    #[default]
    All,
    Launchable,
    NonLaunchable,
}

impl LaunchType {
    /// Decode the integer discriminant used across the bridge.
    pub fn from_value(value: i32) -> Result<Self> {
        match value {
            0 => Ok(LaunchType::All),
            1 => Ok(LaunchType::Launchable),
            2 => Ok(LaunchType::NonLaunchable),
            other => Err(RegistryError::InvalidLaunchType(other)),
        }
    }

    pub fn value(self) -> i32 {
        match self {
            LaunchType::All => 0,
            LaunchType::Launchable => 1,
            LaunchType::NonLaunchable => 2,
        }
    }

    pub fn matches(self, record: &AppRecord) -> bool {
        match self {
            LaunchType::All => true,
            LaunchType::Launchable => record.is_launchable,
            LaunchType::NonLaunchable => !record.is_launchable,
        }
    }
}
