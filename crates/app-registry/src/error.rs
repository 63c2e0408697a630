//! Error types for app-registry

use crate::provider::ProviderError;

/// Errors surfaced by registry lookups, mutations and app actions.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Package name {package} not found")]
    NotFound { package: String },

    #[error("Failed to resolve package {package}: {source}")]
    ResolutionFailed {
        package: String,
        #[source]
        source: ProviderError,
    },

    #[error("Can't open {package}: no launch entry point")]
    LaunchUnavailable { package: String },

    #[error("Action on {package} failed: {reason}")]
    ActionFailed { package: String, reason: String },

    #[error("No foreground context is attached")]
    NoForegroundContext,

    #[error("Invalid AppType value: {0}")]
    InvalidAppType(i32),

    #[error("Invalid LaunchType value: {0}")]
    InvalidLaunchType(i32),
}

impl RegistryError {
    /// Map a provider failure for a single package onto the registry taxonomy.
    pub(crate) fn from_provider(package: &str, err: ProviderError) -> Self {
        match err {
            ProviderError::PackageNotFound(_) => Self::NotFound {
                package: package.to_string(),
            },
            other => Self::ResolutionFailed {
                package: package.to_string(),
                source: other,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
