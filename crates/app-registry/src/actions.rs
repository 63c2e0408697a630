//! Side-effecting app actions: open and uninstall.
//!
//! These hold no state of their own beyond the attached contexts. The OS does
//! the real work; failures are wrapped with the package they concern.

use crate::error::{RegistryError, Result};
use crate::provider::PlatformProvider;
use log::{error, info};
use std::sync::{Arc, PoisonError, RwLock};

/// Request handed to an [`ActivityStarter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Start the app's main entry point.
    Launch {
        package: String,
        /// Program and arguments.
        command: Vec<String>,
    },
    /// Ask the system to uninstall the package.
    Delete { package: String },
}

impl Intent {
    pub fn package(&self) -> &str {
        match self {
            Intent::Launch { package, .. } | Intent::Delete { package } => package,
        }
    }

    /// "package:<id>" style data URI.
    pub fn data_uri(&self) -> String {
        format!("package:{}", self.package())
    }
}

/// A context able to start activities (application or foreground UI).
pub trait ActivityStarter: Send + Sync {
    fn start_activity(&self, intent: &Intent) -> std::result::Result<(), String>;
}

/// Action layer delegating open/uninstall to the platform.
pub struct AppActions {
    provider: Arc<dyn PlatformProvider>,
    /// Application-wide context, always present.
    context: Arc<dyn ActivityStarter>,
    /// Current foreground context, attached and detached by the host.
    foreground: RwLock<Option<Arc<dyn ActivityStarter>>>,
}

impl AppActions {
    pub fn new(provider: Arc<dyn PlatformProvider>, context: Arc<dyn ActivityStarter>) -> Self {
        Self {
            provider,
            context,
            foreground: RwLock::new(None),
        }
    }

    /// Attach or detach the foreground context.
    pub fn set_foreground(&self, foreground: Option<Arc<dyn ActivityStarter>>) {
        *self
            .foreground
            .write()
            .unwrap_or_else(PoisonError::into_inner) = foreground;
    }

    pub fn has_foreground(&self) -> bool {
        self.foreground
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Start a package through its launch intent.
    pub fn open_app(&self, package: &str) -> Result<()> {
        let intent = self.provider.launch_intent(package).ok_or_else(|| {
            RegistryError::LaunchUnavailable {
                package: package.to_string(),
            }
        })?;

        self.context.start_activity(&intent).map_err(|reason| {
            error!("Can't open {}: {}", package, reason);
            RegistryError::ActionFailed {
                package: package.to_string(),
                reason,
            }
        })?;

        info!("Opened {}", package);
        Ok(())
    }

    /// Ask the system to uninstall a package. Needs a foreground context.
    pub fn uninstall_app(&self, package: &str) -> Result<()> {
        let foreground = self
            .foreground
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(RegistryError::NoForegroundContext)?;

        let intent = Intent::Delete {
            package: package.to_string(),
        };
        foreground.start_activity(&intent).map_err(|reason| {
            error!("Can't delete {}: {}", package, reason);
            RegistryError::ActionFailed {
                package: package.to_string(),
                reason,
            }
        })?;

        info!("Requested uninstall of {}", intent.data_uri());
        Ok(())
    }
}
