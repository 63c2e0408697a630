//! Per-consumer handle bundling a registry with its action layer.

use crate::actions::{ActivityStarter, AppActions};
use crate::error::Result;
use crate::provider::PlatformProvider;
use crate::record::{AppRecord, AppType, LaunchType};
use crate::registry::{AppRegistry, InitReport};
use std::sync::Arc;

/// One session's view of installed applications.
///
/// Not shared between consumers: each binding creates its own handle and
/// therefore its own cache.
pub struct AppsHandle {
    registry: AppRegistry,
    actions: AppActions,
}

impl AppsHandle {
    pub fn new(provider: Arc<dyn PlatformProvider>, context: Arc<dyn ActivityStarter>) -> Self {
        Self {
            registry: AppRegistry::new(provider.clone()),
            actions: AppActions::new(provider, context),
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Attach or detach the foreground context used for uninstalls.
    pub fn set_foreground(&self, foreground: Option<Arc<dyn ActivityStarter>>) {
        self.actions.set_foreground(foreground);
    }

    pub fn initialize(&self) -> InitReport {
        self.registry.initialize()
    }

    pub fn app_info(&self, package: &str, should_initialize: bool) -> Result<AppRecord> {
        self.registry.get_record(package, should_initialize)
    }

    pub fn apps(&self, app_type: AppType, launch_type: LaunchType) -> Vec<AppRecord> {
        self.registry.list_records(app_type, launch_type)
    }

    /// Report a newly installed package.
    pub fn add(&self, package: &str) -> Result<()> {
        self.registry.add_record(package)
    }

    /// Report a removed package.
    pub fn remove(&self, package: &str) -> usize {
        self.registry.remove_record(package)
    }

    pub fn open(&self, package: &str) -> Result<()> {
        self.registry.initialize();
        self.actions.open_app(package)
    }

    pub fn uninstall(&self, package: &str) -> Result<()> {
        self.registry.initialize();
        self.actions.uninstall_app(package)
    }
}
