//! Application registry cache.
//!
//! Lazily enumerates installed applications on first use and serves
//! filtered snapshots from memory afterwards. The cache is never refreshed
//! behind the caller's back; installs and removals must be reported through
//! [`AppRegistry::add_record`] and [`AppRegistry::remove_record`].

use crate::error::{RegistryError, Result};
use crate::provider::PlatformProvider;
use crate::record::{AppRecord, AppType, LaunchType};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Broadcast channel capacity for registry events.
const EVENT_CAPACITY: usize = 16;

/// Lifecycle of a registry instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
}

/// Outcome of the full enumeration pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Records cached.
    pub loaded: usize,
    /// Descriptors dropped because their metadata could not be built.
    pub skipped: usize,
}

/// Events emitted when the registry changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    Initialized(InitReport),
    Added(String),
    Removed(String),
}

#[derive(Default)]
struct State {
    phase: Phase,
    records: Vec<AppRecord>,
    report: InitReport,
}

/// In-memory registry of installed applications, owned by one consumer.
pub struct AppRegistry {
    provider: Arc<dyn PlatformProvider>,
    /// Phase and records share one lock so no reader sees a partial sequence.
    state: Mutex<State>,
    event_tx: broadcast::Sender<RegistryEvent>,
}

impl AppRegistry {
    /// Create an empty, uninitialized registry.
    pub fn new(provider: Arc<dyn PlatformProvider>) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            provider,
            state: Mutex::new(State::default()),
            event_tx: tx,
        }
    }

    pub fn provider(&self) -> &Arc<dyn PlatformProvider> {
        &self.provider
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Subscribe to registry changes.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_tx.subscribe()
    }

    /// Enumerate every installed application, once.
    ///
    /// Concurrent callers block until the first pass completes. Descriptors
    /// whose metadata cannot be built are logged and skipped; the registry
    /// always ends up `Ready`.
    pub fn initialize(&self) -> InitReport {
        let mut state = self.lock();
        if state.phase == Phase::Ready {
            debug!("App registry already initialized, skipping");
            return state.report;
        }

        info!("Initializing app registry...");
        state.phase = Phase::Initializing;

        let descriptors = match self.provider.list_all_descriptors() {
            Ok(descriptors) => descriptors,
            Err(e) => {
                error!("Failed to list installed applications: {}", e);
                Vec::new()
            }
        };

        let (records, skipped) = descriptors.iter().fold(
            (Vec::with_capacity(descriptors.len()), 0usize),
            |(mut records, skipped), descriptor| {
                match AppRecord::from_descriptor(self.provider.as_ref(), descriptor) {
                    Ok(record) => {
                        records.push(record);
                        (records, skipped)
                    }
                    Err(e) => {
                        warn!(
                            "Error getting app info for {}: {}",
                            descriptor.package_identifier, e
                        );
                        (records, skipped + 1)
                    }
                }
            },
        );

        let report = InitReport {
            loaded: records.len(),
            skipped,
        };
        state.records = records;
        state.report = report;
        state.phase = Phase::Ready;
        drop(state);

        info!(
            "App registry ready: {} apps cached, {} skipped",
            report.loaded, report.skipped
        );
        let _ = self.event_tx.send(RegistryEvent::Initialized(report));

        report
    }

    /// Look up one application.
    ///
    /// With `should_initialize` the cache is populated first and searched.
    /// Without it an uninitialized registry is bypassed entirely. A cache
    /// miss falls back to resolving the package directly.
    pub fn get_record(&self, package: &str, should_initialize: bool) -> Result<AppRecord> {
        if should_initialize {
            self.initialize();
        }

        {
            let state = self.lock();
            if state.phase == Phase::Ready {
                if let Some(record) = state.records.iter().find(|r| r.package_name == package) {
                    return Ok(record.clone());
                }
            }
        }

        debug!("{} not in cache, resolving directly", package);
        self.resolve_record(package)
    }

    /// Cached records matching both filters, in cache order.
    pub fn list_records(&self, app_type: AppType, launch_type: LaunchType) -> Vec<AppRecord> {
        self.initialize();

        self.lock()
            .records
            .iter()
            .filter(|r| app_type.matches(r) && launch_type.matches(r))
            .cloned()
            .collect()
    }

    /// Resolve a package and store it.
    ///
    /// A package already present is replaced in place; otherwise the record
    /// is appended. On failure the cache is left untouched.
    pub fn add_record(&self, package: &str) -> Result<()> {
        self.initialize();

        let record = self.resolve_record(package)?;

        {
            let mut state = self.lock();
            match state
                .records
                .iter()
                .position(|r| r.package_name == package)
            {
                Some(index) => {
                    debug!("Replacing cached record for {}", package);
                    state.records[index] = record;
                }
                None => state.records.push(record),
            }
        }

        let _ = self.event_tx.send(RegistryEvent::Added(package.to_string()));
        Ok(())
    }

    /// Drop every record for a package. Returns how many were removed.
    pub fn remove_record(&self, package: &str) -> usize {
        self.initialize();

        let removed = {
            let mut state = self.lock();
            let before = state.records.len();
            state.records.retain(|r| r.package_name != package);
            before - state.records.len()
        };

        if removed > 0 {
            let _ = self
                .event_tx
                .send(RegistryEvent::Removed(package.to_string()));
        } else {
            debug!("remove: {} not cached", package);
        }

        removed
    }

    fn resolve_record(&self, package: &str) -> Result<AppRecord> {
        let descriptor = self
            .provider
            .resolve_descriptor(package)
            .map_err(|e| RegistryError::from_provider(package, e))?;

        AppRecord::from_descriptor(self.provider.as_ref(), &descriptor)
            .map_err(|e| RegistryError::from_provider(package, e))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
