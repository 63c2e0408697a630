//! Fake provider shared by the unit tests.

use crate::actions::{ActivityStarter, Intent};
use crate::provider::{
    Drawable, FLAG_SYSTEM, PlatformIcon, PlatformProvider, ProviderError, ProviderResult,
    RawDescriptor, VersionInfo,
};
use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

struct Square;

impl Drawable for Square {
    fn intrinsic_width(&self) -> i32 {
        4
    }

    fn intrinsic_height(&self) -> i32 {
        4
    }

    fn draw(&self, canvas: &mut RgbaImage) {
        for pixel in canvas.pixels_mut() {
            *pixel = Rgba([0, 0, 255, 255]);
        }
    }
}

#[derive(Default)]
pub struct FakeProvider {
    /// Descriptors returned by the full listing, in order.
    listed: RwLock<Vec<RawDescriptor>>,
    /// Descriptors only reachable through direct resolution.
    extra: RwLock<HashMap<String, RawDescriptor>>,
    launchable: RwLock<HashSet<String>>,
    broken_icons: RwLock<HashSet<String>>,
    list_delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Add an installed app that shows up in the full listing.
    pub fn install(&self, package: &str, system: bool, launchable: bool) {
        let descriptor = Self::descriptor(package, system);
        self.listed.write().unwrap().push(descriptor);
        if launchable {
            self.launchable.write().unwrap().insert(package.to_string());
        }
    }

    /// Add an app that is only found by direct resolution.
    pub fn install_late(&self, package: &str, system: bool, launchable: bool) {
        let descriptor = Self::descriptor(package, system);
        self.extra
            .write()
            .unwrap()
            .insert(package.to_string(), descriptor);
        if launchable {
            self.launchable.write().unwrap().insert(package.to_string());
        }
    }

    pub fn break_icon(&self, package: &str) {
        self.broken_icons
            .write()
            .unwrap()
            .insert(package.to_string());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    fn descriptor(package: &str, system: bool) -> RawDescriptor {
        RawDescriptor {
            package_identifier: package.to_string(),
            label: package.to_uppercase(),
            description: format!("{} description", package),
            flags: if system { FLAG_SYSTEM } else { 0 },
        }
    }
}

impl PlatformProvider for FakeProvider {
    fn list_all_descriptors(&self) -> ProviderResult<Vec<RawDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            std::thread::sleep(delay);
        }
        Ok(self.listed.read().unwrap().clone())
    }

    fn resolve_descriptor(&self, package: &str) -> ProviderResult<RawDescriptor> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(found) = self
            .listed
            .read()
            .unwrap()
            .iter()
            .find(|d| d.package_identifier == package)
        {
            return Ok(found.clone());
        }
        self.extra
            .read()
            .unwrap()
            .get(package)
            .cloned()
            .ok_or_else(|| ProviderError::PackageNotFound(package.to_string()))
    }

    fn launch_intent(&self, package: &str) -> Option<Intent> {
        self.launchable
            .read()
            .unwrap()
            .contains(package)
            .then(|| Intent::Launch {
                package: package.to_string(),
                command: vec![package.to_string()],
            })
    }

    fn render_icon(&self, descriptor: &RawDescriptor) -> ProviderResult<PlatformIcon> {
        let package = &descriptor.package_identifier;
        if self.broken_icons.read().unwrap().contains(package) {
            return Err(ProviderError::Platform(format!("no icon for {}", package)));
        }
        if descriptor.is_system_app() {
            Ok(PlatformIcon::Drawable(Box::new(Square)))
        } else {
            Ok(PlatformIcon::Bitmap(DynamicImage::new_rgba8(2, 2)))
        }
    }

    fn resolve_version_info(&self, package: &str) -> ProviderResult<VersionInfo> {
        Ok(VersionInfo {
            name: format!("{}-1.0", package),
            code: 1,
        })
    }
}

/// Activity starter that records what it was asked to start.
#[derive(Default)]
pub struct RecordingStarter {
    pub started: Mutex<Vec<Intent>>,
    pub fail_with: Option<String>,
}

impl RecordingStarter {
    pub fn failing(reason: &str) -> Self {
        Self {
            started: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn started(&self) -> Vec<Intent> {
        self.started.lock().unwrap().clone()
    }
}

impl ActivityStarter for RecordingStarter {
    fn start_activity(&self, intent: &Intent) -> Result<(), String> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.started.lock().unwrap().push(intent.clone());
        Ok(())
    }
}
