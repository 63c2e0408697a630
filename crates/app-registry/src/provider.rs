//! Platform metadata provider abstraction.
//!
//! The registry never talks to the operating system directly. Everything it
//! knows about installed applications comes through a [`PlatformProvider`].

use crate::actions::Intent;
use image::{DynamicImage, RgbaImage};

/// Descriptor is a system application.
pub const FLAG_SYSTEM: u32 = 1 << 0;
/// Descriptor is a system application that has been updated by the user.
pub const FLAG_UPDATED_SYSTEM_APP: u32 = 1 << 7;

/// Raw application descriptor as reported by the platform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDescriptor {
    /// Unique package identifier, e.g. "org.mozilla.firefox".
    pub package_identifier: String,
    /// Human-readable label.
    pub label: String,
    /// Optional description, empty when the platform has none.
    pub description: String,
    /// Platform classification flags (`FLAG_*`).
    pub flags: u32,
}

impl RawDescriptor {
    /// True if either system classification flag is set.
    pub fn is_system_app(&self) -> bool {
        self.flags & FLAG_SYSTEM != 0 || self.flags & FLAG_UPDATED_SYSTEM_APP != 0
    }
}

/// Version information for an installed package.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    pub code: i64,
}

/// Something that can paint itself but is not backed by a decoded bitmap.
pub trait Drawable: Send {
    /// Natural width in pixels, may be `<= 0` when unknown.
    fn intrinsic_width(&self) -> i32;
    /// Natural height in pixels, may be `<= 0` when unknown.
    fn intrinsic_height(&self) -> i32;
    /// Paint onto a canvas that is already sized for this drawable.
    fn draw(&self, canvas: &mut RgbaImage);
}

/// Icon handle returned by [`PlatformProvider::render_icon`].
pub enum PlatformIcon {
    /// Already decoded bitmap, encoded as-is.
    Bitmap(DynamicImage),
    /// Needs rasterizing onto a canvas first.
    Drawable(Box<dyn Drawable>),
}

impl std::fmt::Debug for PlatformIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformIcon::Bitmap(img) => write!(f, "Bitmap({}x{})", img.width(), img.height()),
            PlatformIcon::Drawable(d) => write!(
                f,
                "Drawable({}x{})",
                d.intrinsic_width(),
                d.intrinsic_height()
            ),
        }
    }
}

/// Provider failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Package {0} not found")]
    PackageNotFound(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Trait that every platform backend must implement.
/// All calls are blocking and may be slow.
pub trait PlatformProvider: Send + Sync {
    /// List descriptors for every installed application.
    fn list_all_descriptors(&self) -> ProviderResult<Vec<RawDescriptor>>;

    /// Resolve a single package. Fails with `PackageNotFound` if absent.
    fn resolve_descriptor(&self, package: &str) -> ProviderResult<RawDescriptor>;

    /// Launch intent for a package, if it has an entry point.
    fn launch_intent(&self, package: &str) -> Option<Intent>;

    /// Whether the package has a launchable entry point.
    fn has_launch_entry_point(&self, package: &str) -> bool {
        self.launch_intent(package).is_some()
    }

    /// Render the icon for a descriptor.
    fn render_icon(&self, descriptor: &RawDescriptor) -> ProviderResult<PlatformIcon>;

    /// Encode an icon handle to PNG bytes.
    fn encode_image_to_bytes(&self, icon: PlatformIcon) -> ProviderResult<Vec<u8>> {
        crate::icon::encode_icon(icon)
    }

    /// Version name and code for a package.
    fn resolve_version_info(&self, package: &str) -> ProviderResult<VersionInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(flags: u32) -> RawDescriptor {
        RawDescriptor {
            package_identifier: "com.example".to_string(),
            flags,
            ..Default::default()
        }
    }

    #[test]
    fn test_system_flags_are_or_combined() {
        assert!(!descriptor(0).is_system_app());
        assert!(descriptor(FLAG_SYSTEM).is_system_app());
        assert!(descriptor(FLAG_UPDATED_SYSTEM_APP).is_system_app());
        assert!(descriptor(FLAG_SYSTEM | FLAG_UPDATED_SYSTEM_APP).is_system_app());
        assert!(!descriptor(1 << 3).is_system_app());
    }
}
