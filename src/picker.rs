use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Error;

/// Outcome of a permission prompt. Denial is a user decision, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Options handed to the device capture/selection UI. Fixed by the
/// pipeline: square crop, source-side quality 0.8.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub allows_editing: bool,
    /// Aspect constraint as (w, h).
    pub aspect: (u32, u32),
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: (1, 1),
            quality: 0.8,
        }
    }
}

/// What the capture/selection UI came back with.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// User confirmed an image; path to the raw (pre-normalization) file.
    Selected(PathBuf),
    /// User backed out. A no-op for the caller, not an error.
    Cancelled,
}

/// Device capture/selection collaborator. Implemented by the host over the
/// platform picker; implemented by stubs in tests so the pipeline runs
/// without a device.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn request_camera_permission(&self) -> PermissionStatus;
    async fn request_library_permission(&self) -> PermissionStatus;
    async fn capture(&self, options: &PickerOptions) -> Result<PickOutcome, Error>;
    async fn pick_from_library(&self, options: &PickerOptions) -> Result<PickOutcome, Error>;
}
