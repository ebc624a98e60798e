use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Permission};
use crate::models::AcquiredImage;
use crate::picker::{ImageSource, PickOutcome, PickerOptions, PermissionStatus};

/// Normalization bounds applied to every acquired image before transport.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    pub max_width: u32,
    /// JPEG quality, 0–100.
    pub quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_width: 1024,
            quality: 80,
        }
    }
}

/// Resize so width ≤ `max_width` (height scaled proportionally, never
/// upscaled) and re-encode as JPEG. Returns the encoded bytes and the
/// output dimensions.
pub fn normalize_image_bytes(
    bytes: &[u8],
    options: &NormalizeOptions,
) -> Result<(Vec<u8>, u32, u32), Error> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Acquisition(e.to_string()))?;
    let (w, h) = (img.width(), img.height());

    let img = if w > options.max_width {
        let scaled_h = ((h as u64 * options.max_width as u64) / w as u64).max(1) as u32;
        img.resize_exact(options.max_width, scaled_h, FilterType::Lanczos3)
    } else {
        img
    };
    let (out_w, out_h) = (img.width(), img.height());

    // JPEG has no alpha channel.
    let img = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, options.quality))
        .map_err(|e| Error::Acquisition(e.to_string()))?;
    Ok((buf, out_w, out_h))
}

/// Acquire → normalize pipeline over a device [`ImageSource`]. Produces
/// [`AcquiredImage`]s pointing at normalized JPEGs in the scratch
/// directory; never exposes a partially processed image.
pub struct ImageAcquisitionPipeline {
    source: Arc<dyn ImageSource>,
    picker_options: PickerOptions,
    normalize_options: NormalizeOptions,
    scratch_dir: PathBuf,
}

impl ImageAcquisitionPipeline {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            picker_options: PickerOptions::default(),
            normalize_options: NormalizeOptions::default(),
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Where normalized images are written. Defaults to the OS temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// `Ok(Some(_))` on a new acquisition, `Ok(None)` if the user
    /// cancelled, `Err` on denied permission or I/O failure.
    pub async fn capture_from_camera(&self) -> Result<Option<AcquiredImage>, Error> {
        if self.source.request_camera_permission().await == PermissionStatus::Denied {
            return Err(Error::PermissionDenied(Permission::Camera));
        }
        let outcome = self.source.capture(&self.picker_options).await?;
        self.finish(outcome).await
    }

    pub async fn pick_from_library(&self) -> Result<Option<AcquiredImage>, Error> {
        if self.source.request_library_permission().await == PermissionStatus::Denied {
            return Err(Error::PermissionDenied(Permission::PhotoLibrary));
        }
        let outcome = self.source.pick_from_library(&self.picker_options).await?;
        self.finish(outcome).await
    }

    async fn finish(&self, outcome: PickOutcome) -> Result<Option<AcquiredImage>, Error> {
        let raw_path = match outcome {
            PickOutcome::Selected(path) => path,
            PickOutcome::Cancelled => return Ok(None),
        };

        let raw = tokio::fs::read(&raw_path)
            .await
            .map_err(|e| Error::Acquisition(e.to_string()))?;
        let (normalized, width, height) = normalize_image_bytes(&raw, &self.normalize_options)?;

        let local_ref = self.scratch_dir.join(format!("{}.jpg", Uuid::new_v4()));
        tokio::fs::write(&local_ref, &normalized)
            .await
            .map_err(|e| Error::Acquisition(e.to_string()))?;

        info!(
            "🖼️ Normalized acquired image to {}x{} at {}",
            width,
            height,
            local_ref.display()
        );
        Ok(Some(AcquiredImage {
            local_ref,
            width,
            height,
            created_at: Utc::now(),
        }))
    }
}

#[cfg(test)]
pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 80, 40]),
    ));
    let mut buf = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 90))
        .unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct StubSource {
        permission: PermissionStatus,
        outcome: PickOutcome,
    }

    #[async_trait]
    impl ImageSource for StubSource {
        async fn request_camera_permission(&self) -> PermissionStatus {
            self.permission
        }
        async fn request_library_permission(&self) -> PermissionStatus {
            self.permission
        }
        async fn capture(&self, _options: &PickerOptions) -> Result<PickOutcome, Error> {
            Ok(self.outcome.clone())
        }
        async fn pick_from_library(&self, _options: &PickerOptions) -> Result<PickOutcome, Error> {
            Ok(self.outcome.clone())
        }
    }

    fn pipeline_with(
        permission: PermissionStatus,
        outcome: PickOutcome,
        scratch: &std::path::Path,
    ) -> ImageAcquisitionPipeline {
        ImageAcquisitionPipeline::new(Arc::new(StubSource {
            permission,
            outcome,
        }))
        .with_scratch_dir(scratch)
    }

    #[test]
    fn wide_images_are_bounded_to_max_width() {
        let (bytes, w, h) = normalize_image_bytes(
            &jpeg_bytes(2048, 1024),
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!((w, h), (1024, 512));
        let reloaded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (1024, 512));
    }

    #[test]
    fn narrow_images_are_not_upscaled() {
        let (_, w, h) =
            normalize_image_bytes(&jpeg_bytes(800, 600), &NormalizeOptions::default()).unwrap();
        assert_eq!((w, h), (800, 600));
    }

    #[test]
    fn garbage_bytes_fail_as_acquisition_error() {
        let err = normalize_image_bytes(b"not an image", &NormalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Acquisition(_)));
    }

    #[tokio::test]
    async fn selection_yields_normalized_acquired_image() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.jpg");
        std::fs::write(&raw, jpeg_bytes(1600, 800)).unwrap();

        let pipeline = pipeline_with(
            PermissionStatus::Granted,
            PickOutcome::Selected(raw),
            dir.path(),
        );
        let acquired = pipeline.pick_from_library().await.unwrap().unwrap();
        assert_eq!((acquired.width, acquired.height), (1024, 512));
        assert!(acquired.local_ref.exists());
    }

    #[tokio::test]
    async fn cancellation_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with(
            PermissionStatus::Granted,
            PickOutcome::Cancelled,
            dir.path(),
        );
        assert_eq!(pipeline.capture_from_camera().await.unwrap(), None);
    }

    #[tokio::test]
    async fn denied_permission_surfaces_without_touching_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with(
            PermissionStatus::Denied,
            PickOutcome::Cancelled,
            dir.path(),
        );
        let err = pipeline.capture_from_camera().await.unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(Permission::Camera)));
        let err = pipeline.pick_from_library().await.unwrap_err();
        assert!(matches!(
            err,
            Error::PermissionDenied(Permission::PhotoLibrary)
        ));
    }

    #[tokio::test]
    async fn missing_raw_file_surfaces_as_acquisition_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_with(
            PermissionStatus::Granted,
            PickOutcome::Selected(dir.path().join("missing.jpg")),
            dir.path(),
        );
        let err = pipeline.pick_from_library().await.unwrap_err();
        assert!(matches!(err, Error::Acquisition(_)));
    }
}
