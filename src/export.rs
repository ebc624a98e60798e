use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;

/// Download a generated result to a local file so the host can hand it to
/// the platform share sheet. The file is created on demand and not tracked;
/// cleanup is the host's concern.
pub async fn download_for_share(
    client: &reqwest::Client,
    image_url: &str,
    dir: &Path,
) -> Result<PathBuf, Error> {
    let response = client
        .get(image_url)
        .send()
        .await
        .map_err(|e| Error::Export(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Export(format!("status={status} for {image_url}")));
    }

    let bytes: bytes::Bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Export(e.to_string()))?;

    let path = dir.join(format!("shared-{}.jpg", Uuid::new_v4()));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| Error::Export(e.to_string()))?;

    info!("📤 Downloaded shared image to {}", path.display());
    Ok(path)
}
