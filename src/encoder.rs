use base64::Engine;

use crate::error::Error;
use crate::models::AcquiredImage;

/// Encode a normalized image as a self-describing data URL
/// (`data:image/jpeg;base64,…`) for embedding in a generation request.
/// The pipeline normalizes to JPEG, so the MIME tag is fixed.
pub async fn encode_data_url(image: &AcquiredImage) -> Result<String, Error> {
    let bytes = tokio::fs::read(&image.local_ref)
        .await
        .map_err(|e| Error::Encoding(e.to_string()))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:image/jpeg;base64,{b64}"))
}
