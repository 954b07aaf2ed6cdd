use iced::widget::image::Handle;
use image::imageops::FilterType;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

/// Why a card image could not be shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("failed to download image: {0}")]
    Fetch(String),
    #[error("failed to read local image: {0}")]
    Io(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("unsupported image url: {0}")]
    UnsupportedUrl(String),
}

/// Load a card image and shrink it to a thumbnail.
///
/// `http(s)` urls are downloaded, `file://` urls are read from disk
/// (a picked file is never uploaded, so that is the only place it exists).
pub async fn load_thumbnail(client: Client, url: String, size: u32) -> Result<Handle, MediaError> {
    let bytes = fetch_bytes(&client, &url).await?;

    // Spawn blocking because decoding and resizing is CPU-bound
    let (width, height, pixels) = tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, size))
        .await
        .map_err(|e| MediaError::Decode(format!("Task join error: {}", e)))??;

    debug!(%url, width, height, "🖼️ Thumbnail ready");
    Ok(Handle::from_rgba(width, height, pixels))
}

async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, MediaError> {
    let parsed = Url::parse(url).map_err(|_| MediaError::UnsupportedUrl(url.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {
            let response = client
                .get(parsed)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|e| MediaError::Fetch(e.to_string()))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| MediaError::Fetch(e.to_string()))?;
            Ok(bytes.to_vec())
        }
        "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|_| MediaError::UnsupportedUrl(url.to_string()))?;
            tokio::fs::read(&path)
                .await
                .map_err(|e| MediaError::Io(format!("{}: {}", path.display(), e)))
        }
        _ => Err(MediaError::UnsupportedUrl(url.to_string())),
    }
}

/// Decode any supported format and resize to fit a `size` square.
/// Returns width, height and RGBA pixels.
fn decode_thumbnail(bytes: &[u8], size: u32) -> Result<(u32, u32, Vec<u8>), MediaError> {
    let img = image::load_from_memory(bytes).map_err(|e| MediaError::Decode(e.to_string()))?;

    // Never upscale
    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok((rgba.width(), rgba.height(), rgba.into_raw()))
}
