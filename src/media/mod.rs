/// Card image module
///
/// This module handles:
/// - Downloading recipe images, or reading picked local files
/// - Decoding and shrinking them into thumbnails
/// - Remembering per-url load state for the session

pub mod thumbnail;

use iced::widget::image::Handle;
use std::collections::HashMap;
use tracing::debug;

pub use thumbnail::{load_thumbnail, MediaError};

/// Load state of one image url
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    /// Not retried during the session; the card shows a placeholder
    Failed,
}

/// In-memory thumbnails keyed by image url
#[derive(Debug, Default)]
pub struct Thumbnails {
    entries: HashMap<String, Thumbnail>,
}

impl Thumbnails {
    pub fn get(&self, url: &str) -> Option<&Thumbnail> {
        self.entries.get(url)
    }

    /// Mark every url not seen before as loading and return those.
    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing = Vec::new();
        for url in urls {
            if !self.entries.contains_key(url) {
                self.entries.insert(url.to_string(), Thumbnail::Loading);
                missing.push(url.to_string());
            }
        }
        missing
    }

    pub fn finish(&mut self, url: String, result: Result<Handle, MediaError>) {
        let state = match result {
            Ok(handle) => Thumbnail::Ready(handle),
            Err(err) => {
                debug!(%url, error = %err, "Card image unavailable");
                Thumbnail::Failed
            }
        };
        self.entries.insert(url, state);
    }
}
