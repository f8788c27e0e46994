//! Photo Staging: at most one business-card photo, staged for the clipboard.
//!
//! A selected image fans out into two independent async paths: one decodes
//! a preview for the UI, the other normalizes the pixels into an RGBA
//! buffer for the clipboard. Neither path orders before the other; the
//! preview can show up while the buffer is still cooking. A generation
//! counter ties every completion back to the selection that started it, so
//! a slow decode of a superseded selection can never overwrite a newer one.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use iced::widget::image::Handle;

/// File extensions accepted by the photo picker.
pub const IMAGE_EXTENSIONS: [&str; 8] = [
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff",
];

/// Clipboard-ready pixels: RGBA8 at the image's natural dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The single staged-photo slot.
#[derive(Debug, Default)]
pub struct PhotoStaging {
    /// Bumped on every accepted selection and every clear. Completions
    /// carrying an older generation are discarded.
    generation: u64,
    preview: Option<Handle>,
    buffer: Option<StagedBuffer>,
}

impl PhotoStaging {
    /// Accept a new selection if the path looks like an image.
    ///
    /// Returns the generation token the async decode paths must hand back
    /// with their results, or `None` for a non-image selection, which
    /// leaves the current state completely untouched.
    pub fn select(&mut self, path: &Path) -> Option<u64> {
        if !is_image_file(path) {
            return None;
        }
        self.generation += 1;
        self.preview = None;
        self.buffer = None;
        Some(self.generation)
    }

    /// Install the preview, unless a newer selection or a clear happened in
    /// the meantime.
    pub fn set_preview(&mut self, token: u64, handle: Handle) {
        if token == self.generation {
            self.preview = Some(handle);
        }
    }

    /// Install the clipboard buffer, same staleness rule as the preview.
    pub fn set_buffer(&mut self, token: u64, buffer: StagedBuffer) {
        if token == self.generation {
            self.buffer = Some(buffer);
        }
    }

    /// Drop the staged photo. Idempotent; also invalidates any decode
    /// still in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.preview = None;
        self.buffer = None;
    }

    /// Is a photo staged (visible preview, or decode pending)?
    pub fn has_photo(&self) -> bool {
        self.preview.is_some() || self.buffer.is_some()
    }

    pub fn preview(&self) -> Option<&Handle> {
        self.preview.as_ref()
    }

    /// The staged buffer, or `None` while the re-encode is still running.
    /// Not-ready is a soft condition: the buffer is prepared speculatively
    /// and may lag behind the visible preview.
    pub fn buffer_for_clipboard(&self) -> Option<&StagedBuffer> {
        self.buffer.as_ref()
    }
}

/// Does the path's extension look like an image? This mirrors the file
/// picker's filter; nothing outside the app enforces it.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read the selected file and wrap it into a preview handle.
pub async fn load_preview(path: PathBuf) -> Result<Handle, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(Handle::from_bytes(bytes))
}

/// Decode the selected file and normalize it to clipboard-ready RGBA8.
/// Runs the CPU-bound decode on a blocking thread.
pub async fn encode_buffer(path: PathBuf) -> Result<StagedBuffer, String> {
    tokio::task::spawn_blocking(move || {
        let img = image::open(&path)
            .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(StagedBuffer {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Place the staged pixels on the system clipboard as an image.
pub fn copy_to_clipboard(buffer: &StagedBuffer) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {}", e))?;
    clipboard
        .set_image(arboard::ImageData {
            width: buffer.width as usize,
            height: buffer.height as usize,
            bytes: Cow::Borrowed(&buffer.rgba),
        })
        .map_err(|e| format!("Clipboard write failed: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> StagedBuffer {
        StagedBuffer {
            width: 2,
            height: 1,
            rgba: vec![0, 0, 0, 255, 255, 255, 255, 255],
        }
    }

    #[test]
    fn test_non_image_selection_is_a_noop() {
        let mut photo = PhotoStaging::default();
        let token = photo.select(Path::new("card.png")).unwrap();
        photo.set_buffer(token, buffer());

        let before = photo.buffer_for_clipboard().cloned();
        assert!(photo.select(Path::new("notes.txt")).is_none());
        assert!(photo.select(Path::new("no_extension")).is_none());

        // Prior staged state is byte-for-byte unchanged.
        assert_eq!(photo.buffer_for_clipboard().cloned(), before);
        assert!(photo.has_photo());
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(is_image_file(Path::new("IMG_0001.JPG")));
        assert!(is_image_file(Path::new("scan.Png")));
        assert!(!is_image_file(Path::new("scan.pdf")));
    }

    #[test]
    fn test_clear_when_empty_is_idempotent() {
        let mut photo = PhotoStaging::default();
        assert!(!photo.has_photo());
        photo.clear();
        assert!(!photo.has_photo());
        assert!(photo.preview().is_none());
        assert!(photo.buffer_for_clipboard().is_none());
    }

    #[test]
    fn test_stale_buffer_completion_is_discarded() {
        let mut photo = PhotoStaging::default();
        let old = photo.select(Path::new("first.png")).unwrap();
        let new = photo.select(Path::new("second.png")).unwrap();
        assert_ne!(old, new);

        // The slow decode of the first selection lands after the second
        // selection already started.
        photo.set_buffer(old, buffer());
        assert!(photo.buffer_for_clipboard().is_none());

        photo.set_buffer(new, buffer());
        assert!(photo.buffer_for_clipboard().is_some());
    }

    #[test]
    fn test_clear_invalidates_in_flight_decode() {
        let mut photo = PhotoStaging::default();
        let token = photo.select(Path::new("card.png")).unwrap();
        photo.clear();

        photo.set_buffer(token, buffer());
        assert!(!photo.has_photo());
        assert!(photo.buffer_for_clipboard().is_none());
    }

    #[test]
    fn test_new_selection_discards_previous_photo() {
        let mut photo = PhotoStaging::default();
        let token = photo.select(Path::new("first.png")).unwrap();
        photo.set_buffer(token, buffer());
        assert!(photo.has_photo());

        photo.select(Path::new("second.png")).unwrap();
        assert!(photo.buffer_for_clipboard().is_none());
    }
}
