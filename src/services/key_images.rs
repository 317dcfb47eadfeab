//! Per-key image updates.
//!
//! The backend repaints individual controls by sending encoded image bytes
//! addressed by (deck, control-index). Decodes are independent of one
//! another and last-write-wins: a late arrival simply repaints that one
//! key. A payload identical to the current one (by SHA-256 digest) skips
//! the repaint.

use std::collections::HashMap;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// A decoded key image, reduced to what the terminal surface can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyImage {
    /// Natural width of the decoded image.
    pub width: u32,
    /// Natural height of the decoded image.
    pub height: u32,
    /// Mean RGB of the image; the cell tint on the terminal surface.
    pub average: (u8, u8, u8),
    digest: String,
}

/// Store of the most recent image per control index.
#[derive(Debug, Default)]
pub struct KeyImageStore {
    images: HashMap<u32, KeyImage>,
}

impl KeyImageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `bytes` and paints them onto the control at `index`.
    ///
    /// Returns `Ok(true)` when the control was repainted, `Ok(false)` when
    /// the payload matched the current image and was skipped. A decode
    /// failure is local to this one control: the caller reports it and the
    /// region stays as it was.
    pub fn apply(&mut self, index: u32, bytes: &[u8]) -> Result<bool> {
        let digest = payload_digest(bytes);
        if self
            .images
            .get(&index)
            .is_some_and(|current| current.digest == digest)
        {
            return Ok(false);
        }

        let decoded = image::load_from_memory(bytes)
            .with_context(|| format!("Failed to decode image payload for control {index}"))?;
        let rgba = decoded.to_rgba8();
        let average = average_rgb(&rgba);

        self.images.insert(
            index,
            KeyImage {
                width: decoded.width(),
                height: decoded.height(),
                average,
                digest,
            },
        );
        Ok(true)
    }

    /// The current image for a control, if one has been painted.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&KeyImage> {
        self.images.get(&index)
    }

    /// Number of painted controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when nothing has been painted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// SHA-256 digest of an image payload, as lowercase hex.
fn payload_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Mean RGB over all pixels, alpha ignored.
fn average_rgb(rgba: &image::RgbaImage) -> (u8, u8, u8) {
    let mut sums = [0u64; 3];
    let count = u64::from(rgba.width()) * u64::from(rgba.height());
    if count == 0 {
        return (0, 0, 0);
    }
    for pixel in rgba.pixels() {
        sums[0] += u64::from(pixel.0[0]);
        sums[1] += u64::from(pixel.0[1]);
        sums[2] += u64::from(pixel.0[2]);
    }
    (
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}
