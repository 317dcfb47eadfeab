//! Background-image loading on a worker thread.
//!
//! The surface never blocks on the background: the load runs on its own
//! thread and reports through a channel the event loop polls. Success
//! resizes the surface to the image's natural dimensions; failure leaves
//! the geometry-derived surface in place and flags it errored. Either way
//! the element collection is untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Message sent from the load thread to the event loop.
#[derive(Debug, Clone)]
pub enum BackgroundMessage {
    /// Image decoded; natural dimensions follow.
    Loaded {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// Load or decode failed.
    Failed {
        /// Human-readable failure description.
        error: String,
    },
}

/// Handle for one in-flight background load.
///
/// Owned by the orchestrating host; dropping it detaches the worker, whose
/// late result then has nowhere to land (the no-op teardown guarantee).
#[derive(Debug)]
pub struct BackgroundLoad {
    receiver: Option<Receiver<BackgroundMessage>>,
}

impl BackgroundLoad {
    /// Starts loading the background image from `path`.
    #[must_use]
    pub fn start(path: PathBuf) -> Self {
        let (sender, receiver) = channel();

        thread::spawn(move || {
            let message = match load_dimensions(&path) {
                Ok((width, height)) => BackgroundMessage::Loaded { width, height },
                Err(e) => BackgroundMessage::Failed {
                    error: format!("{} ({})", e, path.display()),
                },
            };
            // The host may have torn down already; a dead channel is fine.
            let _ = sender.send(message);
        });

        Self {
            receiver: Some(receiver),
        }
    }

    /// A handle that reports an immediate failure without spawning.
    ///
    /// Used when the descriptor names no usable image path.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        let (sender, receiver) = channel();
        let _ = sender.send(BackgroundMessage::Failed {
            error: error.into(),
        });
        Self {
            receiver: Some(receiver),
        }
    }

    /// Polls for the load result without blocking.
    ///
    /// Returns `Some` exactly once per load; afterwards the handle is
    /// settled and keeps returning `None`.
    pub fn poll(&mut self) -> Option<BackgroundMessage> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(message) => {
                self.receiver = None;
                Some(message)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(BackgroundMessage::Failed {
                    error: "background loader thread exited without a result".to_string(),
                })
            }
        }
    }

    /// Whether a result is still outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Resolves the descriptor-declared image filename against the fixed
/// assets prefix.
#[must_use]
pub fn resolve_background_path(assets_dir: &Path, image: &str) -> PathBuf {
    assets_dir.join(image)
}

/// Reads and decodes the image, returning its natural dimensions.
fn load_dimensions(path: &Path) -> anyhow::Result<(u32, u32)> {
    use anyhow::Context;

    let bytes = fs::read(path).context("Failed to read background image")?;
    let image = image::load_from_memory(&bytes).context("Failed to decode background image")?;
    Ok((image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait_for(load: &mut BackgroundLoad) -> BackgroundMessage {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(message) = load.poll() {
                return message;
            }
            assert!(Instant::now() < deadline, "background load never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    // Smallest valid PNG: 1x1, produced once with the image crate.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
        0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x08,
        0xd7, 0x63, 0xf8, 0xcf, 0xc0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xdd, 0x8d,
        0xb0, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_load_reports_natural_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(TINY_PNG).unwrap();

        let mut load = BackgroundLoad::start(path);
        match wait_for(&mut load) {
            BackgroundMessage::Loaded { width, height } => {
                assert_eq!((width, height), (1, 1));
            }
            BackgroundMessage::Failed { error } => panic!("unexpected failure: {error}"),
        }
        // Settled handles stay quiet.
        assert!(load.poll().is_none());
        assert!(!load.is_pending());
    }

    #[test]
    fn test_missing_file_fails_without_panicking() {
        let mut load = BackgroundLoad::start(PathBuf::from("/nonexistent/background.png"));
        assert!(matches!(
            wait_for(&mut load),
            BackgroundMessage::Failed { .. }
        ));
    }

    #[test]
    fn test_undecodable_bytes_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background.png");
        fs::write(&path, b"not an image").unwrap();

        let mut load = BackgroundLoad::start(path);
        assert!(matches!(
            wait_for(&mut load),
            BackgroundMessage::Failed { .. }
        ));
    }

    #[test]
    fn test_immediate_failure_handle() {
        let mut load = BackgroundLoad::failed("no image declared");
        match wait_for(&mut load) {
            BackgroundMessage::Failed { error } => assert_eq!(error, "no image declared"),
            BackgroundMessage::Loaded { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn test_resolve_background_path_is_prefix_concat() {
        let path = resolve_background_path(Path::new("/opt/deck/resources"), "background.png");
        assert_eq!(path, Path::new("/opt/deck/resources/background.png"));
    }
}
