//! Orchestration services around the deck models.
//!
//! Building a deck from its descriptor, loading the background surface,
//! applying per-key image updates and driving pointer gesture sessions.

pub mod background;
pub mod builder;
pub mod key_images;
pub mod pointer;

pub use background::{resolve_background_path, BackgroundLoad, BackgroundMessage};
pub use builder::{build_deck, fallback_surface};
pub use key_images::{KeyImage, KeyImageStore};
pub use pointer::PointerSession;
