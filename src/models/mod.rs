//! Data models for the deck simulation.
//!
//! The descriptor describes a deck model; the geometry engine maps family
//! indices to surface positions; elements carry interaction state; the deck
//! owns the ordered element collection.

pub mod deck;
pub mod descriptor;
pub mod element;
pub mod geometry;

pub use deck::{BackgroundState, Deck, SurfaceSize};
pub use descriptor::{BackgroundSpec, DeckDescriptor, FamilySpec};
pub use element::{
    CursorHint, Element, ElementKind, EncoderDirection, InteractionState, Shape,
};
pub use geometry::FamilyGeometry;
