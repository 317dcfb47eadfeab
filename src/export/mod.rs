//! Export functionality for deck geometry.
//!
//! The serializer walks the live element collection and produces a record
//! that can rebuild an equivalent deck; the record is plain JSON so the
//! companion backend can consume it too.

pub mod geometry_record;

pub use geometry_record::{export_deck, rebuild_deck, ElementRecord, GeometryRecord};
