//! Exportable geometry records.
//!
//! Walks the live element collection in insertion order and emits, per
//! element, its kind tag plus the parameters authoritative for that kind.
//! The record rebuilds an equivalent deck; transient interaction state and
//! placement-only labels are not preserved.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Deck, Element, ElementKind, Shape, SurfaceSize};

/// Geometry of one exported element.
///
/// `position` is the rectangle's top-left corner or the circle's center;
/// `size`/`corner_radius` are present for rectangles, `radius` for
/// circles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element name.
    pub name: String,
    /// Element kind tag.
    pub kind: ElementKind,
    /// Anchor position `[x, y]`.
    pub position: [u32; 2],
    /// Rectangle size `[w, h]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
    /// Rectangle corner radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<u32>,
    /// Circle radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

/// Exportable record of a whole deck's geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Deck name.
    pub deck: String,
    /// Export timestamp, RFC 3339.
    pub exported: String,
    /// Surface dimensions `[w, h]` at export time.
    pub surface: [u32; 2],
    /// Per-element geometry in insertion order.
    pub elements: Vec<ElementRecord>,
}

/// Exports the deck's live collection as a geometry record.
///
/// Labels carry no exportable geometry and are skipped by design.
#[must_use]
pub fn export_deck(deck: &Deck) -> GeometryRecord {
    let elements = deck
        .elements()
        .iter()
        .filter(|e| e.kind().is_exportable())
        .map(element_record)
        .collect();

    GeometryRecord {
        deck: deck.name.clone(),
        exported: chrono::Utc::now().to_rfc3339(),
        surface: [deck.surface().width, deck.surface().height],
        elements,
    }
}

/// Rebuilds an equivalent deck from a geometry record.
///
/// The rebuilt deck starts with every element idle and the background in
/// its loading state; only geometry is reconstructed.
pub fn rebuild_deck(record: &GeometryRecord) -> Result<Deck> {
    let mut deck = Deck::new(
        record.deck.clone(),
        SurfaceSize {
            width: record.surface[0],
            height: record.surface[1],
        },
    );

    for (index, entry) in record.elements.iter().enumerate() {
        let shape = record_shape(entry)
            .with_context(|| format!("Element '{}' in record '{}'", entry.name, record.deck))?;
        deck.push(Element::new(
            entry.name.clone(),
            index as u32,
            entry.kind,
            shape,
        ));
    }

    Ok(deck)
}

/// The authoritative parameters for one element.
fn element_record(element: &Element) -> ElementRecord {
    match element.shape {
        Shape::Rect {
            x,
            y,
            w,
            h,
            corner_radius,
        } => ElementRecord {
            name: element.name.clone(),
            kind: element.kind(),
            position: [x, y],
            size: Some([w, h]),
            corner_radius: Some(corner_radius),
            radius: None,
        },
        Shape::Circle { cx, cy, radius } => ElementRecord {
            name: element.name.clone(),
            kind: element.kind(),
            position: [cx, cy],
            size: None,
            corner_radius: None,
            radius: Some(radius),
        },
    }
}

/// Shape from a record entry; the kind decides which parameters are
/// required.
fn record_shape(entry: &ElementRecord) -> Result<Shape> {
    match entry.kind {
        ElementKind::RoundKey | ElementKind::Encoder => {
            let radius = entry
                .radius
                .context("circular element record is missing its radius")?;
            Ok(Shape::Circle {
                cx: entry.position[0],
                cy: entry.position[1],
                radius,
            })
        }
        ElementKind::Key | ElementKind::Touchscreen | ElementKind::Slider | ElementKind::Label => {
            let size = entry
                .size
                .context("rectangular element record is missing its size")?;
            Ok(Shape::Rect {
                x: entry.position[0],
                y: entry.position[1],
                w: size[0],
                h: size[1],
                corner_radius: entry.corner_radius.unwrap_or(0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new(
            "sample",
            SurfaceSize {
                width: 400,
                height: 300,
            },
        );
        deck.push(Element::new(
            "k0",
            0,
            ElementKind::Key,
            Shape::Rect {
                x: 10,
                y: 10,
                w: 72,
                h: 72,
                corner_radius: 8,
            },
        ));
        deck.push(Element::new(
            "e0",
            0,
            ElementKind::Encoder,
            Shape::Circle {
                cx: 200,
                cy: 50,
                radius: 24,
            },
        ));
        deck.push(Element::new(
            "title",
            0,
            ElementKind::Label,
            Shape::Rect {
                x: 0,
                y: 280,
                w: 120,
                h: 20,
                corner_radius: 0,
            },
        ));
        deck
    }

    #[test]
    fn test_export_skips_labels() {
        let record = export_deck(&sample_deck());
        assert_eq!(record.elements.len(), 2);
        assert!(record.elements.iter().all(|e| e.kind != ElementKind::Label));
    }

    #[test]
    fn test_export_emits_kind_authoritative_parameters() {
        let record = export_deck(&sample_deck());

        let key = &record.elements[0];
        assert_eq!(key.position, [10, 10]);
        assert_eq!(key.size, Some([72, 72]));
        assert_eq!(key.corner_radius, Some(8));
        assert_eq!(key.radius, None);

        let encoder = &record.elements[1];
        assert_eq!(encoder.position, [200, 50]);
        assert_eq!(encoder.size, None);
        assert_eq!(encoder.radius, Some(24));
    }

    #[test]
    fn test_round_trip_preserves_geometry() {
        let original = sample_deck();
        let record = export_deck(&original);
        let rebuilt = rebuild_deck(&record).unwrap();

        assert_eq!(rebuilt.name, original.name);
        assert_eq!(rebuilt.surface(), original.surface());
        // Labels are gone; everything else round-trips exactly.
        assert_eq!(rebuilt.len(), 2);
        for (a, b) in rebuilt.elements().iter().zip(original.elements()) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.shape, b.shape);
            assert_eq!(a.name, b.name);
        }
    }

    #[test]
    fn test_rebuild_rejects_malformed_record() {
        let mut record = export_deck(&sample_deck());
        record.elements[1].radius = None;
        assert!(rebuild_deck(&record).is_err());
    }

    #[test]
    fn test_record_serializes_without_absent_fields() {
        let record = export_deck(&sample_deck());
        let json = serde_json::to_value(&record).unwrap();
        // Circle entries omit rectangle fields entirely.
        assert!(json["elements"][1].get("size").is_none());
        assert_eq!(json["elements"][1]["kind"], "encoder");
    }
}
