//! Deck construction from a device descriptor.
//!
//! Walks every control family in declaration order, computes each control's
//! position through the geometry engine and appends a correctly-kinded
//! element to one shared collection. Family boundaries are invisible to
//! downstream consumers; only the element order remains.

use anyhow::{Context, Result};

use crate::models::{
    Deck, DeckDescriptor, Element, ElementKind, FamilySpec, Shape, SurfaceSize,
};

/// Builds a deck from a validated descriptor.
///
/// The surface starts with geometry-derived dimensions; a later successful
/// background load replaces them with the image's natural size. Geometry
/// errors are fatal: a descriptor that cannot address a whole family never
/// yields a partial deck.
pub fn build_deck(descriptor: &DeckDescriptor) -> Result<Deck> {
    descriptor
        .validate()
        .with_context(|| format!("Rejecting descriptor '{}'", descriptor.name))?;

    let mut deck = Deck::new(descriptor.name.clone(), fallback_surface(descriptor)?);
    deck.set_background_color(descriptor.background.rgb());

    for family in &descriptor.families {
        let geometry = family.geometry(&descriptor.background)?;
        for index in 0..geometry.count() {
            let (x, y) = geometry
                .position(index)
                .with_context(|| format!("Family '{}' index {}", family.name, index))?;
            let shape = control_shape(family, x, y);
            deck.push(Element::new(
                element_name(family, index),
                index,
                family.kind,
                shape,
            ));
        }
    }

    Ok(deck)
}

/// Surface dimensions derived purely from grid geometry.
///
/// Used while the background image is loading and kept when the load
/// fails: the widest/tallest family extent wins.
pub fn fallback_surface(descriptor: &DeckDescriptor) -> Result<SurfaceSize> {
    let mut width = 0;
    let mut height = 0;
    for family in &descriptor.families {
        let (w, h) = family.geometry(&descriptor.background)?.extent();
        width = width.max(w);
        height = height.max(h);
    }
    Ok(SurfaceSize { width, height })
}

/// Shape of one control of a family, anchored at the cell's top-left.
///
/// Round keys and encoders are circles inscribed in their cell; everything
/// else keeps the rectangular cell outline.
fn control_shape(family: &FamilySpec, x: u32, y: u32) -> Shape {
    match family.kind {
        ElementKind::RoundKey | ElementKind::Encoder => {
            let radius = family.cell[0].min(family.cell[1]) / 2;
            Shape::Circle {
                cx: x + family.cell[0] / 2,
                cy: y + family.cell[1] / 2,
                radius,
            }
        }
        ElementKind::Key | ElementKind::Touchscreen | ElementKind::Slider | ElementKind::Label => {
            Shape::Rect {
                x,
                y,
                w: family.cell[0],
                h: family.cell[1],
                corner_radius: family.corner_radius,
            }
        }
    }
}

/// Element name within the deck.
///
/// Single-control families (a lone slider, one side screen) use the bare
/// prefix; grids append the family-relative index.
fn element_name(family: &FamilySpec, index: u32) -> String {
    if family.count() == 1 {
        family.name.clone()
    } else {
        format!("{}{}", family.name, index)
    }
}
