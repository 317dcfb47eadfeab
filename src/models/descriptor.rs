//! Device descriptor loaded from a deck layout file.
//!
//! A descriptor declares the control families of one deck model (key grid,
//! encoder bank, round keys, side screens, sliders) plus the background
//! surface. It is read once at build time and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::models::element::ElementKind;
use crate::models::geometry::FamilyGeometry;

/// Specification of one control family.
///
/// A family is a group of same-kind controls laid out on a grid and sharing
/// one geometry formula. `grid` is `[cols, rows]`; `cell`, `spacing` and
/// `offset` are in pixels of the deck surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySpec {
    /// Kind of control this family produces.
    pub kind: ElementKind,
    /// Name prefix for the family's elements (e.g. `"k"` yields `k0`, `k1`, ...).
    pub name: String,
    /// Cell (control image) size as `[w, h]`.
    pub cell: [u32; 2],
    /// Grid dimensions as `[cols, rows]`.
    pub grid: [u32; 2],
    /// Horizontal/vertical gap between cells; inherited from the background
    /// spec when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<[u32; 2]>,
    /// Top-left offset of the family on the surface; inherited from the
    /// background spec when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<[u32; 2]>,
    /// Corner radius for rectangular controls (ignored for circular kinds).
    #[serde(default)]
    pub corner_radius: u32,
}

impl FamilySpec {
    /// Number of controls this family declares (`cols * rows`).
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.grid[0] * self.grid[1]
    }

    /// Resolves the family's geometry parameters against the background
    /// spec (the primary key grid typically takes spacing/offset from
    /// there).
    ///
    /// # Errors
    ///
    /// Returns an error for zero grid dimensions or zero cell size; a
    /// family that cannot address its whole index range rejects the
    /// descriptor at build time.
    pub fn geometry(&self, background: &BackgroundSpec) -> anyhow::Result<FamilyGeometry> {
        let spacing = self.spacing.unwrap_or(background.spacing);
        let offset = self.offset.unwrap_or(background.offset);
        FamilyGeometry::new(self.cell, self.grid, spacing, offset)
    }
}

/// Background surface specification.
///
/// The image path is resolved against the configured assets directory. The
/// spacing/offset pair declared here belongs to the primary key grid;
/// families that do not declare their own inherit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSpec {
    /// Background image filename (resolved against the assets directory).
    pub image: String,
    /// Optional fill color as `#rrggbb`, painted under the image and used
    /// alone when no image loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Spacing used by the primary key grid.
    pub spacing: [u32; 2],
    /// Offset used by the primary key grid.
    pub offset: [u32; 2],
}

impl BackgroundSpec {
    /// Parses the optional `#rrggbb` fill color.
    ///
    /// Malformed colors are treated as absent; the background color is a
    /// cosmetic fallback, not part of the geometry contract.
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.as_ref()?.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// Complete device descriptor for one deck model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDescriptor {
    /// Deck name, used as the device context for routed events.
    pub name: String,
    /// Background surface specification.
    pub background: BackgroundSpec,
    /// Ordered control families; order fixes the element paint order.
    pub families: Vec<FamilySpec>,
}

impl DeckDescriptor {
    /// Validates the descriptor without building a deck.
    ///
    /// Every family must resolve to a well-formed geometry; a descriptor
    /// that cannot is rejected as a whole rather than producing a
    /// partially valid deck.
    pub fn validate(&self) -> anyhow::Result<()> {
        use anyhow::Context;

        if self.name.trim().is_empty() {
            anyhow::bail!("Descriptor has no deck name");
        }
        if self.families.is_empty() {
            anyhow::bail!("Descriptor '{}' declares no control families", self.name);
        }
        for family in &self.families {
            if family.name.trim().is_empty() {
                anyhow::bail!(
                    "Descriptor '{}' has a {} family without a name prefix",
                    self.name,
                    family.kind
                );
            }
            family
                .geometry(&self.background)
                .with_context(|| format!("Invalid geometry for family '{}'", family.name))?;
        }
        Ok(())
    }

    /// Total number of elements the descriptor will produce.
    #[must_use]
    pub fn element_count(&self) -> u32 {
        self.families.iter().map(FamilySpec::count).sum()
    }
}
