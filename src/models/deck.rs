//! Deck: the ordered element collection and its drawing surface.
//!
//! The deck is the sole owner of its elements; insertion order fixes the
//! paint/z-order, and downstream consumers never see family boundaries.

use std::time::Instant;

use crate::models::element::{Element, InteractionState};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

/// Outcome of the asynchronous background-image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundState {
    /// Load still in flight; the surface shows geometry-derived dimensions.
    #[default]
    Loading,
    /// Image loaded; the surface took its natural dimensions.
    Loaded,
    /// Load failed; the surface keeps geometry-derived dimensions and is
    /// drawn with an error border.
    Errored,
}

/// The simulated controller surface.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Deck name; the device context for routed events.
    pub name: String,
    elements: Vec<Element>,
    surface: SurfaceSize,
    background: BackgroundState,
    background_color: Option<(u8, u8, u8)>,
    attached: bool,
}

impl Deck {
    /// Creates an empty deck with a geometry-derived surface size.
    #[must_use]
    pub fn new(name: impl Into<String>, surface: SurfaceSize) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            surface,
            background: BackgroundState::Loading,
            background_color: None,
            attached: false,
        }
    }

    /// Appends an element; insertion order is paint order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements on the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the deck has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element by collection index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Mutable element by collection index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Current surface dimensions.
    #[must_use]
    pub const fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Current background load state.
    #[must_use]
    pub const fn background(&self) -> BackgroundState {
        self.background
    }

    /// Optional background fill color.
    #[must_use]
    pub const fn background_color(&self) -> Option<(u8, u8, u8)> {
        self.background_color
    }

    /// Sets the background fill color (from the descriptor).
    pub fn set_background_color(&mut self, color: Option<(u8, u8, u8)>) {
        self.background_color = color;
    }

    /// Applies a successfully loaded background image: the surface takes
    /// the image's natural dimensions.
    pub fn apply_background(&mut self, width: u32, height: u32) {
        self.surface = SurfaceSize { width, height };
        self.background = BackgroundState::Loaded;
    }

    /// Marks the background load failed.
    ///
    /// The surface keeps its geometry-derived dimensions and the element
    /// collection is untouched; only the error border appears.
    pub fn mark_background_errored(&mut self) {
        self.background = BackgroundState::Errored;
    }

    /// Host window height for the current surface: image height plus the
    /// fixed title-bar allowance.
    #[must_use]
    pub const fn window_height(&self) -> u32 {
        self.surface.height + crate::constants::TITLE_BAR_ALLOWANCE
    }

    /// Binds pointer handling to the active render surface.
    ///
    /// Intended to run exactly once per surface; a second attach is
    /// reported and ignored. Returns the number of interactive elements
    /// bound.
    pub fn attach_interactions(&mut self) -> usize {
        if self.attached {
            tracing::warn!(deck = %self.name, "interactions already attached to this surface");
            return 0;
        }
        self.attached = true;
        self.elements
            .iter()
            .filter(|e| e.kind().is_interactive())
            .count()
    }

    /// Unbinds pointer handling, resets transient interaction state and
    /// cancels pending highlight reverts so none can fire afterwards.
    pub fn detach_interactions(&mut self) {
        self.attached = false;
        for element in &mut self.elements {
            element.state = InteractionState::Idle;
            element.cancel_highlight();
        }
    }

    /// Whether interactions are currently attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Finds the interactive element under a pixel position.
    ///
    /// Later elements paint on top of earlier ones, so the search walks
    /// insertion order backwards. Sliders and labels never attach handlers
    /// and are invisible to the search; before `attach_interactions` the
    /// surface reacts to nothing.
    #[must_use]
    pub fn hit_test(&self, px: f32, py: f32) -> Option<usize> {
        if !self.attached {
            return None;
        }
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| e.kind().is_interactive() && e.shape.contains(px, py))
            .map(|(i, _)| i)
    }

    /// Clears every highlight whose deadline has passed.
    ///
    /// Returns true when at least one element changed appearance.
    pub fn expire_highlights(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for element in &mut self.elements {
            changed |= element.expire_highlight(now);
        }
        changed
    }
}
