//! Pointer gesture session against an attached deck.
//!
//! One session tracks which element the pointer is over and which one is
//! pressed, drives the per-element state machines, and routes the values
//! they emit. Both hosts (the terminal surface and the relay API) share
//! this logic, so a gesture behaves identically however it arrives.

use std::time::Instant;

use crate::models::{CursorHint, Deck};
use crate::router::{DeckEvent, EventRouter};

/// Pointer state across one attached surface.
#[derive(Debug, Default)]
pub struct PointerSession {
    hovered: Option<usize>,
    pressed: Option<usize>,
    cursor: CursorHint,
}

impl PointerSession {
    /// Creates a session with the pointer over nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor affordance.
    #[must_use]
    pub const fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Collection index of the hovered element, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Handles pointer movement to surface position `(px, py)`.
    ///
    /// Derives enter/leave transitions from the previous position and
    /// updates the encoder hover hint. Returns true when hover state or
    /// cursor changed (the surface should redraw).
    pub fn pointer_moved(&mut self, deck: &mut Deck, px: f32, py: f32) -> bool {
        let hit = deck.hit_test(px, py);
        let mut changed = false;

        if hit != self.hovered {
            if let Some(old) = self.hovered.and_then(|i| deck.get_mut(i)) {
                self.cursor = old.pointer_leave();
            } else {
                self.cursor = CursorHint::Default;
            }
            if let Some(new) = hit.and_then(|i| deck.get_mut(i)) {
                self.cursor = new.pointer_enter();
            }
            self.hovered = hit;
            changed = true;
        }

        if let Some(element) = self.hovered.and_then(|i| deck.get_mut(i)) {
            if let Some(hint) = element.pointer_move(px) {
                changed |= hint != self.cursor;
                self.cursor = hint;
            }
        }

        changed
    }

    /// Handles a pointer press at surface position `(px, py)`.
    ///
    /// Returns the routed event when the pressed element emits one.
    pub fn pointer_pressed(
        &mut self,
        deck: &mut Deck,
        router: &EventRouter,
        px: f32,
        py: f32,
        now: Instant,
    ) -> Option<DeckEvent> {
        // A press lands wherever the pointer actually is, even if no move
        // event preceded it (gesture injection does this).
        let index = deck.hit_test(px, py)?;
        if self.hovered != Some(index) {
            if let Some(old) = self.hovered.and_then(|i| deck.get_mut(i)) {
                old.pointer_leave();
            }
            if let Some(new) = deck.get_mut(index) {
                self.cursor = new.pointer_enter();
            }
            self.hovered = Some(index);
        }

        self.pressed = Some(index);
        let element = deck.get_mut(index)?;
        let value = element.pointer_down(px, now)?;
        let name = element.name.clone();
        Some(router.route(&name, value))
    }

    /// Handles a pointer release.
    ///
    /// The release resolves the pressed element's state machine regardless
    /// of where the pointer has gone since the press.
    pub fn pointer_released(&mut self, deck: &mut Deck, router: &EventRouter) -> Option<DeckEvent> {
        let index = self.pressed.take().or(self.hovered)?;
        let element = deck.get_mut(index)?;
        let value = element.pointer_up()?;
        let name = element.name.clone();
        Some(router.route(&name, value))
    }

    /// Forgets all pointer state (on surface teardown).
    pub fn reset(&mut self) {
        self.hovered = None;
        self.pressed = None;
        self.cursor = CursorHint::Default;
    }
}
