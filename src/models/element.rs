//! Interactive element: geometry, interaction state and gesture behavior.
//!
//! One `Element` type carries the shared fields for every control kind; the
//! kind-specific gesture behavior lives in exhaustive `match` arms rather
//! than a type hierarchy, so no kind can reach the builder without a
//! compile-time variant.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::{
    KEY_FLASH, TOUCHSCREEN_FLASH, VALUE_CLOCKWISE, VALUE_COUNTER_CLOCKWISE, VALUE_PRESS,
    VALUE_RELEASE,
};

/// Kind of an interactive element. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Square image key on the main grid.
    Key,
    /// Circular push button without an image.
    RoundKey,
    /// Rotary encoder simulated by left/right half clicks.
    Encoder,
    /// Touch-sensitive screen strip.
    Touchscreen,
    /// Linear slider; geometry/export only, no gestures.
    Slider,
    /// Placement-only placeholder for future overlay content.
    Label,
}

impl ElementKind {
    /// Whether this kind takes part in pointer interaction.
    ///
    /// Sliders and labels never attach gesture handlers.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(
            self,
            ElementKind::Key | ElementKind::RoundKey | ElementKind::Encoder | ElementKind::Touchscreen
        )
    }

    /// Whether this kind appears in the exported geometry record.
    #[must_use]
    pub const fn is_exportable(self) -> bool {
        !matches!(self, ElementKind::Label)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Key => "key",
            ElementKind::RoundKey => "round-key",
            ElementKind::Encoder => "encoder",
            ElementKind::Touchscreen => "touchscreen",
            ElementKind::Slider => "slider",
            ElementKind::Label => "label",
        };
        write!(f, "{name}")
    }
}

/// Element geometry on the deck surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned rectangle anchored at its top-left corner.
    Rect {
        /// Left edge.
        x: u32,
        /// Top edge.
        y: u32,
        /// Width.
        w: u32,
        /// Height.
        h: u32,
        /// Corner radius of the drawn outline.
        corner_radius: u32,
    },
    /// Circle anchored at its center.
    Circle {
        /// Center x.
        cx: u32,
        /// Center y.
        cy: u32,
        /// Radius.
        radius: u32,
    },
}

impl Shape {
    /// Returns true if the pixel position lies inside the shape.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        match *self {
            Shape::Rect { x, y, w, h, .. } => {
                px >= x as f32 && px < (x + w) as f32 && py >= y as f32 && py < (y + h) as f32
            }
            Shape::Circle { cx, cy, radius } => {
                let dx = px - cx as f32;
                let dy = py - cy as f32;
                dx * dx + dy * dy <= (radius * radius) as f32
            }
        }
    }

    /// Bounding box as `(x, y, w, h)`.
    #[must_use]
    pub const fn bounds(&self) -> (u32, u32, u32, u32) {
        match *self {
            Shape::Rect { x, y, w, h, .. } => (x, y, w, h),
            Shape::Circle { cx, cy, radius } => (
                cx.saturating_sub(radius),
                cy.saturating_sub(radius),
                2 * radius,
                2 * radius,
            ),
        }
    }

    /// Horizontal center of the shape.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        match *self {
            Shape::Rect { x, w, .. } => x as f32 + w as f32 / 2.0,
            Shape::Circle { cx, .. } => cx as f32,
        }
    }
}

/// Pointer interaction state of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionState {
    /// No pointer over the element.
    #[default]
    Idle,
    /// Pointer over the element, button up.
    Hovered,
    /// Pointer button held down on the element.
    Pressed,
}

/// Cursor affordance requested by the hovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// Default arrow cursor.
    #[default]
    Default,
    /// Pointer/hand cursor over an interactive region.
    Pointer,
    /// Clockwise spin hint over an encoder's right half.
    SpinClockwise,
    /// Counter-clockwise spin hint over an encoder's left half.
    SpinCounterClockwise,
}

/// Turn direction of a simulated encoder click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderDirection {
    /// Right half of the encoder.
    Clockwise,
    /// Left half of the encoder.
    CounterClockwise,
}

impl EncoderDirection {
    /// Event value for this direction.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            EncoderDirection::Clockwise => VALUE_CLOCKWISE,
            EncoderDirection::CounterClockwise => VALUE_COUNTER_CLOCKWISE,
        }
    }
}

/// One interactive region of the deck surface.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name, used as the `device` field of routed events.
    pub name: String,
    /// Family-relative index.
    pub index: u32,
    kind: ElementKind,
    /// Geometry on the deck surface.
    pub shape: Shape,
    /// Current pointer interaction state.
    pub state: InteractionState,
    highlight_until: Option<Instant>,
}

impl Element {
    /// Creates an idle element.
    #[must_use]
    pub fn new(name: impl Into<String>, index: u32, kind: ElementKind, shape: Shape) -> Self {
        Self {
            name: name.into(),
            index,
            kind,
            shape,
            state: InteractionState::Idle,
            highlight_until: None,
        }
    }

    /// Kind of this element. Fixed at construction.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Handles the pointer entering the element's region.
    ///
    /// Idle or Pressed both become Hovered; the surface shows a pointer
    /// cursor while an interactive element is hovered.
    pub fn pointer_enter(&mut self) -> CursorHint {
        self.state = InteractionState::Hovered;
        CursorHint::Pointer
    }

    /// Handles the pointer leaving the element's region.
    pub fn pointer_leave(&mut self) -> CursorHint {
        self.state = InteractionState::Idle;
        CursorHint::Default
    }

    /// Handles pointer movement inside the element's region.
    ///
    /// Only encoders refine the cursor while hovered: the hint tracks which
    /// half of the control the pointer is over. Other kinds keep the plain
    /// pointer cursor.
    pub fn pointer_move(&mut self, px: f32) -> Option<CursorHint> {
        match self.kind {
            ElementKind::Encoder => {
                if self.state == InteractionState::Hovered {
                    Some(match self.hover_direction(px) {
                        EncoderDirection::Clockwise => CursorHint::SpinClockwise,
                        EncoderDirection::CounterClockwise => CursorHint::SpinCounterClockwise,
                    })
                } else {
                    None
                }
            }
            ElementKind::Key
            | ElementKind::RoundKey
            | ElementKind::Touchscreen
            | ElementKind::Slider
            | ElementKind::Label => None,
        }
    }

    /// Handles a pointer press on the element.
    ///
    /// Returns the event value to route, if this kind emits one. Keys and
    /// touchscreens also arm the highlight-revert deadline; re-pressing
    /// before it fires replaces the deadline, so at most one revert is ever
    /// pending per element.
    pub fn pointer_down(&mut self, px: f32, now: Instant) -> Option<u8> {
        self.state = InteractionState::Pressed;
        match self.kind {
            ElementKind::Key => {
                self.arm_highlight(now, KEY_FLASH);
                Some(VALUE_PRESS)
            }
            ElementKind::Touchscreen => {
                self.arm_highlight(now, TOUCHSCREEN_FLASH);
                Some(VALUE_PRESS)
            }
            ElementKind::RoundKey => Some(VALUE_PRESS),
            ElementKind::Encoder => Some(self.press_direction(px).value()),
            // Never attached; a stray press is a no-op.
            ElementKind::Slider | ElementKind::Label => None,
        }
    }

    /// Handles a pointer release on the element.
    ///
    /// A release always resolves the state machine back to Hovered,
    /// regardless of what happened between down and up.
    pub fn pointer_up(&mut self) -> Option<u8> {
        self.state = InteractionState::Hovered;
        match self.kind {
            ElementKind::Key
            | ElementKind::RoundKey
            | ElementKind::Encoder
            | ElementKind::Touchscreen => Some(VALUE_RELEASE),
            ElementKind::Slider | ElementKind::Label => None,
        }
    }

    /// Direction hint while the pointer hovers an encoder.
    ///
    /// Same sign test as [`Self::press_direction`], but evaluated
    /// continuously on movement. The two call sites are deliberately
    /// separate: the hover hint and the click decision are distinct paths
    /// in the simulated protocol.
    #[must_use]
    pub fn hover_direction(&self, px: f32) -> EncoderDirection {
        if px < self.shape.center_x() {
            EncoderDirection::CounterClockwise
        } else {
            EncoderDirection::Clockwise
        }
    }

    /// Direction decided once at press time.
    ///
    /// Pure function of pointer x relative to the element's center x;
    /// exactly two outcomes, independent of velocity or drag distance.
    #[must_use]
    pub fn press_direction(&self, px: f32) -> EncoderDirection {
        if px < self.shape.center_x() {
            EncoderDirection::CounterClockwise
        } else {
            EncoderDirection::Clockwise
        }
    }

    /// Arms (or re-arms) the highlight-revert deadline.
    fn arm_highlight(&mut self, now: Instant, duration: Duration) {
        self.highlight_until = Some(now + duration);
    }

    /// Whether the press highlight is still showing.
    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.highlight_until.is_some()
    }

    /// Clears the highlight if its deadline has passed.
    ///
    /// Returns true when the element's appearance changed.
    pub fn expire_highlight(&mut self, now: Instant) -> bool {
        match self.highlight_until {
            Some(deadline) if deadline <= now => {
                self.highlight_until = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels a pending highlight revert.
    ///
    /// Called on teardown so no revert can fire against a detached
    /// element.
    pub fn cancel_highlight(&mut self) {
        self.highlight_until = None;
    }
}
