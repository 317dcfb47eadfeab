//! Deck surface widget.
//!
//! Renders the deck's pixel-space surface scaled onto the terminal grid and
//! maps terminal cells back to surface pixels for pointer handling. The
//! scaling is independent per axis; hit testing happens in pixel space, so
//! the stretched aspect never changes which element a cell belongs to.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{BackgroundState, Deck, ElementKind, InteractionState, SurfaceSize};
use crate::services::KeyImageStore;
use crate::tui::theme::Theme;

/// Deck surface widget.
pub struct DeckWidget;

impl DeckWidget {
    /// Renders the deck surface into `area`.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        deck: &Deck,
        key_images: &KeyImageStore,
        theme: &Theme,
    ) {
        let border_style = match deck.background() {
            // Failed background: distinct error border, layout unchanged.
            BackgroundState::Errored => Style::default().fg(theme.error),
            BackgroundState::Loading | BackgroundState::Loaded => {
                Style::default().fg(theme.primary)
            }
        };

        let background = deck
            .background_color()
            .map_or(theme.background, |(r, g, b)| Color::Rgb(r, g, b));

        let title = match deck.background() {
            BackgroundState::Errored => format!(" {} (background failed) ", deck.name),
            BackgroundState::Loading | BackgroundState::Loaded => format!(" {} ", deck.name),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for (index, element) in deck.elements().iter().enumerate() {
            let Some(cell) = element_rect(inner, deck.surface(), element.shape.bounds()) else {
                continue;
            };

            let style = element_style(deck, index, key_images, theme);
            if cell.width >= 3 && cell.height >= 3 {
                let border_type = match element.kind() {
                    ElementKind::RoundKey | ElementKind::Encoder => BorderType::Rounded,
                    _ => BorderType::Plain,
                };
                let element_block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(style);
                let element_inner = element_block.inner(cell);
                f.render_widget(element_block, cell);
                let label = Paragraph::new(element.name.as_str()).style(style);
                f.render_widget(label, element_inner);
            } else {
                // Too small for a border; a styled name stub marks the spot.
                let label = Paragraph::new(element.name.as_str()).style(style);
                f.render_widget(label, cell);
            }
        }
    }
}

/// Style of one element, driven by interaction state and painted image.
fn element_style(deck: &Deck, index: usize, key_images: &KeyImageStore, theme: &Theme) -> Style {
    let element = &deck.elements()[index];
    if element.is_highlighted() || element.state == InteractionState::Pressed {
        return Style::default().fg(theme.active);
    }
    if element.state == InteractionState::Hovered {
        return Style::default().fg(theme.accent);
    }
    // Idle elements show their painted key image as a tint when one
    // exists. Images are addressed by collection index.
    if element.kind() == ElementKind::Key || element.kind() == ElementKind::Touchscreen {
        if let Some(image) = key_images.get(index as u32) {
            let (r, g, b) = image.average;
            return Style::default().fg(Color::Rgb(r, g, b));
        }
    }
    Style::default().fg(theme.inactive)
}

/// Maps a surface-pixel bounding box to a terminal cell rectangle inside
/// `inner`, or `None` when it would be invisible.
#[must_use]
pub fn element_rect(
    inner: Rect,
    surface: SurfaceSize,
    bounds: (u32, u32, u32, u32),
) -> Option<Rect> {
    if surface.width == 0 || surface.height == 0 {
        return None;
    }
    let (x, y, w, h) = bounds;
    let sx = f32::from(inner.width) / surface.width as f32;
    let sy = f32::from(inner.height) / surface.height as f32;

    let cx = inner.x + (x as f32 * sx) as u16;
    let cy = inner.y + (y as f32 * sy) as u16;
    let cw = ((w as f32 * sx) as u16).max(1);
    let ch = ((h as f32 * sy) as u16).max(1);

    if cx >= inner.right() || cy >= inner.bottom() {
        return None;
    }
    let cw = cw.min(inner.right() - cx);
    let ch = ch.min(inner.bottom() - cy);
    Some(Rect::new(cx, cy, cw, ch))
}

/// Maps a terminal cell back to the surface pixel under its center.
///
/// Returns `None` for cells outside the surface area.
#[must_use]
pub fn pixel_at(inner: Rect, surface: SurfaceSize, column: u16, row: u16) -> Option<(f32, f32)> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    let px = (f32::from(column - inner.x) + 0.5) / f32::from(inner.width) * surface.width as f32;
    let py = (f32::from(row - inner.y) + 0.5) / f32::from(inner.height) * surface.height as f32;
    Some((px, py))
}
