//! Status bar at the bottom of the simulator.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::CursorHint;
use crate::tui::{AppState, Theme};

/// Bottom status bar: cursor affordance, last routed event, messages.
pub struct StatusBar;

impl StatusBar {
    /// Renders the status bar.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let cursor = match state.session.cursor() {
            CursorHint::Default => "cursor: default",
            CursorHint::Pointer => "cursor: pointer",
            CursorHint::SpinClockwise => "cursor: spin cw",
            CursorHint::SpinCounterClockwise => "cursor: spin ccw",
        };

        let event_line = state.last_event.as_ref().map_or_else(
            || "no events yet".to_string(),
            |e| {
                format!(
                    "last event: {} ch{} val{} @({},{})",
                    e.device, e.channel, e.value, e.coordinates.x, e.coordinates.y
                )
            },
        );

        let mut lines = vec![
            Line::from(vec![
                Span::styled(cursor, Style::default().fg(theme.text)),
                Span::raw("  |  "),
                Span::styled(event_line, Style::default().fg(theme.accent)),
            ]),
            Line::from(Span::styled(
                "mouse: hover/press controls  |  q: quit",
                Style::default().fg(theme.text_muted),
            )),
        ];

        if let Some(message) = &state.status_message {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(theme.warning),
            )));
        }

        let widget = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(widget, area);
    }
}
