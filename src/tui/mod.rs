//! Terminal user interface: the interactive deck surface.
//!
//! This module contains the main TUI loop, `AppState`, pointer event
//! handling and the surface widgets. All element construction, geometry
//! computation and pointer handling run on this one thread; the only
//! asynchronous boundary is the background-image load, polled each frame.

pub mod deck_widget;
pub mod status_bar;
pub mod theme;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::models::{BackgroundState, Deck};
use crate::router::{DeckEvent, EventRouter};
use crate::services::{BackgroundLoad, BackgroundMessage, KeyImageStore, PointerSession};

pub use deck_widget::DeckWidget;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Live state of the simulator.
pub struct AppState {
    /// The deck under simulation.
    pub deck: Deck,
    /// Router delivering completed gestures to the transport.
    pub router: EventRouter,
    /// Pointer session over the attached surface.
    pub session: PointerSession,
    /// Painted per-key images.
    pub key_images: KeyImageStore,
    /// In-flight (or settled) background image load.
    pub background: BackgroundLoad,
    /// Active color theme.
    pub theme: Theme,
    /// Most recently routed event, shown in the status bar.
    pub last_event: Option<DeckEvent>,
    /// Transient status/report line.
    pub status_message: Option<String>,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl AppState {
    /// Creates the simulator state and attaches interactions to the
    /// surface.
    #[must_use]
    pub fn new(
        mut deck: Deck,
        router: EventRouter,
        background: BackgroundLoad,
        config: &Config,
    ) -> Self {
        deck.attach_interactions();
        Self {
            deck,
            router,
            session: PointerSession::new(),
            key_images: KeyImageStore::new(),
            background,
            theme: Theme::from_mode(config.ui.theme_mode),
            last_event: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Polls the background load and applies its outcome to the deck.
    pub fn poll_background(&mut self) {
        if let Some(message) = self.background.poll() {
            match message {
                BackgroundMessage::Loaded { width, height } => {
                    self.deck.apply_background(width, height);
                    self.status_message = Some(format!(
                        "background {}x{}, window height {}",
                        width,
                        height,
                        self.deck.window_height()
                    ));
                }
                BackgroundMessage::Failed { error } => {
                    // Degrade to the geometry-derived surface; the deck
                    // itself is untouched.
                    self.deck.mark_background_errored();
                    tracing::warn!("background load failed: {error}");
                    self.status_message = Some(format!("background failed: {error}"));
                }
            }
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Resolve the asynchronous boundaries first: background outcome
        // and expired press highlights.
        state.poll_background();
        state.deck.expire_highlights(Instant::now());

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, &key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let chunks = layout_chunks(Rect::new(0, 0, size.width, size.height));
                    handle_mouse_event(state, &mouse, surface_inner(chunks[1]));
                }
                Event::Resize(_, _) => {
                    // Terminal resized, will re-render on next loop
                }
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    // Teardown: nothing transient survives the surface, so no revert can
    // fire against a detached element.
    state.deck.detach_interactions();
    state.session.reset();

    Ok(())
}

/// Vertical screen split: title bar, surface, status bar.
fn layout_chunks(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .areas(area)
}

/// Interior of the surface widget (inside its border).
fn surface_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Handles one key event; returns true when the user quit.
fn handle_key_event(state: &mut AppState, key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            true
        }
        _ => false,
    }
}

/// Handles one pointer event against the surface area.
fn handle_mouse_event(state: &mut AppState, mouse: &MouseEvent, inner: Rect) {
    let surface = state.deck.surface();
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            match deck_widget::pixel_at(inner, surface, mouse.column, mouse.row) {
                Some((px, py)) => {
                    state.session.pointer_moved(&mut state.deck, px, py);
                }
                None => {
                    // Off the surface counts as leaving every element.
                    state.session.pointer_moved(&mut state.deck, -1.0, -1.0);
                }
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((px, py)) = deck_widget::pixel_at(inner, surface, mouse.column, mouse.row)
            {
                if let Some(event) = state.session.pointer_pressed(
                    &mut state.deck,
                    &state.router,
                    px,
                    py,
                    Instant::now(),
                ) {
                    state.last_event = Some(event);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(event) = state.session.pointer_released(&mut state.deck, &state.router) {
                state.last_event = Some(event);
            }
        }
        _ => {}
    }
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = layout_chunks(f.area());

    render_title_bar(f, chunks[0], state);
    DeckWidget::render(f, chunks[1], &state.deck, &state.key_images, &state.theme);
    StatusBar::render(f, chunks[2], state, &state.theme);
}

/// Render title bar with deck name and surface dimensions
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let surface = state.deck.surface();
    let background = match state.deck.background() {
        BackgroundState::Loading => "loading background...",
        BackgroundState::Loaded => "background loaded",
        BackgroundState::Errored => "geometry-only layout",
    };
    let title = format!(
        " {} - {}x{} px - {}",
        state.deck.name, surface.width, surface.height, background
    );

    let widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BackgroundSpec, DeckDescriptor, ElementKind, FamilySpec};
    use crate::router::LogTransport;
    use crate::services::build_deck;
    use crossterm::event::KeyModifiers;

    fn test_state() -> AppState {
        let descriptor = DeckDescriptor {
            name: "test".to_string(),
            background: BackgroundSpec {
                image: "background.png".to_string(),
                color: None,
                spacing: [4, 4],
                offset: [10, 10],
            },
            families: vec![FamilySpec {
                kind: ElementKind::Key,
                name: "k".to_string(),
                cell: [72, 72],
                grid: [3, 2],
                spacing: None,
                offset: None,
                corner_radius: 8,
            }],
        };
        let deck = build_deck(&descriptor).unwrap();
        let router = EventRouter::new("test", Box::new(LogTransport));
        AppState::new(
            deck,
            router,
            BackgroundLoad::failed("no assets in tests"),
            &Config::default(),
        )
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut state = test_state();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(handle_key_event(&mut state, &quit));
        assert!(state.should_quit);

        let mut state = test_state();
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!handle_key_event(&mut state, &other));
    }

    #[test]
    fn test_background_failure_degrades_not_fails() {
        let mut state = test_state();
        // Poll until the immediate failure lands.
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.deck.background() != BackgroundState::Errored {
            state.poll_background();
            assert!(Instant::now() < deadline);
        }
        // Element collection unaffected: 3x2 keys.
        assert_eq!(state.deck.len(), 6);
        assert_eq!(state.deck.surface().width, 244);
    }

    #[test]
    fn test_mouse_press_release_routes_events() {
        let mut state = test_state();
        // Inner area spanning the full surface at 1:1-ish scale.
        let inner = Rect::new(1, 1, 244, 168);

        handle_mouse_event(&mut state, &mouse(MouseEventKind::Moved, 20, 20), inner);
        handle_mouse_event(
            &mut state,
            &mouse(MouseEventKind::Down(MouseButton::Left), 20, 20),
            inner,
        );
        assert_eq!(state.last_event.as_ref().unwrap().value, 1);

        handle_mouse_event(
            &mut state,
            &mouse(MouseEventKind::Up(MouseButton::Left), 20, 20),
            inner,
        );
        assert_eq!(state.last_event.as_ref().unwrap().value, 0);
        assert_eq!(state.last_event.as_ref().unwrap().device, "k0");
    }

    #[test]
    fn test_layout_chunks_cover_screen() {
        let [title, surface, status] = layout_chunks(Rect::new(0, 0, 120, 40));
        assert_eq!(title.height, 3);
        assert_eq!(status.height, 5);
        assert_eq!(surface.height, 40 - 3 - 5);
    }
}
