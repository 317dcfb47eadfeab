//! Relay API for Deckbench.
//!
//! This module exposes the simulated deck over HTTP so a companion backend
//! (or a remote front end) can read its geometry, inject pointer gestures,
//! drain the outbound event queue and push per-key images.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/deck` - Exported geometry record
//! - `GET /api/deck/state` - Per-element interaction state
//! - `POST /api/pointer` - Inject a pointer gesture (move/down/up)
//! - `GET /api/events` - Drain routed events
//! - `PUT /api/deck/keys/{index}/image` - Paint one control's image

use std::net::SocketAddr;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::export::{export_deck, GeometryRecord};
use crate::models::{Deck, InteractionState};
use crate::router::{ChannelTransport, DeckEvent, EventRouter, RoutedEvent};
use crate::services::{KeyImageStore, PointerSession};

// ============================================================================
// Application State
// ============================================================================

/// Everything the relay mutates, behind one lock.
///
/// The lock serializes gesture handling exactly like the single UI thread
/// of the terminal surface: handler invocations never overlap.
struct RelayInner {
    deck: Deck,
    router: EventRouter,
    session: PointerSession,
    key_images: KeyImageStore,
    events: Receiver<RoutedEvent>,
}

/// Shared application state for the relay API.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<RelayInner>>,
}

impl AppState {
    /// Creates relay state around a built deck.
    ///
    /// Gestures route into an in-process channel that `GET /api/events`
    /// drains.
    #[must_use]
    pub fn new(mut deck: Deck) -> Self {
        deck.attach_interactions();
        let (sender, events) = channel();
        let router = EventRouter::new(deck.name.clone(), Box::new(ChannelTransport::new(sender)));
        Self {
            inner: Arc::new(Mutex::new(RelayInner {
                deck,
                router,
                session: PointerSession::new(),
                key_images: KeyImageStore::new(),
                events,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RelayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// One element's interaction state.
#[derive(Debug, Serialize)]
pub struct ElementStateInfo {
    /// Element name.
    pub name: String,
    /// Element kind tag.
    pub kind: String,
    /// Current interaction state.
    pub state: InteractionState,
    /// Whether the press highlight is still showing.
    pub highlighted: bool,
}

/// Deck state response.
#[derive(Debug, Serialize)]
pub struct DeckStateResponse {
    /// Deck name.
    pub deck: String,
    /// Surface dimensions `[w, h]`.
    pub surface: [u32; 2],
    /// Background state: "loading", "loaded" or "errored".
    pub background: String,
    /// Per-element state in insertion order.
    pub elements: Vec<ElementStateInfo>,
}

/// Pointer gesture phase.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerAction {
    /// Pointer movement to `(x, y)`.
    Move,
    /// Pointer press at `(x, y)`.
    Down,
    /// Pointer release.
    Up,
}

/// Injected pointer gesture.
#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    /// Gesture phase.
    pub action: PointerAction,
    /// Surface x in pixels (ignored for `up`).
    #[serde(default)]
    pub x: f32,
    /// Surface y in pixels (ignored for `up`).
    #[serde(default)]
    pub y: f32,
}

/// Events emitted directly by an injected gesture.
#[derive(Debug, Serialize)]
pub struct PointerResponse {
    /// Events routed by this gesture phase.
    pub emitted: Vec<DeckEvent>,
}

/// Drained outbound events.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Routed events since the last drain, oldest first.
    pub events: Vec<RoutedEvent>,
}

/// Result of a per-key image upload.
#[derive(Debug, Serialize)]
pub struct KeyImageResponse {
    /// True when the control was repainted; false when the payload matched
    /// the current image and was skipped.
    pub painted: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Exported geometry record of the live deck.
async fn get_deck(State(state): State<AppState>) -> Json<GeometryRecord> {
    let inner = state.lock();
    Json(export_deck(&inner.deck))
}

/// Per-element interaction state.
async fn get_deck_state(State(state): State<AppState>) -> Json<DeckStateResponse> {
    let mut inner = state.lock();
    // Lazy highlight expiry: the relay has no frame loop.
    inner.deck.expire_highlights(Instant::now());

    let elements = inner
        .deck
        .elements()
        .iter()
        .map(|e| ElementStateInfo {
            name: e.name.clone(),
            kind: e.kind().to_string(),
            state: e.state,
            highlighted: e.is_highlighted(),
        })
        .collect();

    Json(DeckStateResponse {
        deck: inner.deck.name.clone(),
        surface: [inner.deck.surface().width, inner.deck.surface().height],
        background: format!("{:?}", inner.deck.background()).to_lowercase(),
        elements,
    })
}

/// Injects one pointer gesture phase.
async fn post_pointer(
    State(state): State<AppState>,
    Json(request): Json<PointerRequest>,
) -> Json<PointerResponse> {
    let mut guard = state.lock();
    let inner = &mut *guard;
    let emitted = match request.action {
        PointerAction::Move => {
            inner
                .session
                .pointer_moved(&mut inner.deck, request.x, request.y);
            None
        }
        PointerAction::Down => inner.session.pointer_pressed(
            &mut inner.deck,
            &inner.router,
            request.x,
            request.y,
            Instant::now(),
        ),
        PointerAction::Up => inner.session.pointer_released(&mut inner.deck, &inner.router),
    };

    Json(PointerResponse {
        emitted: emitted.into_iter().collect(),
    })
}

/// Drains routed events.
async fn drain_events(State(state): State<AppState>) -> Json<EventsResponse> {
    let inner = state.lock();
    let events = inner.events.try_iter().collect();
    Json(EventsResponse { events })
}

/// Paints one control's image from encoded bytes.
///
/// `index` addresses the element collection; a decode failure is local to
/// that control and reported as 422 without touching the deck.
async fn put_key_image(
    State(state): State<AppState>,
    Path(index): Path<u32>,
    body: axum::body::Bytes,
) -> Result<Json<KeyImageResponse>, (StatusCode, String)> {
    let mut guard = state.lock();
    let inner = &mut *guard;

    if inner.deck.get(index as usize).is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("no control at index {index}"),
        ));
    }

    match inner.key_images.apply(index, &body) {
        Ok(painted) => Ok(Json(KeyImageResponse { painted })),
        Err(e) => {
            tracing::warn!("key image rejected for control {index}: {e:#}");
            Err((StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
        }
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development.
    // The relay is designed to run locally next to the backend under test.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/deck", get(get_deck))
        .route("/api/deck/state", get(get_deck_state))
        .route("/api/pointer", post(post_pointer))
        .route("/api/events", get(drain_events))
        .route("/api/deck/keys/{index}/image", put(put_key_image))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the relay server until interrupted.
pub async fn run_server(deck: Deck, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(deck);
    let app = create_router(state);

    info!("Starting Deckbench relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
