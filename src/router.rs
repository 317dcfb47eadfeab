//! Event routing from completed gestures to the companion backend.
//!
//! The router owns an explicit device context (the deck name) and a
//! pluggable transport. Delivery is fire-and-forget: transport errors are
//! caught here and reported, never thrown back through a pointer-event
//! handler.

use std::net::UdpSocket;
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CHANNEL;

/// Sub-position of a gesture within its control's region.
///
/// Controls do not yet report sub-positions; the coordinates are always
/// `{0,0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal sub-position.
    pub x: u16,
    /// Vertical sub-position.
    pub y: u16,
}

impl Coordinates {
    /// The fixed origin coordinates.
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

/// Wire schema of one completed gesture phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEvent {
    /// Name of the control that produced the gesture.
    pub device: String,
    /// Logical input slot on the control; currently always 1.
    pub channel: u8,
    /// Gesture value: 1 press, 0 release, 2 clockwise, 3 counter-clockwise.
    pub value: u8,
    /// Sub-position within the control's region; currently always `{0,0}`.
    pub coordinates: Coordinates,
}

/// An event together with the deck it came from, as handed to transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedEvent {
    /// Deck (device context) the gesture happened on.
    pub deck: String,
    /// The gesture event itself.
    #[serde(flatten)]
    pub event: DeckEvent,
}

/// Transport carrying routed events to the companion backend.
///
/// Implementations must not block the pointer-event path for long; errors
/// are reported by the router, not the caller.
pub trait Transport: Send {
    /// Delivers one event. Fire-and-forget; no acknowledgement is awaited.
    fn send(&self, event: &RoutedEvent) -> Result<()>;

    /// Short transport name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Transport that reports events through `tracing`.
///
/// The default when no backend is configured; useful when developing a
/// descriptor without a companion process.
#[derive(Debug, Default)]
pub struct LogTransport;

impl Transport for LogTransport {
    fn send(&self, event: &RoutedEvent) -> Result<()> {
        tracing::info!(
            deck = %event.deck,
            device = %event.event.device,
            channel = event.event.channel,
            value = event.event.value,
            "deck event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Fire-and-forget JSON datagrams to a UDP backend.
///
/// One datagram per gesture phase, no acknowledgement awaited.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds an ephemeral local socket and connects it to `target`.
    pub fn connect(target: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").context("Failed to bind UDP socket")?;
        socket
            .connect(target)
            .with_context(|| format!("Failed to connect UDP transport to {target}"))?;
        Ok(Self { socket })
    }
}

impl Transport for UdpTransport {
    fn send(&self, event: &RoutedEvent) -> Result<()> {
        let payload = serde_json::to_vec(event).context("Failed to encode event")?;
        self.socket
            .send(&payload)
            .context("Failed to send event datagram")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "udp"
    }
}

/// Transport into an in-process channel.
///
/// Used by the relay API (events are drained over HTTP) and by tests.
#[derive(Debug)]
pub struct ChannelTransport {
    sender: Sender<RoutedEvent>,
}

impl ChannelTransport {
    /// Wraps a channel sender.
    #[must_use]
    pub fn new(sender: Sender<RoutedEvent>) -> Self {
        Self { sender }
    }
}

impl Transport for ChannelTransport {
    fn send(&self, event: &RoutedEvent) -> Result<()> {
        self.sender
            .send(event.clone())
            .context("Event channel closed")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}

/// Routes completed gestures to the active transport.
pub struct EventRouter {
    deck: String,
    transport: Box<dyn Transport>,
}

impl EventRouter {
    /// Creates a router for one deck.
    ///
    /// The deck name is the explicit device context; nothing global is
    /// consulted at emission time.
    #[must_use]
    pub fn new(deck: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            deck: deck.into(),
            transport,
        }
    }

    /// Deck this router emits for.
    #[must_use]
    pub fn deck(&self) -> &str {
        &self.deck
    }

    /// Converts a completed gesture phase into the wire schema and hands
    /// it to the transport.
    ///
    /// Always returns the event that was (at least attempted to be)
    /// delivered; a transport failure is reported here and never
    /// propagates into the pointer-event handler.
    pub fn route(&self, device: &str, value: u8) -> DeckEvent {
        let routed = RoutedEvent {
            deck: self.deck.clone(),
            event: DeckEvent {
                device: device.to_string(),
                channel: DEFAULT_CHANNEL,
                value,
                coordinates: Coordinates::ZERO,
            },
        };
        if let Err(e) = self.transport.send(&routed) {
            tracing::warn!(
                transport = self.transport.name(),
                device = %device,
                "failed to deliver deck event: {e:#}"
            );
        }
        routed.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    /// Transport that always fails; the router must swallow the error.
    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn send(&self, _event: &RoutedEvent) -> Result<()> {
            anyhow::bail!("transport down")
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_route_builds_wire_schema() {
        let (sender, receiver) = channel();
        let router = EventRouter::new("virtual-live", Box::new(ChannelTransport::new(sender)));

        let event = router.route("k4", 1);
        assert_eq!(event.device, "k4");
        assert_eq!(event.channel, 1);
        assert_eq!(event.value, 1);
        assert_eq!(event.coordinates, Coordinates::ZERO);

        let routed = receiver.try_recv().unwrap();
        assert_eq!(routed.deck, "virtual-live");
        assert_eq!(routed.event, event);
    }

    #[test]
    fn test_transport_failure_never_propagates() {
        let router = EventRouter::new("virtual-live", Box::new(BrokenTransport));
        // Must not panic or return an error surface.
        let event = router.route("e0", 2);
        assert_eq!(event.value, 2);
    }

    #[test]
    fn test_routed_event_serializes_flat() {
        let routed = RoutedEvent {
            deck: "d".to_string(),
            event: DeckEvent {
                device: "k0".to_string(),
                channel: 1,
                value: 0,
                coordinates: Coordinates::ZERO,
            },
        };
        let json: serde_json::Value = serde_json::to_value(&routed).unwrap();
        assert_eq!(json["deck"], "d");
        assert_eq!(json["device"], "k0");
        assert_eq!(json["coordinates"]["x"], 0);
    }

    #[test]
    fn test_udp_transport_fire_and_forget() {
        let receiver = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let target = receiver.local_addr().unwrap().to_string();

        let transport = UdpTransport::connect(&target).unwrap();
        let routed = RoutedEvent {
            deck: "d".to_string(),
            event: DeckEvent {
                device: "k1".to_string(),
                channel: 1,
                value: 1,
                coordinates: Coordinates::ZERO,
            },
        };
        transport.send(&routed).unwrap();

        let mut buf = [0u8; 512];
        receiver
            .set_read_timeout(Some(std::time::Duration::from_secs(5)))
            .unwrap();
        let n = receiver.recv(&mut buf).unwrap();
        let decoded: RoutedEvent = serde_json::from_slice(&buf[..n]).unwrap();
        assert_eq!(decoded, routed);
    }
}
