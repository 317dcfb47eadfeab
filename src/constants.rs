//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the deck timing/layout parameters.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Deckbench";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "deckbench";

/// Duration a pressed key stays highlighted before its border reverts.
pub const KEY_FLASH: Duration = Duration::from_millis(200);

/// Duration a pressed touchscreen region stays highlighted before reverting.
///
/// Touchscreens flash longer than keys so a tap on a large region stays
/// visible while the backend repaints it.
pub const TOUCHSCREEN_FLASH: Duration = Duration::from_millis(600);

/// Vertical allowance added to the background image height when computing
/// the host window height.
pub const TITLE_BAR_ALLOWANCE: u32 = 24;

/// The fixed logical input slot used when routing an event for a control.
///
/// Each control currently exposes a single logical input; multi-input
/// controls would use further channels. Documented limitation of the
/// simulated protocol.
pub const DEFAULT_CHANNEL: u8 = 1;

/// Event value emitted when a key or touchscreen is pressed.
pub const VALUE_PRESS: u8 = 1;

/// Event value emitted when any control is released.
pub const VALUE_RELEASE: u8 = 0;

/// Event value emitted for a clockwise encoder click.
pub const VALUE_CLOCKWISE: u8 = 2;

/// Event value emitted for a counter-clockwise encoder click.
pub const VALUE_COUNTER_CLOCKWISE: u8 = 3;
