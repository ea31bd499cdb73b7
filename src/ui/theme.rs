//! Color theme constants for the dashboard.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Borders and separators
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Selected tab and table headers
pub const COLOR_ACCENT: Color = Color::White;

/// Secondary text (footer, hints)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Last-updated timestamp once data has arrived
pub const COLOR_FRESH: Color = Color::LightGreen;

// ============================================================================
// Fleet Colors
// ============================================================================

/// Truck out on a route
pub const COLOR_BUSY: Color = Color::Yellow;

/// Truck waiting at the depot
pub const COLOR_IDLE: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Dumpster over its overflow level
pub const COLOR_ALERT: Color = Color::LightRed;

// ============================================================================
// Map Glyphs
// ============================================================================

pub const COLOR_MAP_TRUCK: Color = Color::Cyan;
pub const COLOR_MAP_DUMPSTER: Color = Color::Yellow;
pub const COLOR_MAP_WALL: Color = Color::DarkGray;
pub const COLOR_MAP_PATH: Color = Color::Rgb(0, 122, 204); // blue #007ACC
pub const COLOR_MAP_ROAD: Color = Color::Gray;
