//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::warehouse::AgvStatus;

// ============================================================================
// Grid Colors
// ============================================================================

/// Semi-transparent grey grid lines
pub const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

// ============================================================================
// Selection Colors
// ============================================================================

/// Light blue for selection rectangles and indicators
pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

// ============================================================================
// Object Colors
// ============================================================================

/// Steel blue shelving racks
pub const SHELF_COLOR: Color = Color::srgb(0.35, 0.5, 0.7);

/// Wooden pallet areas
pub const PALLET_COLOR: Color = Color::srgb(0.72, 0.55, 0.3);

/// Manual shipping areas (pale green floor marking)
pub const SHIPPING_COLOR: Color = Color::srgba(0.3, 0.75, 0.45, 0.8);

/// Fixed equipment (dark grey)
pub const EQUIPMENT_COLOR: Color = Color::srgb(0.45, 0.45, 0.5);

/// Restricted zones (translucent red hatching stand-in)
pub const RESTRICTED_COLOR: Color = Color::srgba(0.85, 0.2, 0.2, 0.45);

/// AGV body (amber)
pub const AGV_COLOR: Color = Color::srgb(0.95, 0.65, 0.15);

/// AGV charge/dispatch stations (teal)
pub const AGV_STATION_COLOR: Color = Color::srgb(0.1, 0.6, 0.65);

/// Cargo box carried by an AGV
pub const CARGO_COLOR: Color = Color::srgb(0.6, 0.4, 0.2);

/// Default travel-path stroke (cyan, matching the station accent)
pub const PATH_DEFAULT_COLOR: Color = Color::srgb(0.02, 0.71, 0.83);

/// In-progress path drag preview (faded version of the default stroke)
pub const PATH_PREVIEW_COLOR: Color = Color::srgba(0.02, 0.71, 0.83, 0.5);

/// Tint applied to an AGV sprite for each status
pub fn agv_status_color(status: AgvStatus) -> Color {
    match status {
        AgvStatus::Idle => AGV_COLOR,
        AgvStatus::Working => Color::srgb(0.3, 0.8, 0.35),
        AgvStatus::Charging => Color::srgb(0.3, 0.55, 0.95),
        AgvStatus::Error => Color::srgb(0.9, 0.2, 0.2),
    }
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Green "running" transport indicator
    pub const SIM_RUNNING: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

    /// Amber "paused" transport indicator
    pub const SIM_PAUSED: egui::Color32 = egui::Color32::from_rgb(230, 180, 80);

    /// Dark grey panel background (tool settings bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}
