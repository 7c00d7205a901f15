//! Shared color constants for the UI.

use egui::Color32;

/// Red color for error/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Subtle gray for table borders.
pub const COLOR_BORDER: Color32 = Color32::from_rgb(200, 200, 200);
