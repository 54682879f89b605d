//! Configuration and settings module.
//!
//! Display colors and a few session conveniences are persisted as JSON in
//! the user's config directory. Loading is best-effort: anything missing or
//! malformed falls back to the defaults.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::AppError;
use super::event::TrackCategory;

/// Settings filename for persistence.
const SETTINGS_FILENAME: &str = "config.json";

/// Subdirectory of the user config directory.
const CONFIG_DIR_NAME: &str = "sct-viewer";

/// Color settings for the event display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    // Geometry colors
    /// VELO track rays (default: blue)
    pub velo: [u8; 3],
    /// Long track rays (default: red)
    pub long: [u8; 3],
    /// Generator track rays (default: green)
    pub generator: [u8; 3],
    /// Primary vertex markers
    pub vertex: [u8; 3],
    /// Alpha applied to track rays so dense events stay readable
    pub track_alpha: u8,

    // Pane colors
    /// Pane background color
    pub background: [u8; 3],
    /// Pane frame and tick color
    pub grid: [u8; 3],

    // Text colors
    /// Axis label text color
    pub text_label: [u8; 3],
    /// Tick value text color
    pub text_dim: [u8; 3],

    // Status colors
    /// Success status color
    pub status_success: [u8; 3],
    /// Error status color
    pub status_error: [u8; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            // Category colors follow the classic event-display scheme
            velo: [33, 150, 243],     // Blue
            long: [244, 67, 54],      // Red
            generator: [76, 175, 80], // Green
            vertex: [244, 67, 54],    // Red markers
            track_alpha: 60,

            background: [20, 20, 24], // Near black
            grid: [70, 70, 78],       // Medium gray

            text_label: [211, 211, 211], // Light gray
            text_dim: [128, 128, 128],   // Gray

            status_success: [76, 175, 80], // Green
            status_error: [244, 67, 54],   // Red
        }
    }
}

impl ColorSettings {
    /// Convert a color array to egui Color32.
    #[inline]
    pub fn to_color32(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }

    /// Convert a color array to egui Color32 with alpha.
    #[inline]
    pub fn to_color32_alpha(color: [u8; 3], alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha)
    }

    /// Translucent ray color for a track category.
    pub fn category_color(&self, category: TrackCategory) -> Color32 {
        let rgb = match category {
            TrackCategory::Velo => self.velo,
            TrackCategory::Long => self.long,
            TrackCategory::Generator => self.generator,
        };
        Self::to_color32_alpha(rgb, self.track_alpha)
    }

    /// Opaque legend color for a track category.
    pub fn category_legend_color(&self, category: TrackCategory) -> Color32 {
        let rgb = match category {
            TrackCategory::Velo => self.velo,
            TrackCategory::Long => self.long,
            TrackCategory::Generator => self.generator,
        };
        Self::to_color32(rgb)
    }

    /// Get vertex marker color as Color32.
    pub fn vertex_color(&self) -> Color32 {
        Self::to_color32(self.vertex)
    }

    /// Get pane background color as Color32.
    pub fn background_color(&self) -> Color32 {
        Self::to_color32(self.background)
    }

    /// Get frame and tick color as Color32.
    pub fn grid_color(&self) -> Color32 {
        Self::to_color32(self.grid)
    }

    /// Get axis label color as Color32.
    pub fn text_label_color(&self) -> Color32 {
        Self::to_color32(self.text_label)
    }

    /// Get tick value color as Color32.
    pub fn text_dim_color(&self) -> Color32 {
        Self::to_color32(self.text_dim)
    }

    /// Get success status color as Color32.
    pub fn status_success_color(&self) -> Color32 {
        Self::to_color32(self.status_success)
    }

    /// Get error status color as Color32.
    pub fn status_error_color(&self) -> Color32 {
        Self::to_color32(self.status_error)
    }
}

/// Application settings persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Color customization settings.
    pub colors: ColorSettings,

    /// Directory the file dialog starts in.
    #[serde(default)]
    pub last_open_dir: Option<PathBuf>,

    /// Window size to restore on startup (width, height).
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            colors: ColorSettings::default(),
            last_open_dir: None,
            window_size: None,
        }
    }
}

impl AppSettings {
    /// Get the settings file path in the user's config directory.
    fn get_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(CONFIG_DIR_NAME);
            path.push(SETTINGS_FILENAME);
            path
        })
    }

    /// Load settings from disk, returning defaults if loading fails.
    pub fn load() -> Self {
        Self::get_settings_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::get_settings_path().ok_or_else(|| AppError::SettingsSave {
            reason: "Could not determine config directory".to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::SettingsSave {
                reason: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| AppError::SettingsSave {
            reason: format!("Failed to serialize settings: {}", e),
        })?;

        std::fs::write(&path, content).map_err(|e| AppError::SettingsSave {
            reason: format!("Failed to write settings file: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_colors_are_distinct() {
        let colors = ColorSettings::default();
        assert_ne!(colors.velo, colors.long);
        assert_ne!(colors.long, colors.generator);
        assert_ne!(colors.velo, colors.generator);
    }

    #[test]
    fn test_category_color_applies_alpha() {
        let colors = ColorSettings::default();
        for category in TrackCategory::ALL {
            let c = colors.category_color(category);
            assert_eq!(c.a(), colors.track_alpha);
            assert_eq!(colors.category_legend_color(category).a(), 255);
        }
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let mut settings = AppSettings::default();
        settings.last_open_dir = Some(PathBuf::from("/data/sct"));
        settings.window_size = Some((800.0, 600.0));

        let json = serde_json::to_string(&settings).unwrap();
        let restored: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.colors, settings.colors);
        assert_eq!(restored.last_open_dir, settings.last_open_dir);
        assert_eq!(restored.window_size, settings.window_size);
    }

    #[test]
    fn test_settings_load_tolerates_missing_fields() {
        // Only colors present; the optional fields default
        let json = serde_json::to_string(&serde_json::json!({
            "colors": ColorSettings::default(),
        }))
        .unwrap();
        let settings: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings.last_open_dir, None);
        assert_eq!(settings.window_size, None);
    }
}
