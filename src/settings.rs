use serde::{Deserialize, Serialize};

/// Layout related settings of [`crate::RadialGraphView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsLayout {
    /// Radius of the deepest level at scale 1
    pub size: f32,

    /// Label length at scale 1 before it gets truncated
    pub label_chars: f32,

    /// Appended to truncated labels
    pub ellipsis: String,
}

impl Default for SettingsLayout {
    fn default() -> Self {
        Self {
            size: 1000.,
            label_chars: 16.,
            ellipsis: "...".to_string(),
        }
    }
}

impl SettingsLayout {
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_label_chars(mut self, label_chars: f32) -> Self {
        self.label_chars = label_chars;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsStyle {
    /// Radius of the node marker
    pub marker_radius: f32,

    /// Distance between marker center and label
    pub label_offset: f32,

    pub font_size: f32,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            marker_radius: 6.,
            label_offset: 8.,
            font_size: 12.,
        }
    }
}

impl SettingsStyle {
    pub fn with_marker_radius(mut self, marker_radius: f32) -> Self {
        self.marker_radius = marker_radius;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsNavigation {
    /// Zoom with scroll or pinch and pan with drag
    pub zoom_and_pan_enabled: bool,

    /// Relative scale change per zoom step
    pub zoom_speed: f32,

    pub min_scale: f32,

    pub max_scale: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_and_pan_enabled: true,
            zoom_speed: 0.1,
            min_scale: 0.1,
            max_scale: 10.,
        }
    }
}

impl SettingsNavigation {
    pub fn with_zoom_and_pan_enabled(mut self, enabled: bool) -> Self {
        self.zoom_and_pan_enabled = enabled;
        self
    }

    pub fn with_zoom_speed(mut self, zoom_speed: f32) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    pub fn with_scale_extent(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }
}
