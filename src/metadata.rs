use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Navigation state of a radial view: the last seen zoom scale and pan offset and
/// the viewport center the diagram is anchored at.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// Current zoom factor
    pub scale: f32,
    /// Current pan offset relative to the center
    pub offset: Vec2,
    /// Viewport center, computed lazily on the first redraw
    pub center: Option<Vec2>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            scale: 1.,
            offset: Vec2::ZERO,
            center: None,
        }
    }
}

impl Metadata {
    /// Translation applied to the diagram group.
    pub fn translate(&self) -> Vec2 {
        self.offset + self.center.unwrap_or_default()
    }

    /// Maps a diagram position into viewport local coordinates.
    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.scale + self.translate()).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_to_screen() {
        let m = Metadata {
            scale: 2.,
            offset: Vec2::new(10., -5.),
            center: Some(Vec2::new(100., 50.)),
        };
        let p = Pos2::new(3., 4.);
        let s = m.canvas_to_screen_pos(p);
        assert_eq!(s, Pos2::new(116., 53.));
        assert_eq!(m.canvas_to_screen_size(6.), 12.);
    }
}
