use egui::{PointerButton, Response, Ui, Vec2};

use crate::settings::SettingsNavigation;

/// Scroll distance in points of one mouse wheel notch.
const SCROLL_NOTCH: f32 = 50.;

/// Gesture report. Both values are absolute: the accumulated scale and the
/// accumulated translation since the behavior was created.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomEvent {
    pub scale: Option<f32>,
    pub translate: Option<Vec2>,
}

/// Turns scroll, pinch and drag input into [`ZoomEvent`]s.
///
/// Zooming keeps the point under the pointer fixed.
#[derive(Debug, Clone)]
pub struct ZoomBehavior {
    scale: f32,
    translate: Vec2,
    settings: SettingsNavigation,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self::new(SettingsNavigation::default())
    }
}

impl ZoomBehavior {
    pub fn new(settings: SettingsNavigation) -> Self {
        Self {
            scale: 1.,
            translate: Vec2::ZERO,
            settings,
        }
    }

    pub fn settings(&self) -> &SettingsNavigation {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SettingsNavigation) {
        self.settings = settings;
        self.scale = self.clamp(self.scale);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Zooms by `steps` zoom speed increments around `anchor`, given relative to
    /// the diagram center. `None` zooms around the center.
    pub fn zoom_by(&mut self, steps: f32, anchor: Option<Vec2>) -> ZoomEvent {
        let new_scale = self.clamp(self.scale * (1. + self.settings.zoom_speed * steps));
        self.zoom_to(new_scale, anchor)
    }

    pub fn zoom_to(&mut self, new_scale: f32, anchor: Option<Vec2>) -> ZoomEvent {
        let new_scale = self.clamp(new_scale);
        let p = anchor.unwrap_or(Vec2::ZERO);
        let k = new_scale / self.scale;
        self.translate = p - (p - self.translate) * k;
        self.scale = new_scale;
        self.event()
    }

    pub fn pan_by(&mut self, delta: Vec2) -> ZoomEvent {
        self.translate += delta;
        self.event()
    }

    /// Resets to scale 1 without any translation.
    pub fn reset(&mut self) -> ZoomEvent {
        self.scale = 1.;
        self.translate = Vec2::ZERO;
        self.event()
    }

    /// Reads the frame's input. `center` is the diagram center in widget local
    /// coordinates.
    pub fn handle(&mut self, ui: &Ui, resp: &Response, center: Vec2) -> Option<ZoomEvent> {
        if !self.settings.zoom_and_pan_enabled {
            return None;
        }

        let mut event = None;

        if resp.hovered() {
            let (zoom_delta, scroll, hover) = ui.input(|i| {
                (
                    i.zoom_delta(),
                    i.raw_scroll_delta.y,
                    i.pointer.hover_pos(),
                )
            });
            let steps = self.zoom_steps(zoom_delta, scroll);
            if steps != 0. {
                let anchor = hover.map(|p| p - resp.rect.left_top() - center);
                event = Some(self.zoom_by(steps, anchor));
            }
        }

        if (resp.dragged_by(PointerButton::Primary) || resp.dragged_by(PointerButton::Middle))
            && resp.drag_delta() != Vec2::ZERO
        {
            event = Some(self.pan_by(resp.drag_delta()));
        }

        event
    }

    /// Zoom steps of one frame. Pinch keeps its exact factor, wheel scrolling
    /// counts one step per notch.
    fn zoom_steps(&self, zoom_delta: f32, scroll: f32) -> f32 {
        if zoom_delta != 1. {
            (zoom_delta - 1.) / self.settings.zoom_speed
        } else {
            scroll / SCROLL_NOTCH
        }
    }

    /// Non-finite scales fall back to the current one.
    fn clamp(&self, scale: f32) -> f32 {
        if !scale.is_finite() {
            return self.scale;
        }
        scale.clamp(self.settings.min_scale, self.settings.max_scale)
    }

    fn event(&self) -> ZoomEvent {
        ZoomEvent {
            scale: Some(self.scale),
            translate: Some(self.translate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut z = ZoomBehavior::default();
        z.pan_by(Vec2::new(10., 0.));
        let anchor = Vec2::new(50., 20.);
        // diagram point under the anchor before zooming
        let before = (anchor - z.translate()) / z.scale();

        let e = z.zoom_to(2., Some(anchor));
        assert_eq!(e.scale, Some(2.));
        let after = (anchor - z.translate()) / z.scale();
        assert!((before - after).length() < 1e-4);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut z = ZoomBehavior::new(SettingsNavigation::default().with_scale_extent(0.5, 2.));
        assert_eq!(z.zoom_to(8., None).scale, Some(2.));
        assert_eq!(z.zoom_to(0.01, None).scale, Some(0.5));
    }

    #[test]
    fn test_pan_accumulates() {
        let mut z = ZoomBehavior::default();
        z.pan_by(Vec2::new(1., 2.));
        let e = z.pan_by(Vec2::new(3., 4.));
        assert_eq!(e.translate, Some(Vec2::new(4., 6.)));
        assert_eq!(e.scale, Some(1.));
    }

    #[test]
    fn test_wheel_notch_is_one_step() {
        let mut z = ZoomBehavior::default();
        assert_eq!(z.zoom_steps(1., 0.), 0.);
        assert_eq!(z.zoom_steps(1., SCROLL_NOTCH), 1.);
        assert_eq!(z.zoom_steps(1., -SCROLL_NOTCH / 2.), -0.5);

        let e = z.zoom_by(z.zoom_steps(1.2, 0.), None);
        assert!((e.scale.unwrap() - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_scale_is_ignored() {
        let mut z = ZoomBehavior::default();
        z.zoom_to(2., None);
        assert_eq!(z.zoom_to(f32::NAN, None).scale, Some(2.));
        assert_eq!(z.zoom_to(f32::INFINITY, None).scale, Some(2.));
        assert!(z.translate().is_finite());
    }

    #[test]
    fn test_zoom_by_steps() {
        let mut z = ZoomBehavior::default();
        let e = z.zoom_by(1., None);
        assert!((e.scale.unwrap() - 1.1).abs() < 1e-6);
    }
}
