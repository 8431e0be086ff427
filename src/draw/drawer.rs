use egui::{
    epaint::{CircleShape, CubicBezierShape, TextShape},
    Color32, Context, FontFamily, FontId, Painter, Pos2, Stroke, Vec2,
};

use crate::{
    scene::{NodeVisual, Scene, TextAnchor},
    settings::SettingsStyle,
    Metadata,
};

use super::{Layer, Layers};

const LINK_WIDTH: f32 = 1.5;
const MIN_FONT_PX: f32 = 2.;

/// Contains all the data about current widget state which is needed for drawing.
pub struct DrawContext<'a> {
    pub ctx: &'a Context,
    pub painter: &'a Painter,
    pub style: &'a SettingsStyle,
    pub meta: &'a Metadata,
    /// Top left corner of the widget
    pub origin: Vec2,
}

impl DrawContext<'_> {
    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.meta.canvas_to_screen_pos(p) + self.origin
    }
}

/// Paints a [`Scene`]: links first, node markers and labels on top.
pub struct Drawer<'a> {
    ctx: &'a DrawContext<'a>,
    scene: &'a Scene,
    layers: Layers,
}

impl<'a> Drawer<'a> {
    pub fn new(scene: &'a Scene, ctx: &'a DrawContext<'a>) -> Self {
        Drawer {
            ctx,
            scene,
            layers: Layers::default(),
        }
    }

    pub fn draw(mut self) {
        self.draw_links();
        self.draw_nodes();
        self.layers.draw(self.ctx.painter);
    }

    fn draw_links(&mut self) {
        let (ctx, scene) = (self.ctx, self.scene);
        let color = ctx.ctx.style().visuals.widgets.noninteractive.fg_stroke.color;
        let stroke = Stroke::new(ctx.meta.canvas_to_screen_size(LINK_WIDTH), color);

        for (_, link) in scene.links.iter() {
            let points = link.points.map(|p| ctx.to_screen(p));
            self.layers.add(
                Layer::Links,
                CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ),
            );
        }
    }

    fn draw_nodes(&mut self) {
        let (ctx, scene) = (self.ctx, self.scene);
        let visuals = ctx.ctx.style().visuals.clone();
        let fill = visuals.widgets.inactive.bg_fill;
        let stroke = Stroke::new(
            ctx.meta.canvas_to_screen_size(LINK_WIDTH),
            visuals.widgets.inactive.fg_stroke.color,
        );
        let text_color = visuals.text_color();

        for (_, node) in scene.nodes.iter() {
            self.layers.add(Layer::Markers, CircleShape {
                center: ctx.to_screen(node.center()),
                radius: ctx.meta.canvas_to_screen_size(node.marker_radius),
                fill,
                stroke,
            });
            self.draw_label(node, text_color);
        }
    }

    fn draw_label(&mut self, node: &NodeVisual, color: Color32) {
        let (Some(label), Some(anchor)) = (node.label.as_ref(), node.label_anchor()) else {
            return;
        };
        let font_px = self.ctx.meta.canvas_to_screen_size(self.ctx.style.font_size);
        if font_px < MIN_FONT_PX {
            return;
        }

        let galley = self.ctx.painter.layout_no_wrap(
            label.text.clone(),
            FontId::new(font_px, FontFamily::Proportional),
            color,
        );
        let size = galley.size();

        let angle = label.rotation_deg(node.rotation_deg).to_radians();
        let along = Vec2::angled(angle);
        let across = along.rot90();
        let lead = match label.anchor {
            TextAnchor::Start => 0.,
            TextAnchor::End => -size.x,
        };
        // galley pivot is its top left corner
        let top_left = self.ctx.to_screen(anchor) + along * lead - across * (size.y / 2.);

        self.layers.add(
            Layer::Labels,
            TextShape::new(top_left, galley, color).with_angle(angle),
        );
    }
}
