use egui::{Painter, Shape};

/// Paint order of a diagram frame, first to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Links,
    Markers,
    Labels,
}

/// Shapes of one frame collected per [`Layer`] and painted in layer order, so
/// links end up under the markers and labels on top of both.
#[derive(Default)]
pub struct Layers {
    shapes: [Vec<Shape>; 3],
}

impl Layers {
    pub fn add(&mut self, layer: Layer, shape: impl Into<Shape>) {
        self.shapes[layer as usize].push(shape.into());
    }

    pub(crate) fn draw(self, p: &Painter) {
        for shapes in self.shapes {
            p.extend(shapes);
        }
    }
}

