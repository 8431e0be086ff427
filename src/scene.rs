use egui::{Pos2, Vec2};

use crate::{join::Selection, layouts::TreeNode, model::NodeId, Metadata};

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

/// Label attached to a node visual.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVisual {
    pub text: String,
    pub anchor: TextAnchor,
    /// Label is turned by 180 degrees so it reads upright on the left half.
    pub flipped: bool,
    /// Distance from the marker center along the node's radial axis
    pub offset: f32,
}

impl LabelVisual {
    /// Angle of the baseline in degrees, 0 pointing right.
    pub fn rotation_deg(&self, node_rotation_deg: f32) -> f32 {
        if self.flipped {
            node_rotation_deg + 180.
        } else {
            node_rotation_deg
        }
    }
}

/// Node group: rotated to the node's angle and pushed out along the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    /// Angle of the radial axis in degrees, 0 pointing right
    pub rotation_deg: f32,
    /// Distance from the root along the rotated axis
    pub translate: f32,
    pub marker_radius: f32,
    pub label: Option<LabelVisual>,
}

impl NodeVisual {
    pub fn from_tree_node(n: &TreeNode, marker_radius: f32) -> Self {
        Self {
            rotation_deg: n.x - 90.,
            translate: n.y,
            marker_radius,
            label: None,
        }
    }

    /// Unit vector of the rotated axis.
    pub fn axis(&self) -> Vec2 {
        Vec2::angled(self.rotation_deg.to_radians())
    }

    /// Marker center in diagram coordinates.
    pub fn center(&self) -> Pos2 {
        (self.axis() * self.translate).to_pos2()
    }

    /// Label anchor point in diagram coordinates.
    pub fn label_anchor(&self) -> Option<Pos2> {
        let label = self.label.as_ref()?;
        Some(self.center() + self.axis() * label.offset)
    }
}

/// Curved path between a parent and a child.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkVisual {
    pub source: NodeId,
    /// Cubic Bézier control points in diagram coordinates.
    pub points: [Pos2; 4],
}

/// Retained drawing of a radial view.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub nodes: Selection<NodeId, NodeVisual>,
    /// Keyed by the link's target node.
    pub links: Selection<NodeId, LinkVisual>,
    /// Translation and scale applied to the whole diagram group
    pub transform: Metadata,
    pub height: f32,
}

impl Scene {
    /// Drops every node and link visual.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::observable::Observable;

    use super::*;

    #[test]
    fn test_node_visual_geometry() {
        let n = TreeNode {
            id: "a".to_string(),
            name: Observable::new("A".to_string()),
            depth: 1,
            x: 180.,
            y: 10.,
        };
        let mut v = NodeVisual::from_tree_node(&n, 6.);
        assert_eq!(v.rotation_deg, 90.);
        let c = v.center();
        assert!(c.x.abs() < 1e-4 && (c.y - 10.).abs() < 1e-4);

        v.label = Some(LabelVisual {
            text: "A".to_string(),
            anchor: TextAnchor::End,
            flipped: true,
            offset: 8.,
        });
        let a = v.label_anchor().unwrap();
        assert!((a.y - 18.).abs() < 1e-4);
        assert_eq!(v.label.as_ref().unwrap().rotation_deg(v.rotation_deg), 270.);
    }
}
