use std::collections::HashMap;

use egui::Pos2;
use petgraph::{
    stable_graph::{NodeIndex, StableGraph},
    visit::EdgeRef,
    Directed,
};

use crate::{model::NodeId, observable::Observable};

/// Node of a laid out tree.
///
/// `x` is the angle in degrees within `[0, size[0]]`, `y` the distance from the
/// root within `[0, size[1]]`.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: Observable<String>,
    pub depth: usize,
    pub x: f32,
    pub y: f32,
}

impl TreeNode {
    /// Cartesian position with the root at the origin and 0 degrees pointing up.
    pub fn position(&self) -> Pos2 {
        polar(self.x, self.y)
    }
}

/// Converts an angle in degrees (0 is up, clockwise) and a radius into a point.
fn polar(angle_deg: f32, radius: f32) -> Pos2 {
    let a = (angle_deg - 90.).to_radians();
    Pos2::new(radius * a.cos(), radius * a.sin())
}

/// Parent to child connection of a laid out tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeLink<'a> {
    pub source: &'a TreeNode,
    pub target: &'a TreeNode,
}

impl TreeLink<'_> {
    /// Control points of the radial diagonal between source and target: the curve
    /// leaves the source along its angle and reaches the target along the target's
    /// angle, bending at the mean radius.
    pub fn diagonal(&self) -> [Pos2; 4] {
        let (s, t) = (self.source, self.target);
        let m = (s.y + t.y) / 2.;
        [
            s.position(),
            polar(s.x, m),
            polar(t.x, m),
            t.position(),
        ]
    }
}

/// Materialized layout result. Nodes are stored in pre-order, edges point from
/// parent to child in the same order.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    g: StableGraph<TreeNode, (), Directed>,
    by_id: HashMap<NodeId, NodeIndex>,
}

impl Tree {
    pub(crate) fn add_node(&mut self, node: TreeNode) -> NodeIndex {
        let id = node.id.clone();
        let idx = self.g.add_node(node);
        self.by_id.insert(id, idx);
        idx
    }

    pub(crate) fn add_link(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.g.add_edge(parent, child, ());
    }

    pub fn g(&self) -> &StableGraph<TreeNode, (), Directed> {
        &self.g
    }

    pub fn len(&self) -> usize {
        self.g.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.g.node_count() == 0
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.by_id.get(id).and_then(|idx| self.g.node_weight(*idx))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.g.node_weights()
    }

    /// Children of `id` in layout order.
    pub fn children(&self, id: &str) -> Vec<&TreeNode> {
        let Some(idx) = self.by_id.get(id) else {
            return Vec::new();
        };
        let mut children: Vec<_> = self
            .g
            .edges(*idx)
            .map(|e| (e.id(), &self.g[e.target()]))
            .collect();
        // petgraph walks outgoing edges newest first
        children.sort_by_key(|(e, _)| *e);
        children.into_iter().map(|(_, n)| n).collect()
    }

    pub fn links(&self) -> impl Iterator<Item = TreeLink<'_>> {
        self.g.edge_indices().filter_map(|e| {
            let (s, t) = self.g.edge_endpoints(e)?;
            Some(TreeLink {
                source: &self.g[s],
                target: &self.g[t],
            })
        })
    }
}
