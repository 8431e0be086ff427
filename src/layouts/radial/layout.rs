use std::collections::HashSet;

use log::warn;

use crate::{
    layouts::radial::tree::{Tree, TreeNode},
    model::GraphNode,
};

/// What a separation function gets to see of a node.
#[derive(Debug, Clone, Copy)]
pub struct LayoutNode<'a> {
    pub id: &'a str,
    pub depth: usize,
    pub parent: Option<&'a str>,
}

pub type ChildrenFn = Box<dyn Fn(&GraphNode) -> Vec<GraphNode>>;
pub type SeparationFn = Box<dyn Fn(&LayoutNode, &LayoutNode) -> f32>;

/// Siblings are packed tighter than cousins and both get tighter with depth.
pub fn radial_separation(a: &LayoutNode, b: &LayoutNode) -> f32 {
    let weight = if a.parent == b.parent { 1. } else { 2. };
    weight / a.depth as f32
}

/// Tidy tree layout (Reingold-Tilford with Walker's linear time apportioning).
///
/// Children are derived lazily through the installed children function, so the
/// layout always reflects the node and edge collections at the time it runs.
pub struct TreeLayout {
    size: [f32; 2],
    children: ChildrenFn,
    separation: SeparationFn,
}

impl std::fmt::Debug for TreeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeLayout")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl TreeLayout {
    pub fn new(children: ChildrenFn) -> Self {
        Self {
            size: [1., 1.],
            children,
            separation: Box::new(|a: &LayoutNode, b: &LayoutNode| {
                if a.parent == b.parent {
                    1.
                } else {
                    2.
                }
            }),
        }
    }

    /// Angular and radial extent, e.g. `[360., radius]`.
    pub fn with_size(mut self, size: [f32; 2]) -> Self {
        self.size = size;
        self
    }

    pub fn with_separation(mut self, separation: SeparationFn) -> Self {
        self.separation = separation;
        self
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    /// Lays out every node reachable from `root`. Angles that come out as NaN are
    /// reported as 0.
    pub fn compute(&self, root: &GraphNode) -> Tree {
        let mut w = Walker::expand(root, &self.children);
        w.run(self.size, &self.separation);
        w.into_tree()
    }
}

/// Arena of the tidy tree algorithm. Slot 0 is a virtual parent of the root.
struct Walker {
    nodes: Vec<GraphNode>,
    depth: Vec<usize>,
    parent: Vec<usize>,
    children: Vec<Vec<usize>>,
    number: Vec<usize>,
    default_ancestor: Vec<Option<usize>>,
    ancestor: Vec<usize>,
    thread: Vec<Option<usize>>,
    prelim: Vec<f32>,
    modifier: Vec<f32>,
    change: Vec<f32>,
    shift: Vec<f32>,
    x: Vec<f32>,
    y: Vec<f32>,
}

impl Walker {
    /// Pre-order expansion. A node reached a second time is not expanded again.
    fn expand(root: &GraphNode, children_fn: &ChildrenFn) -> Self {
        let mut w = Walker {
            nodes: Vec::new(),
            depth: vec![0],
            parent: vec![0],
            children: vec![Vec::new()],
            number: vec![0],
            default_ancestor: vec![None],
            ancestor: vec![0],
            thread: vec![None],
            prelim: vec![0.],
            modifier: vec![0.],
            change: vec![0.],
            shift: vec![0.],
            x: vec![0.],
            y: vec![0.],
        };
        // placeholder for the virtual slot
        w.nodes.push(root.clone());

        let mut visited = HashSet::new();
        visited.insert(root.nodeid.clone());

        let mut stack = vec![(root.clone(), 0usize, 0usize, 0usize)];
        while let Some((node, parent, number, depth)) = stack.pop() {
            let idx = w.push(node.clone(), parent, number, depth);
            w.children[parent].push(idx);

            let mut kids: Vec<GraphNode> = Vec::new();
            for child in children_fn(&node) {
                if visited.insert(child.nodeid.clone()) {
                    kids.push(child);
                } else {
                    warn!(
                        "node `{}` is reachable more than once, skipping it under `{}`",
                        child.nodeid, node.nodeid
                    );
                }
            }
            for (i, child) in kids.into_iter().enumerate().rev() {
                stack.push((child, idx, i, depth + 1));
            }
        }

        w
    }

    fn push(&mut self, node: GraphNode, parent: usize, number: usize, depth: usize) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.depth.push(depth);
        self.parent.push(parent);
        self.children.push(Vec::new());
        self.number.push(number);
        self.default_ancestor.push(None);
        self.ancestor.push(idx);
        self.thread.push(None);
        self.prelim.push(0.);
        self.modifier.push(0.);
        self.change.push(0.);
        self.shift.push(0.);
        self.x.push(0.);
        self.y.push(0.);
        idx
    }

    fn layout_node(&self, v: usize) -> LayoutNode<'_> {
        let parent = self.parent[v];
        LayoutNode {
            id: &self.nodes[v].nodeid,
            depth: self.depth[v],
            parent: (v != 1).then(|| self.nodes[parent].nodeid.as_str()),
        }
    }

    fn separation(&self, sep: &SeparationFn, a: usize, b: usize) -> f32 {
        sep(&self.layout_node(a), &self.layout_node(b))
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.children[v].first().copied().or(self.thread[v])
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.children[v].last().copied().or(self.thread[v])
    }

    /// Children before parents, siblings left to right.
    fn post_order(&self) -> Vec<usize> {
        let mut stack = vec![1];
        let mut out = Vec::with_capacity(self.nodes.len());
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.children[v].iter().copied());
        }
        out.reverse();
        out
    }

    fn run(&mut self, size: [f32; 2], sep: &SeparationFn) {
        for v in self.post_order() {
            self.first_walk(v, sep);
        }
        self.modifier[0] = -self.prelim[1];

        // arena order is pre-order, so parents are final before their children
        for v in 1..self.nodes.len() {
            let p = self.parent[v];
            self.x[v] = self.prelim[v] + self.modifier[p];
            self.modifier[v] += self.modifier[p];
        }

        let (mut left, mut right, mut bottom) = (1, 1, 1);
        for v in 1..self.nodes.len() {
            if self.x[v] < self.x[left] {
                left = v;
            }
            if self.x[v] > self.x[right] {
                right = v;
            }
            if self.depth[v] > self.depth[bottom] {
                bottom = v;
            }
        }

        let tx = self.separation(sep, left, right) / 2. - self.x[left];
        let kx = size[0] / (self.x[right] + self.separation(sep, right, left) / 2. + tx);
        let ky = size[1] / self.depth[bottom].max(1) as f32;
        for v in 1..self.nodes.len() {
            self.x[v] = (self.x[v] + tx) * kx;
            self.y[v] = self.depth[v] as f32 * ky;
        }
    }

    fn first_walk(&mut self, v: usize, sep: &SeparationFn) {
        let p = self.parent[v];
        let w = (self.number[v] > 0).then(|| self.children[p][self.number[v] - 1]);

        if let (Some(&first), Some(&last)) = (self.children[v].first(), self.children[v].last()) {
            self.execute_shifts(v);
            let midpoint = (self.prelim[first] + self.prelim[last]) / 2.;
            if let Some(w) = w {
                self.prelim[v] = self.prelim[w] + self.separation(sep, v, w);
                self.modifier[v] = self.prelim[v] - midpoint;
            } else {
                self.prelim[v] = midpoint;
            }
        } else if let Some(w) = w {
            self.prelim[v] = self.prelim[w] + self.separation(sep, v, w);
        }

        let anc = self.default_ancestor[p].unwrap_or(self.children[p][0]);
        self.default_ancestor[p] = Some(self.apportion(v, w, anc, sep));
    }

    fn execute_shifts(&mut self, v: usize) {
        let (mut shift, mut change) = (0., 0.);
        for i in (0..self.children[v].len()).rev() {
            let w = self.children[v][i];
            self.prelim[w] += shift;
            self.modifier[w] += shift;
            change += self.change[w];
            shift += self.shift[w] + change;
        }
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, ancestor: usize, sep: &SeparationFn) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let mut ancestor = ancestor;

        let mut vip = Some(v);
        let mut vop = v;
        let mut vim = Some(w);
        let mut vom = self.children[self.parent[v]][0];
        let mut sip = self.modifier[v];
        let mut sop = self.modifier[v];
        let mut sim = self.modifier[w];
        let mut som = self.modifier[vom];

        loop {
            vim = vim.and_then(|n| self.next_right(n));
            vip = vip.and_then(|n| self.next_left(n));
            let (Some(im), Some(ip)) = (vim, vip) else {
                break;
            };
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.ancestor[vop] = v;

            let shift = self.prelim[im] + sim - self.prelim[ip] - sip + self.separation(sep, im, ip);
            if shift > 0. {
                let wm = self.tree_ancestor(im, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.modifier[im];
            sip += self.modifier[ip];
            som += self.modifier[vom];
            sop += self.modifier[vop];
        }

        if vim.is_some() && self.next_right(vop).is_none() {
            self.thread[vop] = vim;
            self.modifier[vop] += sim - sop;
        }
        if vip.is_some() && self.next_left(vom).is_none() {
            self.thread[vom] = vip;
            self.modifier[vom] += sip - som;
            ancestor = v;
        }

        ancestor
    }

    fn tree_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let a = self.ancestor[vim];
        if self.parent[a] == self.parent[v] {
            a
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f32) {
        let subtrees = self.number[wp] as f32 - self.number[wm] as f32;
        let change = shift / subtrees;
        self.change[wp] -= change;
        self.shift[wp] += shift;
        self.change[wm] += change;
        self.prelim[wp] += shift;
        self.modifier[wp] += shift;
    }

    fn into_tree(self) -> Tree {
        let mut tree = Tree::default();
        let mut slots = vec![None; self.nodes.len()];

        for v in 1..self.nodes.len() {
            let n = &self.nodes[v];
            let x = if self.x[v].is_nan() { 0. } else { self.x[v] };
            let idx = tree.add_node(TreeNode {
                id: n.nodeid.clone(),
                name: n.name.clone(),
                depth: self.depth[v],
                x,
                y: self.y[v],
            });
            slots[v] = Some(idx);
            if v != 1 {
                if let Some(parent) = slots[self.parent[v]] {
                    tree.add_link(parent, idx);
                }
            }
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use crate::model::GraphEdge;

    use super::*;

    fn layout_for(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, size: [f32; 2]) -> Tree {
        let root = nodes.iter().find(|n| n.istopnode).cloned().unwrap();
        let children: ChildrenFn = Box::new(move |d: &GraphNode| {
            edges
                .iter()
                .filter(|e| e.domainnode_id == d.nodeid)
                .filter_map(|e| nodes.iter().find(|n| n.nodeid == e.rangenode_id).cloned())
                .collect::<Vec<_>>()
        });
        TreeLayout::new(children)
            .with_size(size)
            .with_separation(Box::new(radial_separation))
            .compute(&root)
    }

    #[test]
    fn test_single_node_angle_coerced_to_zero() {
        let tree = layout_for(vec![GraphNode::top("r", "Root")], vec![], [360., 100.]);
        let r = tree.node("r").unwrap();
        assert_eq!(r.x, 0.);
        assert_eq!(r.y, 0.);
    }

    #[test]
    fn test_two_children_are_spread_symmetric() {
        let tree = layout_for(
            vec![
                GraphNode::top("r", "Root"),
                GraphNode::new("a", "A"),
                GraphNode::new("b", "B"),
            ],
            vec![GraphEdge::new("r", "a"), GraphEdge::new("r", "b")],
            [360., 100.],
        );

        let (r, a, b) = (
            tree.node("r").unwrap(),
            tree.node("a").unwrap(),
            tree.node("b").unwrap(),
        );
        // leaves sit half a separation away from both ends of the circle
        assert!((a.x - 90.).abs() < 1e-3);
        assert!((b.x - 270.).abs() < 1e-3);
        assert!((r.x - 180.).abs() < 1e-3);
        assert_eq!(a.y, 100.);
        assert_eq!(r.y, 0.);
    }

    #[test]
    fn test_depth_scales_radius() {
        let tree = layout_for(
            vec![
                GraphNode::top("r", "Root"),
                GraphNode::new("a", "A"),
                GraphNode::new("b", "B"),
                GraphNode::new("c", "C"),
            ],
            vec![
                GraphEdge::new("r", "a"),
                GraphEdge::new("r", "b"),
                GraphEdge::new("a", "c"),
            ],
            [360., 300.],
        );
        assert_eq!(tree.node("a").unwrap().y, 150.);
        assert_eq!(tree.node("c").unwrap().y, 300.);
        assert_eq!(tree.node("c").unwrap().depth, 2);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_cycle_terminates() {
        let tree = layout_for(
            vec![GraphNode::top("r", "Root"), GraphNode::new("a", "A")],
            vec![GraphEdge::new("r", "a"), GraphEdge::new("a", "r")],
            [360., 100.],
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.links().count(), 1);
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let tree = layout_for(
            vec![GraphNode::top("r", "Root"), GraphNode::new("a", "A")],
            vec![GraphEdge::new("r", "a"), GraphEdge::new("r", "ghost")],
            [360., 100.],
        );
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_angles_within_extent() {
        let mut nodes = vec![GraphNode::top("r", "Root")];
        let mut edges = Vec::new();
        for i in 0..5 {
            let p = format!("p{i}");
            nodes.push(GraphNode::new(p.clone(), p.clone()));
            edges.push(GraphEdge::new("r", p.clone()));
            for j in 0..3 {
                let c = format!("c{i}{j}");
                nodes.push(GraphNode::new(c.clone(), c.clone()));
                edges.push(GraphEdge::new(p.clone(), c));
            }
        }
        let tree = layout_for(nodes, edges, [360., 100.]);

        assert_eq!(tree.len(), 21);
        for n in tree.nodes() {
            assert!(n.x >= 0. && n.x <= 360., "{} at {}", n.id, n.x);
        }
        // subtrees do not interleave
        let max_p0 = tree.children("p0").iter().map(|n| n.x).fold(f32::MIN, f32::max);
        let min_p1 = tree.children("p1").iter().map(|n| n.x).fold(f32::MAX, f32::min);
        assert!(max_p0 < min_p1);
    }
}
