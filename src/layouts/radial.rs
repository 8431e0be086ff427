mod layout;
mod tree;

pub use layout::{radial_separation, ChildrenFn, LayoutNode, SeparationFn, TreeLayout};
pub use tree::{Tree, TreeLink, TreeNode};
