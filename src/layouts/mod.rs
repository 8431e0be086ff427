pub mod radial;

pub use radial::{radial_separation, Tree, TreeLayout, TreeLink, TreeNode};
