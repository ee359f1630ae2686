pub mod export;
pub mod graph;

pub use export::{escape_xml, to_dot, to_graphml};
pub use graph::{DependencyGraph, Hierarchy, TreeNode};
