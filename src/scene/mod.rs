//! 场景图模块
//!
//! 层级节点、共享网格表和材质表。

mod graph;
mod material;
mod ground;

pub use graph::{SceneGraph, Node, NodeId, MeshId, MaterialId, Drawable, DrawItem};
pub use material::Material;
pub use ground::add_ground;
