//! 场景图
//!
//! 节点保存在一个连续的 `Vec` 中，用 [`NodeId`] 寻址，父子关系通过句柄记录。
//! 网格和材质分别放在共享表里，左右对称的部件引用同一份网格。
//!
//! 世界变换在查询时沿父链计算，不做缓存：场景只有几十个节点，
//! 而动画每帧都会改写大部分局部旋转。

use crate::component::Transform;
use crate::core::error::{Result, WalkSceneError};
use crate::core::math::{Matrix4, Quaternion};
use crate::geometry::MeshData;
use super::material::Material;

/// 节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 网格句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// 材质句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

/// 可绘制节点引用的网格和材质
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable {
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// 场景节点
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,

    /// 局部变换
    pub transform: Transform,

    /// 网格和材质（纯分组节点为 `None`）
    pub drawable: Option<Drawable>,

    /// 每帧朝向相机
    pub billboard: bool,

    pub visible: bool,
}

impl Node {
    fn new(name: String, transform: Transform, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            transform,
            drawable: None,
            billboard: false,
            visible: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// 场景图
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    meshes: Vec<MeshData>,
    materials: Vec<Material>,
}

/// 一个待绘制的对象：世界矩阵、网格和材质
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub world: Matrix4,
    pub mesh: &'a MeshData,
    pub material: &'a Material,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== 资源表 ==========

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    // ========== 节点 ==========

    /// 添加根节点
    pub fn add_node(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        self.nodes.push(Node::new(name.into(), transform, None));
        NodeId(self.nodes.len() - 1)
    }

    /// 在 `parent` 下添加子节点
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(WalkSceneError::Runtime(format!("unknown parent node {:?}", parent)));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name.into(), transform, Some(parent)));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// 添加带网格和材质的子节点
    pub fn add_drawable(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        mesh: MeshId,
        material: MaterialId,
    ) -> Result<NodeId> {
        if mesh.0 >= self.meshes.len() || material.0 >= self.materials.len() {
            return Err(WalkSceneError::Runtime(format!(
                "drawable references unknown mesh {:?} or material {:?}",
                mesh, material
            )));
        }

        let id = self.add_child(parent, name, transform)?;
        self.nodes[id.0].drawable = Some(Drawable { mesh, material });
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// 局部变换的可变引用
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|n| &mut n.transform)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按名称查找第一个匹配的节点
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// 所有公告板节点
    pub fn billboards(&self) -> Vec<NodeId> {
        self.ids().filter(|id| self.nodes[id.0].billboard).collect()
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// 深度优先遍历 `root` 及其所有后代
    pub fn traverse<F>(&self, root: NodeId, mut visit: F)
    where
        F: FnMut(NodeId, &Node),
    {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id.0) {
                visit(id, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    // ========== 世界变换 ==========

    /// 世界矩阵：从根到节点依次相乘
    pub fn world_matrix(&self, id: NodeId) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        let mut current = self.nodes.get(id.0);
        while let Some(node) = current {
            matrix = node.transform.local_matrix() * matrix;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        matrix
    }

    /// 世界旋转（忽略缩放）
    pub fn world_rotation(&self, id: NodeId) -> Quaternion {
        let mut rotation = Quaternion::identity();
        let mut current = self.nodes.get(id.0);
        while let Some(node) = current {
            rotation = node.transform.quaternion() * rotation;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        rotation
    }

    /// 父节点的世界旋转；根节点返回单位旋转
    pub fn parent_world_rotation(&self, id: NodeId) -> Quaternion {
        self.nodes
            .get(id.0)
            .and_then(|n| n.parent)
            .map(|p| self.world_rotation(p))
            .unwrap_or_else(Quaternion::identity)
    }

    /// 收集所有可见且可绘制的节点
    ///
    /// 父节点不可见时整棵子树都不绘制。
    pub fn draw_items(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        for root in self.ids().filter(|id| self.nodes[id.0].parent.is_none()) {
            self.collect_visible(root, Matrix4::identity(), &mut items);
        }
        items
    }

    fn collect_visible<'a>(&'a self, id: NodeId, parent_world: Matrix4, items: &mut Vec<DrawItem<'a>>) {
        let Some(node) = self.nodes.get(id.0) else { return };
        if !node.visible {
            return;
        }

        let world = parent_world * node.transform.local_matrix();
        if let Some(drawable) = node.drawable {
            if let (Some(mesh), Some(material)) = (self.mesh(drawable.mesh), self.material(drawable.material)) {
                items.push(DrawItem { node: id, world, mesh, material });
            }
        }

        for &child in &node.children {
            self.collect_visible(child, world, items);
        }
    }
}
