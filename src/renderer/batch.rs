//! 世界空间合批
//!
//! 每帧把场景图里所有可见网格变换到世界空间，拼成一个顶点数组和一个索引数组，
//! 一次 draw call 画完整个场景。

use super::vertex::{linear_rgb, GpuVertex};
use crate::core::math::{Matrix3, Vector3, Vector4};
use crate::scene::SceneGraph;

/// 一帧的几何数据
#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    /// 参与合批的节点数
    pub draw_count: usize,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空并重新收集场景
    pub fn rebuild(&mut self, scene: &SceneGraph) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_count = 0;

        for item in scene.draw_items() {
            let world = item.world;
            let normal_matrix = normal_matrix(&world.fixed_view::<3, 3>(0, 0).into_owned());
            let color = linear_rgb(&item.material.color);

            let base = self.vertices.len() as u32;
            self.vertices.extend(item.mesh.vertices.iter().map(|v| {
                let p = world * Vector4::new(v.position[0], v.position[1], v.position[2], 1.0);
                let n = (normal_matrix * Vector3::from(v.normal))
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::y);
                GpuVertex::new([p.x, p.y, p.z], n.into(), color)
            }));
            self.indices.extend(item.mesh.indices.iter().map(|i| base + i));
            self.draw_count += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// 法线矩阵：模型矩阵左上 3x3 的逆转置；奇异时退回原矩阵
fn normal_matrix(linear: &Matrix3) -> Matrix3 {
    linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or(*linear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Transform;
    use crate::core::math::Color;
    use crate::geometry::{create_box, create_plane};
    use crate::scene::Material;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_batch_offsets_indices() {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(create_box(1.0, 1.0, 1.0).unwrap());
        let material = graph.add_material(Material::new("White", Color::WHITE));
        let root = graph.add_node("Root", Transform::new());
        graph.add_drawable(root, "A", Transform::new(), mesh, material).unwrap();
        graph.add_drawable(root, "B", Transform::at(2.0, 0.0, 0.0), mesh, material).unwrap();

        let mut batch = FrameBatch::new();
        batch.rebuild(&graph);

        assert_eq!(batch.draw_count, 2);
        assert_eq!(batch.vertices.len(), 48);
        assert_eq!(batch.indices.len(), 72);
        assert!(batch.indices[36..].iter().all(|&i| i >= 24 && i < 48));
        assert!(batch.vertices[24..].iter().all(|v| v.position[0] >= 1.5 - 1e-6));
    }

    #[test]
    fn test_ground_plane_normal_points_up() {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(create_plane(50.0, 50.0).unwrap());
        let material = graph.add_material(Material::from_hex("Ground", 0x8cb369));
        let root = graph.add_node("World", Transform::new());
        graph
            .add_drawable(root, "Ground", Transform::new().with_rotation(-FRAC_PI_2, 0.0, 0.0), mesh, material)
            .unwrap();

        let mut batch = FrameBatch::new();
        batch.rebuild(&graph);

        for v in &batch.vertices {
            assert!(v.position[1].abs() < 1e-4);
            assert!((v.normal[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_nonuniform_scale_keeps_unit_normals() {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(create_box(1.0, 1.0, 1.0).unwrap());
        let material = graph.add_material(Material::new("White", Color::WHITE));
        let root = graph.add_node("Root", Transform::new());
        graph
            .add_drawable(root, "Hand", Transform::new().with_scale(1.0, 0.8, 0.6), mesh, material)
            .unwrap();

        let mut batch = FrameBatch::new();
        batch.rebuild(&graph);
        for v in &batch.vertices {
            assert!((Vector3::from(v.normal).norm() - 1.0).abs() < 1e-5);
        }
    }
}
