//! 地面

use std::f32::consts::FRAC_PI_2;

use tracing::debug;

use super::{Material, NodeId, SceneGraph};
use crate::component::Transform;
use crate::core::error::Result;
use crate::core::scene::GroundConfig;
use crate::geometry::create_plane;

/// 在 y = 0 处铺一块水平方形地面，返回地面节点
pub fn add_ground(graph: &mut SceneGraph, settings: &GroundConfig) -> Result<NodeId> {
    let mut plane = create_plane(settings.size, settings.size)?;
    plane.name = Some("Ground".to_string());
    let mesh = graph.add_mesh(plane);
    let material = graph.add_material(Material::from_hex("Ground", settings.color));

    let environment = graph.add_node("Environment", Transform::new());
    // 平面建在 XY 上，绕 X 轴转 -90° 后法线朝上
    let ground = graph.add_drawable(
        environment,
        "Ground",
        Transform::new().with_rotation(-FRAC_PI_2, 0.0, 0.0),
        mesh,
        material,
    )?;

    debug!(size = settings.size, "Ground added");
    Ok(ground)
}
