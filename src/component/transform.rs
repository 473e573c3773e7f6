//! Transform 组件
//!
//! 管理场景节点的局部位置、旋转和缩放。
//!
//! 旋转以欧拉角（弧度）保存，XYZ 顺序，R = Rx * Ry * Rz。
//! 行走动画直接写入 `rotation.x`（摆动）和 `rotation.z`（静止时的倾斜），
//! 公告板节点通过 [`Transform::set_quaternion`] 写入整体朝向。

use crate::core::math::{matrix, quaternion, Matrix4, Quaternion, Vector3};

/// Transform 组件
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// 位置
    pub position: Vector3,

    /// 欧拉角（弧度）
    pub rotation: Vector3,

    /// 缩放
    pub scale: Vector3,
}

impl Transform {
    /// 单位变换
    pub fn new() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// 创建带位置的 Transform
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        let mut transform = Self::new();
        transform.position = Vector3::new(x, y, z);
        transform
    }

    /// 设置欧拉角（构建器风格）
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    /// 设置缩放（构建器风格）
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// 设置位置（分量形式）
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    /// 当前旋转对应的四元数
    pub fn quaternion(&self) -> Quaternion {
        quaternion::from_euler_xyz(&self.rotation)
    }

    /// 用四元数设置旋转
    pub fn set_quaternion(&mut self, q: &Quaternion) {
        self.rotation = quaternion::to_euler_xyz(q);
    }

    /// 局部矩阵：T * R * S
    pub fn local_matrix(&self) -> Matrix4 {
        matrix::compose(&self.position, &self.quaternion(), &self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
