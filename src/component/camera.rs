//! Camera 组件
//!
//! 透视相机：位置、观察目标、朝向四元数和投影参数。
//!
//! 朝向遵循“相机看向本地 -Z”的约定，[`Camera::orientation`] 可以直接
//! 复制给公告板节点，使其正面（+Z）朝向观察者。

use super::Component;
use crate::core::math::{matrix, Matrix4, Quaternion, Vector3};
use std::f32::consts::PI;

/// Camera 组件
#[derive(Debug, Clone)]
pub struct Camera {
    /// 组件名称
    name: String,

    /// 相机位置
    position: Vector3,

    /// 观察目标
    target: Vector3,

    /// 世界上向量
    up: Vector3,

    /// 朝向（本地 -Z 指向观察目标）
    orientation: Quaternion,

    /// 垂直视场角（弧度）
    fov_y: f32,

    /// 宽高比
    aspect: f32,

    /// 近裁剪面距离
    near_z: f32,

    /// 远裁剪面距离
    far_z: f32,

    /// 投影矩阵
    proj_matrix: Matrix4,
}

impl Camera {
    /// 创建新的 Camera
    ///
    /// # 参数
    /// - `fov_y`: 垂直视场角（弧度）
    /// - `aspect`: 宽高比
    /// - `near_z` / `far_z`: 裁剪面距离
    pub fn new(name: impl Into<String>, fov_y: f32, aspect: f32, near_z: f32, far_z: f32) -> Self {
        Self {
            name: name.into(),
            position: Vector3::zeros(),
            target: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            orientation: Quaternion::identity(),
            fov_y,
            aspect,
            near_z,
            far_z,
            proj_matrix: matrix::perspective(fov_y, aspect, near_z, far_z),
        }
    }

    /// 创建主相机（FOV 75°，near 0.1，far 1000）
    pub fn main_camera(aspect: f32) -> Self {
        Self::new("MainCamera", 75.0 * PI / 180.0, aspect, 0.1, 1000.0)
    }

    // ========== 位置相关 ==========

    /// 获取相机位置
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// 设置相机位置
    ///
    /// 朝向保持不变，直到下一次 [`Camera::look_at`]。
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// 获取当前观察目标
    pub fn target(&self) -> Vector3 {
        self.target
    }

    /// 获取朝向四元数
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// 前向量（世界空间）
    pub fn forward(&self) -> Vector3 {
        self.orientation * Vector3::new(0.0, 0.0, -1.0)
    }

    // ========== 视锥体属性 ==========

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// 设置透视投影参数
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, near_z: f32, far_z: f32) {
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near_z = near_z;
        self.far_z = far_z;
        self.proj_matrix = matrix::perspective(fov_y, aspect, near_z, far_z);
    }

    /// 设置宽高比
    pub fn set_aspect(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > f32::EPSILON {
            self.aspect = aspect;
            self.proj_matrix = matrix::perspective(self.fov_y, self.aspect, self.near_z, self.far_z);
        }
    }

    // ========== LookAt ==========

    /// 让相机朝向目标点
    ///
    /// 目标与相机重合时朝向保持不变。视线与 up 平行时把视线稍微偏移，
    /// 避免叉积为零。
    pub fn look_at(&mut self, target: Vector3) {
        self.target = target;
        let mut back = self.position - target;
        if back.norm_squared() <= f32::EPSILON {
            return;
        }

        back.normalize_mut();
        if back.cross(&self.up).norm_squared() <= f32::EPSILON {
            if (self.up.z.abs() - 1.0).abs() <= f32::EPSILON {
                back.x += 1e-4;
            } else {
                back.z += 1e-4;
            }
            back.normalize_mut();
        }
        self.orientation = Quaternion::face_towards(&back, &self.up);
    }

    // ========== 获取矩阵 ==========

    /// 视图矩阵：相机世界变换的逆
    pub fn view_matrix(&self) -> Matrix4 {
        self.orientation.inverse().to_homogeneous() * Matrix4::new_translation(&-self.position)
    }

    /// 投影矩阵
    pub fn proj_matrix(&self) -> Matrix4 {
        self.proj_matrix
    }

    /// 投影 * 视图
    pub fn view_proj(&self) -> Matrix4 {
        self.proj_matrix * self.view_matrix()
    }
}

impl Component for Camera {
    fn name(&self) -> &str {
        &self.name
    }
}
