//! 统一的数学库模块
//!
//! 基于 `nalgebra` 提供场景、动画和相机使用的数学类型和函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3/4, Matrix4, Quaternion, Color
//! - **常量**：PI, TAU, FRAC_1_SQRT_2 等
//! - **工具函数**：lerp, approx_eq 等
//! - **矩阵辅助函数**：translation, look_at, perspective, compose
//! - **四元数辅助函数**：from_euler_xyz, to_euler_xyz

pub use nalgebra::{
    Matrix3 as Mat3, Matrix4 as Mat4, Point3, Rotation3, Unit, UnitQuaternion,
    Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4,
};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix3 = Mat3<f32>;
pub type Matrix4 = Mat4<f32>;
pub type Quaternion = UnitQuaternion<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 从 0xRRGGBB 创建颜色
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// 转换为 RGB 数组（忽略 alpha）
    pub fn to_rgb_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// 转换为 RGBA 数组
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 2π
    pub const TAU: f32 = std::f32::consts::TAU;

    /// π/4
    pub const QUARTER_PI: f32 = std::f32::consts::FRAC_PI_4;

    /// 1/√2，对角线移动的归一化系数
    pub const FRAC_1_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    /// 线性插值
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 由平移、旋转、缩放组合模型矩阵：T * R * S
    pub fn compose(position: &Vector3, rotation: &Quaternion, scale: &Vector3) -> Matrix4 {
        Matrix4::new_translation(position)
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(scale)
    }

    /// 创建透视投影矩阵
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// 创建 Look-At 视图矩阵（右手坐标系）
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        Matrix4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }
}

/// 四元数辅助函数
///
/// 欧拉角约定：XYZ 顺序，R = Rx(x) * Ry(y) * Rz(z)，单位为弧度。
pub mod quaternion {
    use super::*;

    /// 从欧拉角创建四元数
    pub fn from_euler_xyz(euler: &Vector3) -> Quaternion {
        Quaternion::from_axis_angle(&Vector3::x_axis(), euler.x)
            * Quaternion::from_axis_angle(&Vector3::y_axis(), euler.y)
            * Quaternion::from_axis_angle(&Vector3::z_axis(), euler.z)
    }

    /// 将四元数分解为 XYZ 顺序的欧拉角
    ///
    /// y 接近 ±π/2 时（万向锁）z 取 0。
    pub fn to_euler_xyz(q: &Quaternion) -> Vector3 {
        let m = q.to_rotation_matrix();
        let m = m.matrix();
        let m13 = m[(0, 2)].clamp(-1.0, 1.0);
        let y = m13.asin();

        if m13.abs() < 0.999_999_9 {
            Vector3::new((-m[(1, 2)]).atan2(m[(2, 2)]), y, (-m[(0, 1)]).atan2(m[(0, 0)]))
        } else {
            Vector3::new(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_color_from_hex() {
        let sky = Color::from_hex(0x87ceeb);
        assert!((sky.r - 135.0 / 255.0).abs() < 1e-6);
        assert!((sky.g - 206.0 / 255.0).abs() < 1e-6);
        assert!((sky.b - 235.0 / 255.0).abs() < 1e-6);
        assert_eq!(sky.a, 1.0);
    }

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let point = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let result = mat * point;

        assert!((result.x - 1.0).abs() < 1e-6);
        assert!((result.y - 2.0).abs() < 1e-6);
        assert!((result.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_euler_applies_x_after_z() {
        let euler = Vector3::new(0.3, 0.0, PI / 16.0);
        let expected = Quaternion::from_axis_angle(&Vector3::x_axis(), 0.3)
            * Quaternion::from_axis_angle(&Vector3::z_axis(), PI / 16.0);
        let q = quaternion::from_euler_xyz(&euler);

        assert!(q.angle_to(&expected) < 1e-6);
        assert!(q.angle_to(&UnitQuaternion::from_euler_angles(0.3, 0.0, PI / 16.0)) > 1e-3);
    }

    #[test]
    fn test_euler_sin_y_in_first_row() {
        let euler = Vector3::new(0.4, -0.6, 1.1);
        let m = quaternion::from_euler_xyz(&euler).to_rotation_matrix();
        assert!((m.matrix()[(0, 2)] - (-0.6f32).sin()).abs() < 1e-6);
    }

    #[test]
    fn test_euler_gimbal_lock_round_trip() {
        let q = quaternion::from_euler_xyz(&Vector3::new(0.5, PI / 2.0, 0.0));
        let back = quaternion::from_euler_xyz(&quaternion::to_euler_xyz(&q));
        assert!(q.angle_to(&back) < 1e-3);
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vector3::new(0.3, -0.7, 0.2);
        let back = quaternion::to_euler_xyz(&quaternion::from_euler_xyz(&euler));
        assert!((back - euler).norm() < 1e-5);
    }
}
