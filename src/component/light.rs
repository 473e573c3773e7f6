//! 光照组件模块
//!
//! 场景只使用两种光源：环境光和一盏方向光。

use crate::component::Component;
use crate::core::math::{Color, Vector3};

/// 光源类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// 环境光
    Ambient,
    /// 方向光
    Directional,
}

/// 光源基础 trait
pub trait Light: Component {
    /// 获取光源类型
    fn light_type(&self) -> LightType;

    /// 光源颜色
    fn color(&self) -> Color;

    /// 光照强度
    fn intensity(&self) -> f32;

    /// 颜色乘以强度
    fn radiance(&self) -> [f32; 3] {
        let c = self.color();
        let i = self.intensity();
        [c.r * i, c.g * i, c.b * i]
    }
}

/// 环境光
#[derive(Debug, Clone)]
pub struct AmbientLight {
    name: String,
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(name: impl Into<String>, color: Color, intensity: f32) -> Self {
        Self {
            name: name.into(),
            color,
            intensity,
        }
    }
}

impl Component for AmbientLight {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Light for AmbientLight {
    fn light_type(&self) -> LightType {
        LightType::Ambient
    }

    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// 方向光
///
/// `direction` 是光线传播方向（从光源指向场景），已归一化。
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    name: String,
    pub color: Color,
    pub intensity: f32,
    pub direction: Vector3,
}

impl DirectionalLight {
    /// 从光源位置创建一盏照向原点的方向光
    pub fn from_position(name: impl Into<String>, position: Vector3, color: Color, intensity: f32) -> Self {
        let mut light = Self {
            name: name.into(),
            color,
            intensity,
            direction: Vector3::new(0.0, -1.0, 0.0),
        };
        light.set_direction(-position);
        light
    }

    /// 设置方向（自动归一化，零向量被忽略）
    pub fn set_direction(&mut self, direction: Vector3) {
        if let Some(dir) = direction.try_normalize(f32::EPSILON) {
            self.direction = dir;
        }
    }
}

impl Component for DirectionalLight {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Light for DirectionalLight {
    fn light_type(&self) -> LightType {
        LightType::Directional
    }

    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light_points_from_position_to_origin() {
        let light = DirectionalLight::from_position("Sun", Vector3::new(5.0, 10.0, 5.0), Color::WHITE, 1.0);
        let expected = Vector3::new(-5.0, -10.0, -5.0).normalize();
        assert!((light.direction - expected).norm() < 1e-6);
        assert_eq!(light.light_type(), LightType::Directional);
    }

    #[test]
    fn test_zero_direction_is_ignored() {
        let mut light = DirectionalLight::from_position("Sun", Vector3::new(0.0, 1.0, 0.0), Color::WHITE, 1.0);
        light.set_direction(Vector3::zeros());
        assert!((light.direction - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_radiance_scales_color() {
        let ambient = AmbientLight::new("Ambient", Color::WHITE, 0.5);
        assert_eq!(ambient.radiance(), [0.5, 0.5, 0.5]);
        assert_eq!(ambient.name(), "Ambient");
    }
}
