//! 材质
//!
//! 场景里所有表面都是不透明的单色漫反射材质。

use crate::core::math::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Color,
}

impl Material {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color }
    }

    /// 从 0xRRGGBB 创建
    pub fn from_hex(name: impl Into<String>, hex: u32) -> Self {
        Self::new(name, Color::from_hex(hex))
    }
}
