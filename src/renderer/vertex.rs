//! 顶点数据定义
//!
//! 本模块定义了渲染管线使用的顶点结构体。
//!
//! # 设计说明
//!
//! - 使用 `#[repr(C)]` 确保内存布局与着色器一致
//! - 实现 `Pod` 和 `Zeroable` trait 以支持零拷贝传输到 GPU
//! - 颜色在 CPU 侧从材质写入顶点，管线不需要材质绑定

use bytemuck::{Pod, Zeroable};

use crate::core::math::Color;

/// GPU 顶点
///
/// # 内存布局
///
/// - `position`：12 字节，世界空间位置
/// - `normal`：12 字节，世界空间法线
/// - `color`：12 字节，线性空间 RGB
///
/// 总大小：36 字节
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl GpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, normal, color }
    }

    /// 顶点缓冲布局
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// sRGB 分量转线性
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// 把材质颜色（sRGB）转换为着色器使用的线性 RGB
pub fn linear_rgb(color: &Color) -> [f32; 3] {
    [srgb_to_linear(color.r), srgb_to_linear(color.g), srgb_to_linear(color.b)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        assert_eq!(size_of::<GpuVertex>(), 36);
        assert_eq!(GpuVertex::layout().array_stride, 36);
        assert_eq!(GpuVertex::layout().attributes.len(), 3);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
    }

    #[test]
    fn test_linear_rgb_of_white() {
        assert_eq!(linear_rgb(&Color::WHITE), [1.0, 1.0, 1.0]);
    }
}
