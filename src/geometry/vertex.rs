/// 几何体顶点定义模块
///
/// 程序化几何体使用的 CPU 侧顶点：位置和法线。
/// 颜色由材质提供，在上传 GPU 前合并（见 `renderer::vertex`）。

use bytemuck::{Pod, Zeroable};

/// 几何体顶点
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - **总计**: 24 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 用于光照计算的表面法线，应该是归一化的单位向量。
    pub normal: [f32; 3],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}
