/// 几何体模块
///
/// 提供程序化几何体的生成：盒子、球、圆柱、圆锥和平面。
/// 包含顶点定义和网格数据结构。
///
/// # 模块结构
///
/// - `vertex`: 顶点数据结构定义
/// - `mesh`: 网格数据结构
/// - `primitives`: 各种基本体的生成函数
///
/// # 架构设计
///
/// ```text
/// 参数 (尺寸/分段)
///     ↓
/// primitives::create_*
///     ↓
/// MeshData (CPU侧数据，局部空间)
///     ↓
/// SceneGraph 节点 (附带材质和变换)
///     ↓
/// Renderer (变换到世界空间后上传到GPU)
/// ```

pub mod vertex;
pub mod mesh;
pub mod primitives;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::MeshData;
pub use primitives::{
    create_box, create_sphere, create_cylinder, create_cone, create_plane,
    SphereOptions, CylinderOptions, GeometryResult,
};
