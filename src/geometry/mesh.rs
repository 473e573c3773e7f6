/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，存放程序化生成的顶点和索引。

use super::vertex::Vertex;
use crate::core::math::Vector3;

/// CPU侧网格数据
///
/// 这是一个简单的数据持有者，不包含GPU资源。
/// 渲染器每帧将场景中所有网格变换到世界空间后合批上传。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每3个索引定义一个三角形。
    pub indices: Vec<u32>,

    /// 网格名称（可选）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 创建一个带容量预分配的网格数据
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            name: None,
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 平移所有顶点
    ///
    /// 用于把几何体的局部原点移到别处（例如脚的旋转轴放在脚跟上方）。
    pub fn translate(&mut self, offset: Vector3) {
        for v in &mut self.vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
    }

    /// 构建器风格的平移
    pub fn translated(mut self, offset: Vector3) -> Self {
        self.translate(offset);
        self
    }

    /// 轴对齐包围盒 (min, max)，空网格返回 `None`
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = self.vertices.first()?;
        let mut min = Vector3::from(first.position);
        let mut max = min;
        for v in &self.vertices[1..] {
            let p = Vector3::from(v.position);
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Some((min, max))
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数（每个三角形3个顶点）
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "索引数量必须是3的倍数，当前为: {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(format!(
                    "索引 {} 处的值 {} 超出顶点范围 (0-{})",
                    i,
                    index,
                    vertex_count.saturating_sub(1)
                ));
            }
        }

        Ok(())
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.name = None;
    }
}
