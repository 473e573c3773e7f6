//! 组件基类

/// 组件 trait
///
/// 相机和光源等场景组件的基础接口
pub trait Component {
    /// 获取组件名称
    fn name(&self) -> &str;
}
