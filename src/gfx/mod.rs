//! 图形后端模块
//!
//! 封装窗口模式下使用的 GPU 实现。无窗口运行不经过本模块。

pub mod wgpu;
