//! 渲染器模块
//!
//! 本模块提供了统一的渲染接口。主循环只依赖 [`FrameRenderer`] trait，
//! 不关心背后是 wgpu 窗口渲染还是无窗口渲染。
//!
//! # 架构设计
//!
//! - `FrameRenderer`：每帧一次 `render` 调用
//! - `HeadlessRenderer`：不访问 GPU，用于 `--headless` 和测试
//! - wgpu 实现在 `gfx::wgpu` 模块中
//! - `batch`：与 API 无关的世界空间合批

pub mod vertex;
pub mod batch;
mod headless;

use crate::component::{AmbientLight, Camera, DirectionalLight};
use crate::core::error::Result;
use crate::core::math::{Color, Vector3};
use crate::core::scene::SceneConfig;
use crate::scene::SceneGraph;

pub use batch::FrameBatch;
pub use headless::HeadlessRenderer;

/// 帧渲染器
pub trait FrameRenderer {
    /// 从相机视角绘制场景
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()>;

    /// 输出尺寸变化
    fn resize(&mut self, width: u32, height: u32);

    /// 已绘制的帧数
    fn frames_rendered(&self) -> u64;
}

/// 场景的光照和背景
#[derive(Debug, Clone)]
pub struct SceneLighting {
    pub clear_color: Color,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

impl SceneLighting {
    pub fn from_config(scene: &SceneConfig) -> Self {
        let light_color = Color::from_hex(scene.lighting.color);
        Self {
            clear_color: scene.clear_color(),
            ambient: AmbientLight::new("AmbientLight", light_color, scene.lighting.ambient_intensity),
            sun: DirectionalLight::from_position(
                "Sun",
                Vector3::from(scene.lighting.sun_position),
                light_color,
                scene.lighting.sun_intensity,
            ),
        }
    }
}
