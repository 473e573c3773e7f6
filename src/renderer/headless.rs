//! 无窗口渲染器
//!
//! 不访问 GPU：每帧仍然完整收集世界空间几何，只记录统计数据。
//! 用于 `--headless` 运行和测试。

use tracing::trace;

use super::batch::FrameBatch;
use super::FrameRenderer;
use crate::component::Camera;
use crate::core::error::Result;
use crate::core::math::Vector3;
use crate::scene::SceneGraph;

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    batch: FrameBatch,
    frames: u64,
    size: (u32, u32),
    last_camera: Option<Vector3>,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// 最近一帧参与绘制的节点数
    pub fn last_draw_count(&self) -> usize {
        self.batch.draw_count
    }

    pub fn last_vertex_count(&self) -> usize {
        self.batch.vertices.len()
    }

    pub fn last_camera_position(&self) -> Option<Vector3> {
        self.last_camera
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl FrameRenderer for HeadlessRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()> {
        self.batch.rebuild(scene);
        self.frames += 1;
        self.last_camera = Some(camera.position());
        trace!(
            frame = self.frames,
            draws = self.batch.draw_count,
            vertices = self.batch.vertices.len(),
            "Headless frame"
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
