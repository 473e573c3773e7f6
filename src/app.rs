//! 应用状态与帧循环
//!
//! [`App`] 把配置、场景图、角色、相机和输入组合在一起；窗口模式和无窗口模式
//! 共用同一个 `frame()`，区别只在于谁来驱动帧、谁来渲染。

use tracing::{debug, info};

use crate::character::build_character;
use crate::component::Camera;
use crate::core::error::Result;
use crate::core::input::InputSystem;
use crate::core::runtime::FrameScheduler;
use crate::core::{Config, SceneConfig};
use crate::motion::{FrameContext, FrameReport};
use crate::renderer::FrameRenderer;
use crate::scene::{add_ground, SceneGraph};

/// 运行中的场景
pub struct App {
    config: Config,
    scene_config: SceneConfig,
    graph: SceneGraph,
    context: FrameContext,
    camera: Camera,
    input: InputSystem,
}

impl App {
    /// 构建地面、角色和相机
    ///
    /// 无窗口模式下，`runtime.hold` 里的方向键在启动时即处于按下状态。
    pub fn new(config: Config, scene_config: SceneConfig) -> Result<Self> {
        let mut graph = SceneGraph::new();
        add_ground(&mut graph, &scene_config.ground)?;
        let rig = build_character(&mut graph, &scene_config.character)?;
        let context = FrameContext::new(rig, &graph, &config.motion);

        let aspect = config.window.width as f32 / config.window.height as f32;
        let mut camera = Camera::main_camera(aspect);
        let lens = &scene_config.camera;
        camera.set_lens(lens.fov_radians(), aspect, lens.near_clip, lens.far_clip);
        camera.set_position(lens.position_vector());
        camera.look_at(context.pose().position);

        let mut input = InputSystem::new(&config.controls);
        input.on_resize(config.window.width, config.window.height);
        if config.runtime.headless {
            for direction in config.held_directions() {
                input.hold(direction);
            }
        }

        info!(
            nodes = graph.len(),
            variant = ?scene_config.character.variant,
            mode = ?input.state().mode,
            "Scene ready"
        );

        Ok(Self {
            config,
            scene_config,
            graph,
            context,
            camera,
            input,
        })
    }

    /// 推进一帧（不含渲染）
    pub fn frame(&mut self) -> FrameReport {
        self.context.update(self.input.state(), &mut self.graph, &mut self.camera)
    }

    /// 窗口尺寸变化：更新相机宽高比和摇杆位置
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect(width as f32 / height as f32);
        self.input.on_resize(width, height);
        debug!(width, height, "Viewport resized");
    }

    pub fn render<R: FrameRenderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        renderer.render(&self.graph, &self.camera)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene_config(&self) -> &SceneConfig {
        &self.scene_config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn context(&self) -> &FrameContext {
        &self.context
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }
}

/// 帧循环的统计结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSummary {
    pub frames: u64,
    pub last: Option<FrameReport>,
}

/// 由调度器驱动的帧循环：每帧先更新再渲染
pub struct FrameLoop<'a> {
    app: &'a mut App,
}

impl<'a> FrameLoop<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// 运行直到调度器结束；渲染出错时立即返回错误
    pub fn run<S, R>(&mut self, scheduler: &mut S, renderer: &mut R) -> Result<LoopSummary>
    where
        S: FrameScheduler + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        let mut summary = LoopSummary { frames: 0, last: None };

        while let Some(tick) = scheduler.next_frame() {
            let report = self.app.frame();
            self.app.render(renderer)?;
            summary.frames += 1;
            summary.last = Some(report);

            if tick.index % 60 == 0 {
                debug!(
                    frame = tick.index,
                    elapsed_ms = tick.elapsed.as_millis() as u64,
                    x = report.pose.position.x,
                    z = report.pose.position.z,
                    "Frame loop"
                );
            }
        }

        info!(frames = summary.frames, "Frame loop finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runtime::{CancelToken, FixedRateScheduler};
    use crate::renderer::HeadlessRenderer;

    fn headless_config(hold: &str) -> Config {
        let mut config = Config::default();
        config.runtime.headless = true;
        config.runtime.hold = hold.to_string();
        config
    }

    #[test]
    fn test_new_places_camera_and_character() {
        let app = App::new(Config::default(), SceneConfig::default()).unwrap();
        let pose = app.context().pose();

        assert!((pose.position.y - 0.2).abs() < 1e-6);
        assert!((app.camera().position().y - 1.5).abs() < 1e-6);
        assert!(app.graph().find_by_name("Ground").is_some());
        assert!(!app.input().state().any_pressed());
    }

    #[test]
    fn test_hold_only_applies_headless() {
        let mut config = headless_config("d");
        config.runtime.headless = false;
        let app = App::new(config, SceneConfig::default()).unwrap();
        assert!(!app.input().state().any_pressed());

        let app = App::new(headless_config("d"), SceneConfig::default()).unwrap();
        assert!(app.input().state().any_pressed());
    }

    #[test]
    fn test_frame_loop_runs_requested_frames() {
        let mut app = App::new(headless_config("d"), SceneConfig::default()).unwrap();
        let mut scheduler = FixedRateScheduler::unthrottled(Some(20), CancelToken::new());
        let mut renderer = HeadlessRenderer::new(1280, 720);

        let summary = FrameLoop::new(&mut app).run(&mut scheduler, &mut renderer).unwrap();

        assert_eq!(summary.frames, 20);
        assert_eq!(renderer.frames_rendered(), 20);
        assert_eq!(app.context().frames(), 20);
        let last = summary.last.unwrap();
        assert!((last.pose.position.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut app = App::new(Config::default(), SceneConfig::default()).unwrap();
        let aspect = app.camera().aspect();
        app.resize(0, 100);
        assert_eq!(app.camera().aspect(), aspect);
        app.resize(800, 800);
        assert!((app.camera().aspect() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_directly_above_character() {
        let mut config = Config::default();
        config.motion.camera_offset = 0.0;
        config.validate().unwrap();

        let mut app = App::new(config, SceneConfig::default()).unwrap();
        app.frame();

        assert!(app.camera().orientation().coords.iter().all(|c| c.is_finite()));
        let tag = app.context().rig().name_tag.unwrap();
        let rotation = app.graph().node(tag).unwrap().transform.rotation;
        assert!(rotation.iter().all(|c| c.is_finite()));
        assert!(app.graph().world_rotation(tag).angle_to(&app.camera().orientation()) < 1e-3);
    }
}
