//! WalkScene - 第三人称行走角色演示
//!
//! # 使用方法
//!
//! ```bash
//! # 窗口模式（WASD / 方向键行走，Tab 切换摇杆，Esc 退出）
//! cargo run
//!
//! # 简化角色
//! cargo run -- --simple
//!
//! # 无窗口：按住 W 和 D 运行 300 帧
//! cargo run -- --headless --frames 300 --hold wd
//! ```
//!
//! # 初始化流程
//!
//! 1. 加载程序配置文件（config.toml）和场景配置文件（scene.toml）
//! 2. 应用命令行参数覆盖并验证
//! 3. 初始化日志系统
//! 4. 构建场景，进入窗口或无窗口帧循环

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};

use walk_scene::app::{App, FrameLoop};
use walk_scene::core::{log, CancelToken, Config, FixedRateScheduler, FpsCounter, SceneConfig};
use walk_scene::gfx::wgpu::Renderer;
use walk_scene::renderer::{FrameRenderer, HeadlessRenderer};

fn main() -> Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    let mut scene = SceneConfig::from_file_or_default("scene.toml");

    // 2. 应用命令行参数
    let args: Vec<String> = std::env::args().collect();
    config.apply_args(&args);
    scene.apply_args(&args);

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = config.logging.file_output.then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "WalkScene starting...");

    info!(
        width = config.window.width,
        height = config.window.height,
        headless = config.runtime.headless,
        max_frames = ?config.runtime.max_frames,
        "Runtime configuration"
    );

    if config.runtime.headless {
        run_headless(config, scene)
    } else {
        run_windowed(config, scene)
    }
}

/// 无窗口模式：按固定帧率运行，不创建图形设备
fn run_headless(config: Config, scene: SceneConfig) -> Result<()> {
    let mut scheduler = FixedRateScheduler::new(
        config.runtime.target_fps,
        config.runtime.max_frames,
        CancelToken::new(),
    );
    let mut renderer = HeadlessRenderer::new(config.window.width, config.window.height);
    let mut app = App::new(config, scene).context("Failed to build scene")?;

    let summary = FrameLoop::new(&mut app).run(&mut scheduler, &mut renderer)?;
    if let Some(last) = summary.last {
        info!(
            frames = summary.frames,
            x = last.pose.position.x,
            z = last.pose.position.z,
            yaw = last.pose.yaw,
            "Headless run finished"
        );
    }
    Ok(())
}

/// 窗口模式：winit 事件循环驱动帧
fn run_windowed(config: Config, scene: SceneConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut renderer = Renderer::new(&event_loop, &config, &scene).context("Failed to create renderer")?;
    let mut app = App::new(config, scene).context("Failed to build scene")?;
    let size = renderer.window().inner_size();
    app.resize(size.width, size.height);

    let mut fps = FpsCounter::new();
    info!("Entering main loop");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            WindowEvent::Resized(new_size) => {
                debug!(width = new_size.width, height = new_size.height, "Window resized");
                renderer.resize(new_size.width, new_size.height);
                app.resize(new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => {
                app.input_mut().reset();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    elwt.exit();
                } else {
                    app.input_mut().on_keyboard_input(code, state, repeat);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.input_mut().on_cursor_moved((position.x, position.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                app.input_mut().on_mouse_button(button, state);
            }
            WindowEvent::Touch(touch) => {
                app.input_mut()
                    .on_touch(touch.id, touch.phase, (touch.location.x, touch.location.y));
            }
            WindowEvent::RedrawRequested => {
                app.frame();
                if let Err(e) = app.render(&mut renderer) {
                    error!("Draw failed: {}", e);
                    elwt.exit();
                    return;
                }
                if let Some(value) = fps.update() {
                    info!(fps = value, frames = renderer.frames_rendered(), "FPS");
                }
            }
            _ => (),
        },
        Event::AboutToWait => {
            renderer.window().request_redraw();
        }
        _ => (),
    })?;

    Ok(())
}
