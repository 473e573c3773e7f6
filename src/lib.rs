//! WalkScene - 第三人称行走角色演示
//!
//! 一个程序化构建的人形角色站在地面上，玩家用方向键或虚拟摇杆控制它行走，
//! 相机始终跟在角色身后。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、输入、帧调度、错误处理）
//! - `component`: 变换、相机、光源
//! - `geometry`: 网格数据和基础几何体（盒子、球、圆柱、圆锥、平面）
//! - `scene`: 场景图（层级节点、网格表、材质表）和地面
//! - `character`: 角色构建
//! - `motion`: 速度、行走动画、跟随相机、公告板和每帧更新
//! - `renderer`: 统一渲染接口、世界空间合批和无窗口渲染器
//! - `gfx`: wgpu 窗口渲染
//! - `app`: 应用状态与帧循环
//!
//! # 使用示例
//!
//! ```no_run
//! use walk_scene::app::{App, FrameLoop};
//! use walk_scene::core::{CancelToken, Config, FixedRateScheduler, SceneConfig};
//! use walk_scene::renderer::HeadlessRenderer;
//!
//! let mut config = Config::default();
//! config.runtime.headless = true;
//! config.runtime.hold = "w".to_string();
//!
//! let mut app = App::new(config, SceneConfig::default()).unwrap();
//! let mut scheduler = FixedRateScheduler::unthrottled(Some(10), CancelToken::new());
//! let mut renderer = HeadlessRenderer::new(1280, 720);
//! let summary = FrameLoop::new(&mut app).run(&mut scheduler, &mut renderer).unwrap();
//! assert_eq!(summary.frames, 10);
//! ```

pub mod core;
pub mod component;
pub mod geometry;
pub mod scene;
pub mod character;
pub mod motion;
pub mod renderer;
pub mod gfx;
pub mod app;
