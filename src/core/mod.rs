//! 核心功能模块
//!
//! 本模块提供程序的基础功能，包括数学库、日志系统、配置管理、输入状态和错误处理。
//! 这些模块独立于具体的图形 API。
//!
//! # 模块组织
//!
//! - `math`：数学库，提供向量、矩阵、四元数等常用数学类型
//! - `log`：日志系统，基于 tracing 的结构化日志
//! - `config`：程序配置，支持配置文件和命令行参数
//! - `scene`：场景配置（相机、地面、光照、角色外观）
//! - `input`：键盘、鼠标和触摸输入的状态，以及虚拟摇杆
//! - `runtime`：帧调度和取消信号
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod scene;
pub mod input;
pub mod runtime;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Vector2, Vector3, Vector4, Matrix4, Quaternion, Color};
pub use error::{Result, WalkSceneError};
pub use config::Config;
pub use scene::{SceneConfig, CharacterVariant};
pub use input::{ControlMode, Direction, InputState, InputSystem};
pub use runtime::{CancelToken, FrameScheduler, FrameTick, FixedRateScheduler, FpsCounter};
