//! 配置管理模块
//!
//! 提供程序配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//! title = "WalkScene"
//! resizable = true
//!
//! [graphics]
//! vsync = true
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//!
//! [motion]
//! speed = 0.05
//! walk_step = 0.1
//! camera_height = 1.5
//! camera_offset = 5.0
//!
//! [controls]
//! initial_mode = "buttons"   # 或 "joystick"
//!
//! [runtime]
//! headless = false
//! target_fps = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use super::input::{ControlMode, Direction};

/// 程序配置
///
/// 包含了运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 角色运动与跟随相机参数
    #[serde(default)]
    pub motion: MotionConfig,

    /// 输入方式配置
    #[serde(default)]
    pub controls: ControlsConfig,

    /// 运行模式配置
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 垂直同步
    #[serde(default = "default_vsync")]
    pub vsync: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// 运动配置
///
/// 所有距离单位为世界单位，所有增量都是“每帧”的。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// 每帧移动距离
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 行走动画相位每帧增量
    #[serde(default = "default_walk_step")]
    pub walk_step: f32,

    /// 跟随相机高度
    #[serde(default = "default_camera_height")]
    pub camera_height: f32,

    /// 跟随相机在深度轴上的后退距离
    #[serde(default = "default_camera_offset")]
    pub camera_offset: f32,
}

/// 输入方式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// 启动时的输入方式
    #[serde(default = "default_control_mode")]
    pub initial_mode: ControlMode,

    /// 虚拟摇杆半径（像素）
    #[serde(default = "default_joystick_radius")]
    pub joystick_radius: f32,

    /// 摇杆旋钮半径（像素）
    #[serde(default = "default_knob_radius")]
    pub knob_radius: f32,

    /// 摇杆与窗口左下角的边距（像素）
    #[serde(default = "default_joystick_margin")]
    pub joystick_margin: f32,
}

/// 运行模式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// 无窗口运行（不创建图形设备）
    #[serde(default)]
    pub headless: bool,

    /// 最多运行的帧数，`None` 表示直到被取消
    #[serde(default)]
    pub max_frames: Option<u64>,

    /// 无窗口模式下的目标帧率
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,

    /// 无窗口模式下一直按住的方向键，例如 "wd"
    #[serde(default)]
    pub hold: String,
}

// 默认值函数
fn default_width() -> u32 { 1280 }
fn default_height() -> u32 { 720 }
fn default_title() -> String { "WalkScene".to_string() }
fn default_resizable() -> bool { true }
fn default_vsync() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "walk_scene.log".to_string() }
fn default_speed() -> f32 { 0.05 }
fn default_walk_step() -> f32 { 0.1 }
fn default_camera_height() -> f32 { 1.5 }
fn default_camera_offset() -> f32 { 5.0 }
fn default_control_mode() -> ControlMode { ControlMode::Buttons }
fn default_joystick_radius() -> f32 { 60.0 }
fn default_knob_radius() -> f32 { 25.0 }
fn default_joystick_margin() -> f32 { 40.0 }
fn default_target_fps() -> u32 { 60 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self { vsync: default_vsync() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            walk_step: default_walk_step(),
            camera_height: default_camera_height(),
            camera_offset: default_camera_offset(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            initial_mode: default_control_mode(),
            joystick_radius: default_joystick_radius(),
            knob_radius: default_knob_radius(),
            joystick_margin: default_joystick_margin(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            headless: false,
            max_frames: None,
            target_fps: default_target_fps(),
            hold: String::new(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--headless`: 不创建窗口，使用固定帧率调度器运行
    /// - `--frames <n>`: 运行 n 帧后退出
    /// - `--hold <keys>`: 无窗口模式下按住的方向键（w/a/s/d 组合）
    /// - `--joystick`: 以摇杆模式启动
    /// - `--width <value>` / `--height <value>`: 窗口尺寸
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--headless") {
            self.runtime.headless = true;
        }

        if args.iter().any(|a| a == "--joystick") {
            self.controls.initial_mode = ControlMode::Joystick;
        }

        if let Some(frames) = arg_value(&args, "--frames").and_then(|v| v.parse().ok()) {
            self.runtime.max_frames = Some(frames);
        }

        if let Some(keys) = arg_value(&args, "--hold") {
            self.runtime.hold = keys.to_lowercase();
        }

        if let Some(width) = arg_value(&args, "--width").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = arg_value(&args, "--height").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window.width/height", "Window dimensions must be greater than 0"));
        }

        if !(self.motion.speed.is_finite() && self.motion.speed > 0.0) {
            return Err(invalid("motion.speed", "Speed must be a positive number"));
        }

        if !(self.motion.walk_step.is_finite() && self.motion.walk_step > 0.0) {
            return Err(invalid("motion.walk_step", "Walk step must be a positive number"));
        }

        if !self.motion.camera_height.is_finite() || !self.motion.camera_offset.is_finite() {
            return Err(invalid("motion.camera_height/camera_offset", "Camera placement must be finite"));
        }

        if self.motion.camera_offset == 0.0 && self.motion.camera_height == 0.0 {
            return Err(invalid(
                "motion.camera_offset",
                "Camera would sit inside the character",
            ));
        }

        if self.controls.knob_radius < 0.0 || self.controls.joystick_radius <= self.controls.knob_radius {
            return Err(invalid(
                "controls.joystick_radius",
                "Joystick radius must be larger than the knob radius",
            ));
        }

        if self.runtime.target_fps == 0 {
            return Err(invalid("runtime.target_fps", "Target FPS must be greater than 0"));
        }

        if let Some(c) = self.runtime.hold.chars().find(|c| Direction::from_char(*c).is_none()) {
            return Err(invalid("runtime.hold", &format!("Unknown direction key '{}'", c)));
        }

        Ok(())
    }

    /// 解析 `runtime.hold` 中的方向键
    pub fn held_directions(&self) -> Vec<Direction> {
        self.runtime.hold.chars().filter_map(Direction::from_char).collect()
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn invalid(field: &str, reason: &str) -> super::error::WalkSceneError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
