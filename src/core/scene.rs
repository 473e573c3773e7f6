//! 场景配置模块
//!
//! 定义场景的静态参数：相机投影、背景色、地面、光照和角色外观。
//! 运动参数在 [`crate::core::config::MotionConfig`] 中。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use crate::core::error::{Result, WalkSceneError, ConfigError};
use crate::core::math::{Color, Vector3};

/// 角色模型变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterVariant {
    /// 完整角色：头发、五官、分段四肢、腰带和名牌
    #[default]
    Detailed,
    /// 简化角色：躯干、头部以及单段手臂和腿
    Simple,
}

/// 相机配置
///
/// 定义相机的初始位置和投影参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 初始位置 (x, y, z)
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],

    /// 垂直视野角度（度数）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.5, 5.0]
}

fn default_fov() -> f32 {
    75.0
}

fn default_near_clip() -> f32 {
    0.1
}

fn default_far_clip() -> f32 {
    1000.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            fov: default_fov(),
            near_clip: default_near_clip(),
            far_clip: default_far_clip(),
        }
    }
}

impl CameraConfig {
    /// 视野角度（弧度）
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    pub fn position_vector(&self) -> Vector3 {
        Vector3::from(self.position)
    }
}

/// 地面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    /// 地面边长
    #[serde(default = "default_ground_size")]
    pub size: f32,

    /// 地面颜色（0xRRGGBB）
    #[serde(default = "default_ground_color")]
    pub color: u32,
}

fn default_ground_size() -> f32 {
    50.0
}

fn default_ground_color() -> u32 {
    0x8cb369
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: default_ground_size(),
            color: default_ground_color(),
        }
    }
}

/// 光照配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingConfig {
    /// 环境光强度
    #[serde(default = "default_ambient")]
    pub ambient_intensity: f32,

    /// 方向光位置（光线从该点射向原点）
    #[serde(default = "default_sun_position")]
    pub sun_position: [f32; 3],

    /// 方向光强度
    #[serde(default = "default_sun_intensity")]
    pub sun_intensity: f32,

    /// 光源颜色（0xRRGGBB）
    #[serde(default = "default_light_color")]
    pub color: u32,
}

fn default_ambient() -> f32 {
    0.5
}

fn default_sun_position() -> [f32; 3] {
    [5.0, 10.0, 5.0]
}

fn default_sun_intensity() -> f32 {
    1.0
}

fn default_light_color() -> u32 {
    0xffffff
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: default_ambient(),
            sun_position: default_sun_position(),
            sun_intensity: default_sun_intensity(),
            color: default_light_color(),
        }
    }
}

/// 角色配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    /// 模型变体
    #[serde(default)]
    pub variant: CharacterVariant,

    /// 角色根节点离地高度
    #[serde(default = "default_ground_offset")]
    pub ground_offset: f32,

    /// 是否显示头顶名牌
    #[serde(default = "default_name_tag")]
    pub name_tag: bool,
}

fn default_ground_offset() -> f32 {
    0.2
}

fn default_name_tag() -> bool {
    true
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            variant: CharacterVariant::default(),
            ground_offset: default_ground_offset(),
            name_tag: default_name_tag(),
        }
    }
}

/// 场景配置
///
/// 包含场景中的所有静态元素配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 背景颜色（0xRRGGBB）
    #[serde(default = "default_clear_color")]
    pub clear_color: u32,

    /// 相机配置
    #[serde(default)]
    pub camera: CameraConfig,

    /// 地面配置
    #[serde(default)]
    pub ground: GroundConfig,

    /// 光照配置
    #[serde(default)]
    pub lighting: LightingConfig,

    /// 角色配置
    #[serde(default)]
    pub character: CharacterConfig,
}

fn default_clear_color() -> u32 {
    0x87ceeb
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: default_clear_color(),
            camera: CameraConfig::default(),
            ground: GroundConfig::default(),
            lighting: LightingConfig::default(),
            character: CharacterConfig::default(),
        }
    }
}

impl SceneConfig {
    /// 从文件加载场景配置
    ///
    /// # 参数
    ///
    /// - `path`: 配置文件路径
    ///
    /// # 返回
    ///
    /// - `Ok(SceneConfig)`: 加载成功
    /// - `Err(WalkSceneError)`: 加载失败
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| WalkSceneError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            ))))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| WalkSceneError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            ))))
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| WalkSceneError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            ))))?;

        fs::write(path, contents)
            .map_err(|e| WalkSceneError::Config(ConfigError::FileNotFound(format!(
                "Failed to write scene config to '{}': {}",
                path.display(),
                e
            ))))?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// - `--simple`: 使用简化角色
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if args.into_iter().any(|a| a.as_ref() == "--simple") {
            self.character.variant = CharacterVariant::Simple;
        }
    }

    pub fn clear_color(&self) -> Color {
        Color::from_hex(self.clear_color)
    }
}
