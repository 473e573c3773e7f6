//! 错误处理模块
//!
//! 定义了场景程序中使用的统一错误类型。
//!
//! 每帧的运动更新本身不会失败，错误只出现在边界处：
//! 配置文件读取、几何体参数校验、图形设备创建和日志初始化。

use std::fmt;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, WalkSceneError>;

/// WalkScene 的错误类型
#[derive(Debug)]
pub enum WalkSceneError {
    /// 配置错误
    Config(ConfigError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// 几何体生成错误
    Geometry(GeometryError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),

    /// 初始化错误
    Initialization(String),

    /// 运行时错误
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 窗口或设备创建失败
    DeviceCreation(String),

    /// 交换链错误
    SwapchainError(String),

    /// 资源创建失败
    ResourceCreation(String),
}

/// 几何体生成相关的错误
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// 参数无效（尺寸非正、分段数为零等）
    InvalidParameter { primitive: &'static str, reason: String },

    /// 索引超出 u32 范围
    TooManyVertices(usize),
}

impl fmt::Display for WalkSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkSceneError::Config(e) => write!(f, "Configuration error: {}", e),
            WalkSceneError::Graphics(e) => write!(f, "Graphics error: {}", e),
            WalkSceneError::Geometry(e) => write!(f, "Geometry error: {}", e),
            WalkSceneError::Io(e) => write!(f, "IO error: {}", e),
            WalkSceneError::Log(msg) => write!(f, "Log error: {}", msg),
            WalkSceneError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            WalkSceneError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SwapchainError(msg) => write!(f, "Swapchain error: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidParameter { primitive, reason } => {
                write!(f, "Invalid {} parameter: {}", primitive, reason)
            }
            GeometryError::TooManyVertices(count) => {
                write!(f, "Mesh has {} vertices, more than a u32 index can address", count)
            }
        }
    }
}

impl std::error::Error for WalkSceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WalkSceneError::Io(e) => Some(e),
            WalkSceneError::Config(e) => Some(e),
            WalkSceneError::Graphics(e) => Some(e),
            WalkSceneError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for GeometryError {}

impl From<std::io::Error> for WalkSceneError {
    fn from(err: std::io::Error) -> Self {
        WalkSceneError::Io(err)
    }
}

impl From<ConfigError> for WalkSceneError {
    fn from(err: ConfigError) -> Self {
        WalkSceneError::Config(err)
    }
}

impl From<GraphicsError> for WalkSceneError {
    fn from(err: GraphicsError) -> Self {
        WalkSceneError::Graphics(err)
    }
}

impl From<GeometryError> for WalkSceneError {
    fn from(err: GeometryError) -> Self {
        WalkSceneError::Geometry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nests_inner_message() {
        let err: WalkSceneError = ConfigError::InvalidValue {
            field: "motion.speed".to_string(),
            reason: "must be positive".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for 'motion.speed': must be positive"
        );
    }

    #[test]
    fn test_geometry_error_has_source() {
        use std::error::Error;
        let err: WalkSceneError = GeometryError::TooManyVertices(5).into();
        assert!(err.source().is_some());
    }
}
