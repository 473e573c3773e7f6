//! 组件模块
//!
//! 提供 Transform、Camera、Light 等场景组件。

mod component;
mod transform;
mod camera;
mod light;

pub use component::Component;
pub use transform::Transform;
pub use camera::Camera;
pub use light::{Light, LightType, AmbientLight, DirectionalLight};
