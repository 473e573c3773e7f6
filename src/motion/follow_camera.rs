//! 跟随相机

use crate::component::Camera;
use crate::core::config::MotionConfig;
use crate::core::math::Vector3;

/// 相机固定在角色后上方：`(x, height, z + offset)`，并看向角色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    pub height: f32,
    pub offset: f32,
}

impl FollowCamera {
    pub fn new(height: f32, offset: f32) -> Self {
        Self { height, offset }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.camera_height, config.camera_offset)
    }

    /// 目标位置对应的相机位置
    pub fn eye_for(&self, target: Vector3) -> Vector3 {
        Vector3::new(target.x, self.height, target.z + self.offset)
    }

    pub fn follow(&self, camera: &mut Camera, target: Vector3) {
        camera.set_position(self.eye_for(target));
        camera.look_at(target);
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(1.5, 5.0)
    }
}
