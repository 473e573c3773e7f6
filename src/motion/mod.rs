//! 运动模块
//!
//! 速度计算、角色位姿、行走动画、跟随相机和公告板朝向。

mod velocity;
mod walk_cycle;
mod follow_camera;
mod frame;

pub use velocity::{compute_velocity, Velocity};
pub use walk_cycle::{GaitProfile, LimbSwing, WalkCycle};
pub use follow_camera::FollowCamera;
pub use frame::{orient_billboards, CharacterPose, FrameContext, FrameReport};
