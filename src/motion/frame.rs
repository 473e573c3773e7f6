//! 每帧更新
//!
//! [`FrameContext`] 持有跨帧状态（角色位姿、行走相位、跟随相机参数和角色句柄），
//! 每帧依次：计算速度、移动并转向、推进行走动画、放置相机、让公告板朝向相机。

use tracing::trace;

use super::follow_camera::FollowCamera;
use super::velocity::{compute_velocity, Velocity};
use super::walk_cycle::WalkCycle;
use crate::character::CharacterRig;
use crate::component::Camera;
use crate::core::config::MotionConfig;
use crate::core::input::InputState;
use crate::core::math::Vector3;
use crate::scene::SceneGraph;

/// 角色根节点的位置和偏航角
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterPose {
    pub position: Vector3,
    pub yaw: f32,
}

impl CharacterPose {
    pub fn new(position: Vector3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// 按速度移动；有速度时面向运动方向，否则保持原朝向
    pub fn apply(&mut self, velocity: Velocity) {
        self.position.x += velocity.x;
        self.position.z += velocity.z;
        if let Some(heading) = velocity.heading() {
            self.yaw = heading;
        }
    }
}

/// 让所有公告板节点的世界朝向与相机一致
///
/// 返回处理的节点数。
pub fn orient_billboards(graph: &mut SceneGraph, camera: &Camera) -> usize {
    let target = camera.orientation();
    let billboards = graph.billboards();
    for &id in &billboards {
        let local = graph.parent_world_rotation(id).inverse() * target;
        if let Some(transform) = graph.transform_mut(id) {
            transform.set_quaternion(&local);
        }
    }
    billboards.len()
}

/// 一帧更新后的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub velocity: Velocity,
    pub pose: CharacterPose,
    pub phase: f32,
    pub camera_position: Vector3,
}

impl FrameReport {
    pub fn moving(&self) -> bool {
        !self.velocity.is_zero()
    }
}

/// 跨帧状态
#[derive(Debug, Clone)]
pub struct FrameContext {
    pose: CharacterPose,
    walk: WalkCycle,
    follow: FollowCamera,
    rig: CharacterRig,
    speed: f32,
    frame: u64,
}

impl FrameContext {
    /// 以角色根节点当前位置为起点创建
    pub fn new(rig: CharacterRig, graph: &SceneGraph, motion: &MotionConfig) -> Self {
        let start = graph
            .node(rig.root)
            .map(|n| n.transform.position)
            .unwrap_or_else(Vector3::zeros);

        Self {
            pose: CharacterPose::new(start),
            walk: WalkCycle::new(motion.walk_step),
            follow: FollowCamera::from_config(motion),
            rig,
            speed: motion.speed,
            frame: 0,
        }
    }

    pub fn pose(&self) -> &CharacterPose {
        &self.pose
    }

    pub fn walk_cycle(&self) -> &WalkCycle {
        &self.walk
    }

    pub fn rig(&self) -> &CharacterRig {
        &self.rig
    }

    pub fn follow_camera(&self) -> &FollowCamera {
        &self.follow
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// 执行一帧更新（不含渲染）
    pub fn update(&mut self, input: &InputState, graph: &mut SceneGraph, camera: &mut Camera) -> FrameReport {
        let velocity = compute_velocity(input, self.speed);
        self.pose.apply(velocity);

        if let Some(root) = graph.transform_mut(self.rig.root) {
            root.position = self.pose.position;
            root.rotation.y = self.pose.yaw;
        }

        self.walk.advance(!velocity.is_zero(), &self.rig.parts, graph, &self.rig.gait);
        self.follow.follow(camera, self.pose.position);
        orient_billboards(graph, camera);

        let report = FrameReport {
            frame: self.frame,
            velocity,
            pose: self.pose,
            phase: self.walk.phase(),
            camera_position: camera.position(),
        };
        self.frame += 1;

        trace!(
            frame = report.frame,
            x = report.pose.position.x,
            z = report.pose.position.z,
            yaw = report.pose.yaw,
            phase = report.phase,
            "Frame updated"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::build_character;
    use crate::core::input::{ControlMode, Direction};
    use crate::core::scene::CharacterConfig;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn setup() -> (SceneGraph, FrameContext, Camera) {
        let mut graph = SceneGraph::new();
        let rig = build_character(&mut graph, &CharacterConfig::default()).unwrap();
        let context = FrameContext::new(rig, &graph, &MotionConfig::default());
        (graph, context, Camera::main_camera(16.0 / 9.0))
    }

    #[test]
    fn test_pose_keeps_yaw_when_still() {
        let mut pose = CharacterPose::new(Vector3::zeros());
        pose.apply(Velocity::new(0.05, 0.0));
        assert!((pose.yaw - FRAC_PI_2).abs() < 1e-6);
        pose.apply(Velocity::ZERO);
        assert!((pose.yaw - FRAC_PI_2).abs() < 1e-6);
        assert!((pose.position.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_update_moves_root_and_camera() {
        let (mut graph, mut context, mut camera) = setup();
        let mut input = InputState::new(ControlMode::Buttons);
        input.set_pressed(Direction::Back, true);

        let report = context.update(&input, &mut graph, &mut camera);

        let root = graph.node(context.rig().root).unwrap();
        assert!((root.transform.position.z - 0.05).abs() < 1e-6);
        assert!((root.transform.position.y - 0.2).abs() < 1e-6);
        assert_eq!(root.transform.rotation.y, 0.0);
        assert!((report.camera_position - Vector3::new(0.0, 1.5, 5.05)).norm() < 1e-5);
        assert!(report.moving());
        assert_eq!(context.frames(), 1);
    }

    #[test]
    fn test_billboard_matches_camera_after_turning() {
        let (mut graph, mut context, mut camera) = setup();
        let mut input = InputState::new(ControlMode::Buttons);
        input.set_pressed(Direction::Left, true);

        for _ in 0..3 {
            context.update(&input, &mut graph, &mut camera);
        }

        assert!((context.pose().yaw + FRAC_PI_2).abs() < 1e-6);
        let tag = context.rig().name_tag.unwrap();
        assert!(graph.world_rotation(tag).angle_to(&camera.orientation()) < 1e-4);
    }

    #[test]
    fn test_forward_faces_away_from_camera() {
        let (mut graph, mut context, mut camera) = setup();
        let mut input = InputState::new(ControlMode::Buttons);
        input.set_pressed(Direction::Forward, true);

        let report = context.update(&input, &mut graph, &mut camera);
        assert!((report.pose.yaw.abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_orient_billboards_without_billboards() {
        let mut graph = SceneGraph::new();
        let camera = Camera::main_camera(1.0);
        assert_eq!(orient_billboards(&mut graph, &camera), 0);
    }
}
