//! 行走动画
//!
//! 移动时相位按固定步长前进，每个肢体的 `rotation.x = sin(phase + offset) * amplitude`。
//! 静止时所有肢体的摆动归零，再恢复静止姿态的 `rotation.z` 倾斜。相位不会被重置。

use std::f32::consts::{FRAC_PI_4, PI};

use crate::character::{AnimationParts, Limb};
use crate::scene::SceneGraph;

/// 单个肢体的摆动参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbSwing {
    pub limb: Limb,
    pub offset: f32,
    pub amplitude: f32,
}

impl LimbSwing {
    pub const fn new(limb: Limb, offset: f32, amplitude: f32) -> Self {
        Self { limb, offset, amplitude }
    }

    #[inline]
    pub fn angle(&self, phase: f32) -> f32 {
        (phase + self.offset).sin() * self.amplitude
    }
}

/// 步态：摆动表和静止倾斜
#[derive(Debug, Clone, PartialEq)]
pub struct GaitProfile {
    pub swings: Vec<LimbSwing>,
    pub rest: Vec<(Limb, f32)>,
}

impl GaitProfile {
    /// 完整角色：十二个肢体，手臂与腿反相
    pub fn detailed() -> Self {
        use Limb::*;
        Self {
            swings: vec![
                LimbSwing::new(LeftUpperLeg, 0.0, 0.5),
                LimbSwing::new(RightUpperLeg, PI, 0.5),
                LimbSwing::new(LeftLowerLeg, FRAC_PI_4, 0.25),
                LimbSwing::new(RightLowerLeg, PI + FRAC_PI_4, 0.25),
                LimbSwing::new(LeftFoot, 0.0, 0.2),
                LimbSwing::new(RightFoot, PI, 0.2),
                LimbSwing::new(LeftUpperArm, PI, 0.5),
                LimbSwing::new(RightUpperArm, 0.0, 0.5),
                LimbSwing::new(LeftLowerArm, PI + FRAC_PI_4, 0.3),
                LimbSwing::new(RightLowerArm, FRAC_PI_4, 0.3),
                LimbSwing::new(LeftHand, PI, 0.2),
                LimbSwing::new(RightHand, 0.0, 0.2),
            ],
            rest: vec![
                (LeftUpperArm, PI / 16.0),
                (RightUpperArm, -PI / 16.0),
                (LeftLowerArm, PI / 8.0),
                (RightLowerArm, -PI / 8.0),
            ],
        }
    }

    /// 简化角色：只有上臂和大腿，没有静止倾斜
    pub fn simple() -> Self {
        use Limb::*;
        Self {
            swings: vec![
                LimbSwing::new(LeftUpperLeg, 0.0, 0.5),
                LimbSwing::new(RightUpperLeg, PI, 0.5),
                LimbSwing::new(LeftUpperArm, PI, 0.5),
                LimbSwing::new(RightUpperArm, 0.0, 0.5),
            ],
            rest: Vec::new(),
        }
    }

    pub fn swing(&self, limb: Limb) -> Option<&LimbSwing> {
        self.swings.iter().find(|s| s.limb == limb)
    }

    /// 静止姿态的 z 轴倾斜，未列出的肢体为 0
    pub fn rest_tilt(&self, limb: Limb) -> f32 {
        self.rest
            .iter()
            .find(|(l, _)| *l == limb)
            .map(|(_, tilt)| *tilt)
            .unwrap_or(0.0)
    }
}

/// 行走相位
#[derive(Debug, Clone, PartialEq)]
pub struct WalkCycle {
    phase: f32,
    step: f32,
}

impl WalkCycle {
    pub fn new(step: f32) -> Self {
        Self { phase: 0.0, step }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// 推进一帧
    ///
    /// 记录中缺失的肢体或已不在场景图里的节点会被跳过。
    pub fn advance(&mut self, moving: bool, parts: &AnimationParts, graph: &mut SceneGraph, gait: &GaitProfile) {
        if moving {
            self.phase += self.step;
            for swing in &gait.swings {
                if let Some(transform) = parts.get(swing.limb).and_then(|id| graph.transform_mut(id)) {
                    transform.rotation.x = swing.angle(self.phase);
                }
            }
        } else {
            for (_, id) in parts.iter() {
                if let Some(transform) = graph.transform_mut(id) {
                    transform.rotation.x = 0.0;
                }
            }
            for &(limb, tilt) in &gait.rest {
                if let Some(transform) = parts.get(limb).and_then(|id| graph.transform_mut(id)) {
                    transform.rotation.z = tilt;
                }
            }
        }
    }
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self::new(0.1)
    }
}
