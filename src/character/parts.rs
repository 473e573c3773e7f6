//! 可动画部件
//!
//! 每个肢体用 [`Limb`] 作键，构建角色时记录对应的场景节点句柄。

use crate::scene::NodeId;

/// 可摆动的肢体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
}

impl Limb {
    pub const COUNT: usize = 12;

    pub const ALL: [Limb; Limb::COUNT] = [
        Limb::LeftUpperArm,
        Limb::RightUpperArm,
        Limb::LeftLowerArm,
        Limb::RightLowerArm,
        Limb::LeftHand,
        Limb::RightHand,
        Limb::LeftUpperLeg,
        Limb::RightUpperLeg,
        Limb::LeftLowerLeg,
        Limb::RightLowerLeg,
        Limb::LeftFoot,
        Limb::RightFoot,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    /// 场景节点名称
    pub fn node_name(self) -> &'static str {
        match self {
            Limb::LeftUpperArm => "LeftUpperArm",
            Limb::RightUpperArm => "RightUpperArm",
            Limb::LeftLowerArm => "LeftLowerArm",
            Limb::RightLowerArm => "RightLowerArm",
            Limb::LeftHand => "LeftHand",
            Limb::RightHand => "RightHand",
            Limb::LeftUpperLeg => "LeftUpperLeg",
            Limb::RightUpperLeg => "RightUpperLeg",
            Limb::LeftLowerLeg => "LeftLowerLeg",
            Limb::RightLowerLeg => "RightLowerLeg",
            Limb::LeftFoot => "LeftFoot",
            Limb::RightFoot => "RightFoot",
        }
    }
}

/// 肢体到场景节点的映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationParts {
    slots: [Option<NodeId>; Limb::COUNT],
}

impl AnimationParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, limb: Limb, node: NodeId) {
        self.slots[limb.slot()] = Some(node);
    }

    pub fn get(&self, limb: Limb) -> Option<NodeId> {
        self.slots[limb.slot()]
    }

    /// 已记录的 (肢体, 节点)
    pub fn iter(&self) -> impl Iterator<Item = (Limb, NodeId)> + '_ {
        Limb::ALL.iter().filter_map(move |&limb| self.get(limb).map(|id| (limb, id)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
