//! 角色模块
//!
//! 程序化构建的人形角色：完整版（分段四肢、五官、腰带、名牌）和简化版。
//! 构建结果 [`CharacterRig`] 以 [`Limb`] 为键保存可动画部件的句柄。

mod builder;
mod palette;
mod parts;

pub use builder::{build_character, CharacterRig};
pub use parts::{AnimationParts, Limb};
pub use crate::core::scene::CharacterVariant;
