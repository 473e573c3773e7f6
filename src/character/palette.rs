//! 角色配色

pub const SKIN: u32 = 0xffcba4;
pub const SHIRT: u32 = 0x3498db;
pub const PANTS: u32 = 0x34495e;
pub const SHOE: u32 = 0x222222;
pub const HAIR: u32 = 0x8b4513;
pub const BROWN: u32 = 0x5d4037;
pub const BUCKLE: u32 = 0xd4af37;
pub const MOUTH: u32 = 0x994444;
pub const EYE_WHITE: u32 = 0xffffff;
pub const PUPIL: u32 = 0x000000;
pub const BUTTON: u32 = 0xffffff;
pub const NAME_TAG: u32 = 0xffffff;
