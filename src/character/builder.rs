//! 角色构建
//!
//! 把角色的各个部件作为子节点挂到一个根节点下。所有部件直接挂在根节点上，
//! 肢体绕自身中心旋转。

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_8, PI};

use tracing::{debug, info};

use super::palette;
use super::parts::{AnimationParts, Limb};
use crate::component::Transform;
use crate::core::error::Result;
use crate::core::math::Vector3;
use crate::core::scene::{CharacterConfig, CharacterVariant};
use crate::geometry::{create_box, create_cone, create_cylinder, create_sphere, CylinderOptions, SphereOptions};
use crate::motion::GaitProfile;
use crate::scene::{MaterialId, MeshId, NodeId, SceneGraph, Material};

/// 构建完成的角色
#[derive(Debug, Clone)]
pub struct CharacterRig {
    /// 根节点，承载位置和朝向
    pub root: NodeId,
    pub parts: AnimationParts,
    /// 头顶名牌（公告板）
    pub name_tag: Option<NodeId>,
    pub gait: GaitProfile,
    pub variant: CharacterVariant,
}

/// 在场景图中构建角色
pub fn build_character(graph: &mut SceneGraph, settings: &CharacterConfig) -> Result<CharacterRig> {
    let gait = match settings.variant {
        CharacterVariant::Detailed => GaitProfile::detailed(),
        CharacterVariant::Simple => GaitProfile::simple(),
    };

    let root = graph.add_node("Character", Transform::at(0.0, settings.ground_offset, 0.0));
    let mut builder = RigBuilder::new(graph, root, &gait);

    match settings.variant {
        CharacterVariant::Detailed => build_detailed(&mut builder)?,
        CharacterVariant::Simple => build_simple(&mut builder)?,
    }

    let name_tag = if settings.name_tag {
        Some(builder.name_tag()?)
    } else {
        None
    };

    let parts = builder.parts;
    info!(
        variant = ?settings.variant,
        limbs = parts.len(),
        nodes = graph.len(),
        "Character built"
    );

    Ok(CharacterRig {
        root,
        parts,
        name_tag,
        gait,
        variant: settings.variant,
    })
}

struct RigBuilder<'a> {
    graph: &'a mut SceneGraph,
    root: NodeId,
    gait: &'a GaitProfile,
    materials: HashMap<&'static str, MaterialId>,
    parts: AnimationParts,
}

impl<'a> RigBuilder<'a> {
    fn new(graph: &'a mut SceneGraph, root: NodeId, gait: &'a GaitProfile) -> Self {
        Self {
            graph,
            root,
            gait,
            materials: HashMap::new(),
            parts: AnimationParts::new(),
        }
    }

    fn material(&mut self, name: &'static str, hex: u32) -> MaterialId {
        if let Some(&id) = self.materials.get(name) {
            return id;
        }
        let id = self.graph.add_material(Material::from_hex(name, hex));
        self.materials.insert(name, id);
        id
    }

    fn part(&mut self, name: &str, mesh: MeshId, material: MaterialId, transform: Transform) -> Result<NodeId> {
        debug!(part = name, "Adding character part");
        self.graph.add_drawable(self.root, name, transform, mesh, material)
    }

    /// 添加一个肢体，并应用步态中的静止倾斜
    fn limb(&mut self, limb: Limb, mesh: MeshId, material: MaterialId, mut transform: Transform) -> Result<NodeId> {
        transform.rotation.z = self.gait.rest_tilt(limb);
        let id = self.part(limb.node_name(), mesh, material, transform)?;
        self.parts.insert(limb, id);
        Ok(id)
    }

    fn name_tag(&mut self) -> Result<NodeId> {
        let mesh = self.graph.add_mesh(create_box(0.7, 0.14, 0.01)?);
        let material = self.material("NameTag", palette::NAME_TAG);
        let id = self.part("NameTag", mesh, material, Transform::at(0.0, 1.8, 0.0))?;
        if let Some(node) = self.graph.node_mut(id) {
            node.billboard = true;
        }
        Ok(id)
    }
}

fn build_detailed(b: &mut RigBuilder<'_>) -> Result<()> {
    let skin = b.material("Skin", palette::SKIN);
    let shirt = b.material("Shirt", palette::SHIRT);
    let pants = b.material("Pants", palette::PANTS);
    let shoe = b.material("Shoe", palette::SHOE);
    let hair = b.material("Hair", palette::HAIR);
    let brown = b.material("Brown", palette::BROWN);
    let buckle = b.material("Buckle", palette::BUCKLE);
    let mouth = b.material("Mouth", palette::MOUTH);
    let eye_white = b.material("EyeWhite", palette::EYE_WHITE);
    let pupil = b.material("Pupil", palette::PUPIL);
    let button = b.material("Button", palette::BUTTON);

    // 头部
    let head = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.25).segments(32, 32))?);
    b.part("Head", head, skin, Transform::at(0.0, 1.4, 0.0))?;

    let nose = b.graph.add_mesh(create_cone(0.05, 0.1, 8)?);
    b.part(
        "Nose",
        nose,
        skin,
        Transform::at(0.0, 1.4, 0.24).with_rotation(-FRAC_PI_2, 0.0, 0.0).with_scale(0.8, 1.0, 0.8),
    )?;

    let ear = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.05).segments(8, 8).phi(0.0, PI))?);
    b.part("LeftEar", ear, skin, Transform::at(-0.25, 1.4, 0.0).with_rotation(0.0, -FRAC_PI_2, 0.0))?;
    b.part("RightEar", ear, skin, Transform::at(0.25, 1.4, 0.0).with_rotation(0.0, FRAC_PI_2, 0.0))?;

    // 头发
    let hair_top = b.graph.add_mesh(create_box(0.4, 0.1, 0.35)?);
    b.part("HairTop", hair_top, hair, Transform::at(0.0, 1.58, 0.0))?;
    let side_hair = b.graph.add_mesh(create_box(0.05, 0.15, 0.2)?);
    b.part("LeftSideHair", side_hair, hair, Transform::at(-0.21, 1.45, 0.0))?;
    b.part("RightSideHair", side_hair, hair, Transform::at(0.21, 1.45, 0.0))?;
    let back_hair = b.graph.add_mesh(create_box(0.35, 0.2, 0.07)?);
    b.part("BackHair", back_hair, hair, Transform::at(0.0, 1.4, -0.18))?;

    // 眼睛
    let eye = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.05).segments(16, 16))?);
    let eyelid = b.graph.add_mesh(create_sphere(
        SphereOptions::with_radius(0.055).segments(16, 16).theta(0.0, FRAC_PI_2),
    )?);
    let pupil_mesh = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.02).segments(16, 16))?);
    let eyebrow = b.graph.add_mesh(create_box(0.08, 0.02, 0.02)?);

    for (side, x) in [("Left", -0.1), ("Right", 0.1)] {
        b.part(&format!("{}Eye", side), eye, eye_white, Transform::at(x, 1.4, 0.21))?;
        b.part(
            &format!("{}Eyelid", side),
            eyelid,
            skin,
            Transform::at(x, 1.42, 0.21).with_rotation(FRAC_PI_8, 0.0, 0.0),
        )?;
        b.part(&format!("{}Pupil", side), pupil_mesh, pupil, Transform::at(x, 1.4, 0.25))?;
        b.part(
            &format!("{}Eyebrow", side),
            eyebrow,
            brown,
            Transform::at(x, 1.48, 0.23).with_rotation(-FRAC_PI_8, 0.0, 0.0),
        )?;
    }

    let mouth_mesh = b.graph.add_mesh(create_box(0.1, 0.02, 0.01)?);
    b.part("Mouth", mouth_mesh, mouth, Transform::at(0.0, 1.32, 0.24))?;

    // 躯干
    let neck = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.07, 0.07, 0.1).radial_segments(16))?);
    b.part("Neck", neck, skin, Transform::at(0.0, 1.25, 0.0))?;

    let collar = b.graph.add_mesh(create_cylinder(
        CylinderOptions::new(0.12, 0.12, 0.05).radial_segments(16).open_ended(true),
    )?);
    b.part("Collar", collar, shirt, Transform::at(0.0, 1.25, 0.0))?;

    let button_mesh = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.02, 0.02, 0.02).radial_segments(8))?);
    for i in 0..3 {
        b.part(
            &format!("Button{}", i),
            button_mesh,
            button,
            Transform::at(0.0, 1.1 - i as f32 * 0.15, 0.13).with_rotation(FRAC_PI_2, 0.0, 0.0),
        )?;
    }

    let torso = b.graph.add_mesh(create_box(0.5, 0.6, 0.25)?);
    b.part("Torso", torso, shirt, Transform::at(0.0, 1.0, 0.0))?;

    // 手臂
    let upper_arm = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.08, 0.07, 0.3).radial_segments(16))?);
    let lower_arm = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.07, 0.06, 0.3).radial_segments(16))?);
    let hand = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.07).segments(16, 16))?);

    b.limb(Limb::LeftUpperArm, upper_arm, shirt, Transform::at(-0.3, 1.15, 0.0))?;
    b.limb(Limb::RightUpperArm, upper_arm, shirt, Transform::at(0.3, 1.15, 0.0))?;
    b.limb(Limb::LeftLowerArm, lower_arm, skin, Transform::at(-0.35, 0.9, 0.0))?;
    b.limb(Limb::RightLowerArm, lower_arm, skin, Transform::at(0.35, 0.9, 0.0))?;
    b.limb(Limb::LeftHand, hand, skin, Transform::at(-0.4, 0.72, 0.0).with_scale(1.0, 0.8, 0.6))?;
    b.limb(Limb::RightHand, hand, skin, Transform::at(0.4, 0.72, 0.0).with_scale(1.0, 0.8, 0.6))?;

    // 腿
    let upper_leg = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.09, 0.08, 0.3).radial_segments(16))?);
    let lower_leg = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.08, 0.07, 0.3).radial_segments(16))?);
    // 鞋的几何中心下移并前移，旋转时脚尖摆动
    let foot = b.graph.add_mesh(create_box(0.12, 0.1, 0.25)?.translated(Vector3::new(0.0, -0.1, 0.1)));

    b.limb(Limb::LeftUpperLeg, upper_leg, pants, Transform::at(-0.15, 0.65, 0.0))?;
    b.limb(Limb::RightUpperLeg, upper_leg, pants, Transform::at(0.15, 0.65, 0.0))?;
    b.limb(Limb::LeftLowerLeg, lower_leg, pants, Transform::at(-0.15, 0.35, 0.0))?;
    b.limb(Limb::RightLowerLeg, lower_leg, pants, Transform::at(0.15, 0.35, 0.0))?;
    b.limb(Limb::LeftFoot, foot, shoe, Transform::at(-0.15, 0.15, 0.05))?;
    b.limb(Limb::RightFoot, foot, shoe, Transform::at(0.15, 0.15, 0.05))?;

    // 腰带
    let belt = b.graph.add_mesh(create_box(0.52, 0.05, 0.27)?);
    b.part("Belt", belt, brown, Transform::at(0.0, 0.8, 0.0))?;
    let buckle_mesh = b.graph.add_mesh(create_box(0.08, 0.03, 0.28)?);
    b.part("Buckle", buckle_mesh, buckle, Transform::at(0.0, 0.8, 0.01))?;

    Ok(())
}

fn build_simple(b: &mut RigBuilder<'_>) -> Result<()> {
    let skin = b.material("Skin", palette::SKIN);
    let shirt = b.material("Shirt", palette::SHIRT);
    let pants = b.material("Pants", palette::PANTS);

    let head = b.graph.add_mesh(create_sphere(SphereOptions::with_radius(0.25).segments(16, 16))?);
    b.part("Head", head, skin, Transform::at(0.0, 1.4, 0.0))?;

    let torso = b.graph.add_mesh(create_box(0.5, 0.6, 0.25)?);
    b.part("Torso", torso, shirt, Transform::at(0.0, 1.0, 0.0))?;

    let arm = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.08, 0.07, 0.6).radial_segments(12))?);
    b.limb(Limb::LeftUpperArm, arm, shirt, Transform::at(-0.32, 0.95, 0.0))?;
    b.limb(Limb::RightUpperArm, arm, shirt, Transform::at(0.32, 0.95, 0.0))?;

    let leg = b.graph.add_mesh(create_cylinder(CylinderOptions::new(0.09, 0.08, 0.7).radial_segments(12))?);
    b.limb(Limb::LeftUpperLeg, leg, pants, Transform::at(-0.15, 0.35, 0.0))?;
    b.limb(Limb::RightUpperLeg, leg, pants, Transform::at(0.15, 0.35, 0.0))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(variant: CharacterVariant, name_tag: bool) -> (SceneGraph, CharacterRig) {
        let mut graph = SceneGraph::new();
        let settings = CharacterConfig {
            variant,
            name_tag,
            ..CharacterConfig::default()
        };
        let rig = build_character(&mut graph, &settings).unwrap();
        (graph, rig)
    }

    #[test]
    fn test_detailed_rig_tracks_all_limbs() {
        let (graph, rig) = build(CharacterVariant::Detailed, true);

        assert_eq!(rig.parts.len(), Limb::COUNT);
        for (limb, id) in rig.parts.iter() {
            let node = graph.node(id).unwrap();
            assert_eq!(node.name(), limb.node_name());
            assert_eq!(node.parent(), Some(rig.root));
        }
    }

    #[test]
    fn test_detailed_rest_tilts_applied() {
        let (graph, rig) = build(CharacterVariant::Detailed, false);
        let tilt = |limb| graph.node(rig.parts.get(limb).unwrap()).unwrap().transform.rotation.z;

        assert!((tilt(Limb::LeftUpperArm) - PI / 16.0).abs() < 1e-6);
        assert!((tilt(Limb::RightUpperArm) + PI / 16.0).abs() < 1e-6);
        assert!((tilt(Limb::LeftLowerArm) - PI / 8.0).abs() < 1e-6);
        assert!((tilt(Limb::RightLowerArm) + PI / 8.0).abs() < 1e-6);
        assert_eq!(tilt(Limb::LeftUpperLeg), 0.0);
    }

    #[test]
    fn test_root_offset_and_name_tag() {
        let (graph, rig) = build(CharacterVariant::Detailed, true);

        let root = graph.node(rig.root).unwrap();
        assert!((root.transform.position.y - 0.2).abs() < 1e-6);

        let tag = graph.node(rig.name_tag.unwrap()).unwrap();
        assert!(tag.billboard);
        assert!((tag.transform.position.y - 1.8).abs() < 1e-6);
        assert_eq!(graph.billboards(), vec![rig.name_tag.unwrap()]);
    }

    #[test]
    fn test_name_tag_can_be_disabled() {
        let (graph, rig) = build(CharacterVariant::Detailed, false);
        assert!(rig.name_tag.is_none());
        assert!(graph.billboards().is_empty());
    }

    #[test]
    fn test_simple_rig_has_single_segment_limbs() {
        let (graph, rig) = build(CharacterVariant::Simple, true);

        assert_eq!(rig.parts.len(), 4);
        assert!(rig.parts.get(Limb::LeftLowerArm).is_none());
        assert!(rig.parts.get(Limb::RightFoot).is_none());
        assert!(graph.find_by_name("Torso").is_some());
        assert_eq!(rig.variant, CharacterVariant::Simple);
    }

    #[test]
    fn test_shared_meshes_and_materials() {
        let (graph, rig) = build(CharacterVariant::Detailed, false);
        let left = graph.node(rig.parts.get(Limb::LeftUpperLeg).unwrap()).unwrap().drawable.unwrap();
        let right = graph.node(rig.parts.get(Limb::RightUpperLeg).unwrap()).unwrap().drawable.unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_foot_geometry_is_offset() {
        let (graph, rig) = build(CharacterVariant::Detailed, false);
        let drawable = graph.node(rig.parts.get(Limb::LeftFoot).unwrap()).unwrap().drawable.unwrap();
        let (min, max) = graph.mesh(drawable.mesh).unwrap().bounds().unwrap();
        assert!((min.y + 0.15).abs() < 1e-6 && (max.y + 0.05).abs() < 1e-6);
        assert!((max.z - 0.225).abs() < 1e-6);
        assert!((min.z + 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_detailed_part_count() {
        let (graph, _) = build(CharacterVariant::Detailed, true);
        // 根节点 + 38 个部件
        let drawables = graph.draw_items().len();
        assert_eq!(drawables, 38);
        assert_eq!(graph.len(), 39);
    }
}
