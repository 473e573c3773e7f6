//! 端到端行为：输入 -> 速度 -> 位姿 -> 动画 -> 相机

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

use walk_scene::app::{App, FrameLoop};
use walk_scene::character::Limb;
use walk_scene::core::{
    CancelToken, CharacterVariant, Config, ControlMode, Direction, FixedRateScheduler, SceneConfig, Vector3,
};
use walk_scene::renderer::{FrameRenderer, HeadlessRenderer};
use winit::event::{ElementState, TouchPhase};
use winit::keyboard::KeyCode;

fn app() -> App {
    App::new(Config::default(), SceneConfig::default()).unwrap()
}

fn limb_angle(app: &App, limb: Limb) -> f32 {
    let id = app.context().rig().parts.get(limb).unwrap();
    app.graph().node(id).unwrap().transform.rotation.x
}

fn press(app: &mut App, key: KeyCode) {
    app.input_mut().on_keyboard_input(key, ElementState::Pressed, false);
}

fn release(app: &mut App, key: KeyCode) {
    app.input_mut().on_keyboard_input(key, ElementState::Released, false);
}

#[test]
fn test_single_key_moves_along_one_axis() {
    for (key, expected) in [
        (KeyCode::KeyW, (0.0, -0.05)),
        (KeyCode::KeyS, (0.0, 0.05)),
        (KeyCode::KeyA, (-0.05, 0.0)),
        (KeyCode::KeyD, (0.05, 0.0)),
    ] {
        let mut app = app();
        press(&mut app, key);
        let report = app.frame();
        assert!((report.velocity.x - expected.0).abs() < 1e-6, "{:?}", key);
        assert!((report.velocity.z - expected.1).abs() < 1e-6, "{:?}", key);
    }
}

#[test]
fn test_diagonal_keeps_single_axis_speed() {
    let mut app = app();
    press(&mut app, KeyCode::KeyW);
    press(&mut app, KeyCode::KeyD);
    let report = app.frame();

    assert!((report.velocity.magnitude() - 0.05).abs() < 1e-6);
    assert!((report.velocity.x - 0.05 * FRAC_1_SQRT_2).abs() < 1e-6);
    assert!((report.velocity.z + 0.05 * FRAC_1_SQRT_2).abs() < 1e-6);
}

#[test]
fn test_opposite_keys_cancel() {
    let mut app = app();
    press(&mut app, KeyCode::KeyA);
    press(&mut app, KeyCode::KeyD);
    let report = app.frame();
    assert!(!report.moving());
}

#[test]
fn test_walking_forward_ten_frames() {
    let mut app = app();
    press(&mut app, KeyCode::KeyW);
    let mut last = None;
    for _ in 0..10 {
        last = Some(app.frame());
    }
    let last = last.unwrap();

    assert!((last.pose.position.z + 0.5).abs() < 1e-5);
    assert!(last.pose.position.x.abs() < 1e-6);
    assert!((last.pose.yaw.abs() - PI).abs() < 1e-6);
    assert!((last.phase - 1.0).abs() < 1e-5);
}

#[test]
fn test_turning_right_faces_positive_x() {
    let mut app = app();
    press(&mut app, KeyCode::KeyD);
    let report = app.frame();
    assert!((report.pose.yaw - FRAC_PI_2).abs() < 1e-6);

    let root = app.graph().node(app.context().rig().root).unwrap();
    assert!((root.transform.rotation.y - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_release_stops_and_restores_rest_pose() {
    let mut app = app();
    press(&mut app, KeyCode::KeyS);
    for _ in 0..7 {
        app.frame();
    }
    assert!(limb_angle(&app, Limb::LeftUpperLeg).abs() > 0.1);
    let phase = app.context().walk_cycle().phase();

    release(&mut app, KeyCode::KeyS);
    let report = app.frame();

    assert!(!report.moving());
    assert_eq!(report.phase, phase);
    for limb in Limb::ALL {
        assert_eq!(limb_angle(&app, limb), 0.0, "{:?}", limb);
    }
    let arm = app.context().rig().parts.get(Limb::LeftLowerArm).unwrap();
    assert!((app.graph().node(arm).unwrap().transform.rotation.z - PI / 8.0).abs() < 1e-6);
}

#[test]
fn test_walk_cycle_repeats_after_a_full_period() {
    let mut app = app();
    press(&mut app, KeyCode::KeyW);
    let mut angles = Vec::new();
    for _ in 0..80 {
        app.frame();
        angles.push(limb_angle(&app, Limb::RightUpperArm));
    }

    // 步长 0.1，约 63 帧一个周期
    for k in 0..10 {
        assert!((angles[k] - angles[k + 63]).abs() < 0.01);
    }
    assert!(angles.iter().all(|a| a.abs() <= 0.5 + 1e-6));
}

#[test]
fn test_camera_trails_the_character() {
    let mut app = app();
    press(&mut app, KeyCode::KeyA);
    press(&mut app, KeyCode::KeyS);
    for _ in 0..25 {
        let report = app.frame();
        let p = report.pose.position;
        let expected = Vector3::new(p.x, 1.5, p.z + 5.0);
        assert!((report.camera_position - expected).norm() < 1e-5);
        assert!((app.camera().target() - p).norm() < 1e-5);
    }
}

#[test]
fn test_name_tag_faces_the_camera() {
    let mut app = app();
    press(&mut app, KeyCode::KeyD);
    for _ in 0..12 {
        app.frame();
    }
    let tag = app.context().rig().name_tag.unwrap();
    let angle = app.graph().world_rotation(tag).angle_to(&app.camera().orientation());
    assert!(angle < 1e-4);
}

#[test]
fn test_focus_loss_releases_keys() {
    let mut app = app();
    press(&mut app, KeyCode::KeyW);
    assert!(app.frame().moving());

    app.input_mut().reset();
    assert!(!app.frame().moving());
}

#[test]
fn test_joystick_overrides_and_clamps() {
    let mut config = Config::default();
    config.controls.initial_mode = ControlMode::Joystick;
    let mut app = App::new(config, SceneConfig::default()).unwrap();
    app.resize(1280, 720);

    let center = app.input().joystick().center();
    let (cx, cy) = (center.x as f64, center.y as f64);

    app.input_mut().on_touch(7, TouchPhase::Started, (cx, cy));
    app.input_mut().on_touch(7, TouchPhase::Moved, (cx + 500.0, cy));
    let report = app.frame();
    assert!((report.velocity.x - 0.05).abs() < 1e-5);
    assert!(report.velocity.z.abs() < 1e-6);

    // 对角方向同样缩放
    app.input_mut().on_touch(7, TouchPhase::Moved, (cx + 500.0, cy + 500.0));
    let report = app.frame();
    assert!((report.velocity.x - 0.025).abs() < 1e-4);
    assert!((report.velocity.z - 0.025).abs() < 1e-4);

    app.input_mut().on_touch(7, TouchPhase::Ended, (cx, cy));
    assert!(!app.frame().moving());
}

#[test]
fn test_joystick_ignored_in_button_mode() {
    let mut app = app();
    app.resize(1280, 720);
    let center = app.input().joystick().center();
    app.input_mut()
        .on_touch(1, TouchPhase::Started, (center.x as f64 + 10.0, center.y as f64));
    assert!(!app.frame().moving());
}

#[test]
fn test_tab_toggles_mode_and_clears_keys() {
    let mut app = app();
    press(&mut app, KeyCode::KeyW);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.input().state().mode, ControlMode::Joystick);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.input().state().mode, ControlMode::Buttons);
    assert!(!app.input().state().is_pressed(Direction::Forward));
    assert!(!app.frame().moving());
}

#[test]
fn test_simple_variant_only_swings_upper_limbs() {
    let mut scene = SceneConfig::default();
    scene.apply_args(["walk_scene", "--simple"]);
    assert_eq!(scene.character.variant, CharacterVariant::Simple);

    let mut app = App::new(Config::default(), scene).unwrap();
    assert_eq!(app.context().rig().parts.len(), 4);
    assert!(app.context().rig().parts.get(Limb::LeftFoot).is_none());

    press(&mut app, KeyCode::KeyW);
    for _ in 0..5 {
        app.frame();
    }
    assert!((limb_angle(&app, Limb::LeftUpperLeg) - (0.5f32).sin() * 0.5).abs() < 1e-5);
}

#[test]
fn test_headless_run_renders_every_frame() {
    let mut config = Config::default();
    config.apply_args(["walk_scene", "--headless", "--frames", "30", "--hold", "wd"]);
    config.validate().unwrap();

    let mut app = App::new(config, SceneConfig::default()).unwrap();
    let mut scheduler = FixedRateScheduler::unthrottled(app.config().runtime.max_frames, CancelToken::new());
    let mut renderer = HeadlessRenderer::new(1280, 720);

    let summary = FrameLoop::new(&mut app).run(&mut scheduler, &mut renderer).unwrap();

    assert_eq!(summary.frames, 30);
    assert_eq!(renderer.frames_rendered(), 30);
    assert!(renderer.last_draw_count() > 30);
    let step = 0.05 * FRAC_1_SQRT_2 * 30.0;
    let last = summary.last.unwrap();
    assert!((last.pose.position.x - step).abs() < 1e-4);
    assert!((last.pose.position.z + step).abs() < 1e-4);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.runtime.hold = "wq".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.motion.speed = 0.0;
    assert!(config.validate().is_err());
}
