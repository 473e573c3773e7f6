//! 每帧速度
//!
//! 速度每帧从零开始，由按键累加，摇杆模式下被摇杆覆盖，最后对角线归一化。

use crate::core::input::{ControlMode, Direction, InputState};
use crate::core::math::constants::FRAC_1_SQRT_2;

/// 地面平面上的速度 (x, z)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub z: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }

    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.z)
    }

    /// 面向运动方向的偏航角；静止时为 `None`
    pub fn heading(&self) -> Option<f32> {
        (!self.is_zero()).then(|| self.x.atan2(self.z))
    }
}

/// 根据输入状态计算本帧速度
pub fn compute_velocity(input: &InputState, speed: f32) -> Velocity {
    let mut v = Velocity::ZERO;

    if input.is_pressed(Direction::Forward) {
        v.z -= speed;
    }
    if input.is_pressed(Direction::Back) {
        v.z += speed;
    }
    if input.is_pressed(Direction::Left) {
        v.x -= speed;
    }
    if input.is_pressed(Direction::Right) {
        v.x += speed;
    }

    if input.mode == ControlMode::Joystick && (input.joystick.x != 0.0 || input.joystick.y != 0.0) {
        v.x = input.joystick.x * speed;
        v.z = input.joystick.y * speed;
    }

    // 摇杆输入同样按对角线处理
    if v.x != 0.0 && v.z != 0.0 {
        v.x *= FRAC_1_SQRT_2;
        v.z *= FRAC_1_SQRT_2;
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vector2;

    const SPEED: f32 = 0.05;

    fn pressed(directions: &[Direction]) -> InputState {
        let mut input = InputState::new(ControlMode::Buttons);
        for &d in directions {
            input.set_pressed(d, true);
        }
        input
    }

    #[test]
    fn test_single_keys_are_axis_aligned() {
        let cases = [
            (Direction::Forward, Velocity::new(0.0, -SPEED)),
            (Direction::Back, Velocity::new(0.0, SPEED)),
            (Direction::Left, Velocity::new(-SPEED, 0.0)),
            (Direction::Right, Velocity::new(SPEED, 0.0)),
        ];
        for (direction, expected) in cases {
            assert_eq!(compute_velocity(&pressed(&[direction]), SPEED), expected);
        }
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let v = compute_velocity(&pressed(&[Direction::Forward, Direction::Right]), SPEED);
        assert!((v.magnitude() - SPEED).abs() < 1e-6);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let v = compute_velocity(&pressed(&[Direction::Left, Direction::Right]), SPEED);
        assert!(v.is_zero());
        assert_eq!(v.heading(), None);
    }

    #[test]
    fn test_joystick_overrides_keys() {
        let mut input = pressed(&[Direction::Forward]);
        input.mode = ControlMode::Joystick;
        input.joystick = Vector2::new(1.0, 0.0);

        assert_eq!(compute_velocity(&input, SPEED), Velocity::new(SPEED, 0.0));
    }

    #[test]
    fn test_joystick_ignored_in_button_mode() {
        let mut input = pressed(&[Direction::Back]);
        input.joystick = Vector2::new(0.5, 0.5);

        assert_eq!(compute_velocity(&input, SPEED), Velocity::new(0.0, SPEED));
    }

    #[test]
    fn test_joystick_diagonal_is_scaled() {
        let mut input = InputState::new(ControlMode::Joystick);
        input.joystick = Vector2::new(0.6, 0.8);

        let v = compute_velocity(&input, SPEED);
        assert!((v.x - 0.6 * SPEED * FRAC_1_SQRT_2).abs() < 1e-7);
        assert!((v.z - 0.8 * SPEED * FRAC_1_SQRT_2).abs() < 1e-7);
    }

    #[test]
    fn test_heading_right_is_quarter_turn() {
        let heading = Velocity::new(SPEED, 0.0).heading().unwrap();
        assert!((heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
