//! Input system for keyboard, mouse and touch input
//!
//! Platform events are folded into an [`InputState`]: four held direction keys,
//! an analog vector from the on-screen virtual joystick, and the active
//! [`ControlMode`]. The frame update only ever reads that state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use winit::event::{ElementState, MouseButton, TouchPhase};
use winit::keyboard::KeyCode;

use crate::core::config::ControlsConfig;
use crate::core::math::Vector2;

/// The active input scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Discrete direction buttons (keyboard or on-screen buttons)
    Buttons,
    /// Analog virtual joystick
    Joystick,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Buttons => ControlMode::Joystick,
            ControlMode::Joystick => ControlMode::Buttons,
        }
    }
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Back => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Map a WASD letter (either case) to a direction
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Direction::Forward),
            's' => Some(Direction::Back),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a physical key to a direction (WASD and arrow keys)
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Direction::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Direction::Back),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Direction::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Accumulated input, read once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pressed: [bool; 4],
    /// Joystick deflection, each axis in [-1, 1]; +y points towards the viewer
    pub joystick: Vector2,
    pub mode: ControlMode,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(ControlMode::Buttons)
    }
}

impl InputState {
    pub fn new(mode: ControlMode) -> Self {
        Self {
            pressed: [false; 4],
            joystick: Vector2::zeros(),
            mode,
        }
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.pressed[direction.index()]
    }

    pub fn set_pressed(&mut self, direction: Direction, pressed: bool) {
        self.pressed[direction.index()] = pressed;
    }

    /// Release every direction key
    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }

    /// Release every key and center the joystick; the mode is kept
    pub fn clear(&mut self) {
        self.release_all();
        self.joystick = Vector2::zeros();
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p)
    }
}

/// On-screen analog stick anchored at the bottom-left corner of the window
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    radius: f32,
    knob_radius: f32,
    margin: f32,
    center: Vector2,
    active: bool,
    touch_id: Option<u64>,
    vector: Vector2,
}

impl VirtualJoystick {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            radius: config.joystick_radius,
            knob_radius: config.knob_radius,
            margin: config.joystick_margin,
            center: Vector2::new(
                config.joystick_margin + config.joystick_radius,
                config.joystick_margin + config.joystick_radius,
            ),
            active: false,
            touch_id: None,
            vector: Vector2::zeros(),
        }
    }

    /// Re-anchor the pad after the window changes size
    pub fn layout(&mut self, _width: u32, height: u32) {
        self.center = Vector2::new(
            self.margin + self.radius,
            height as f32 - self.margin - self.radius,
        );
    }

    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn vector(&self) -> Vector2 {
        self.vector
    }

    pub fn contains(&self, point: Vector2) -> bool {
        (point - self.center).norm() <= self.radius
    }

    /// Start tracking a pointer if it lands on the pad
    pub fn press(&mut self, point: Vector2, touch_id: Option<u64>) -> bool {
        if !self.contains(point) {
            return false;
        }
        self.active = true;
        self.touch_id = touch_id;
        self.drag(point);
        true
    }

    /// Update the deflection from a pointer position
    ///
    /// The offset from the pad center is clamped to `radius - knob_radius`
    /// and then normalized by that travel, so each axis stays in [-1, 1].
    pub fn drag(&mut self, point: Vector2) -> Vector2 {
        if !self.active {
            return self.vector;
        }

        let travel = self.radius - self.knob_radius;
        let mut delta = point - self.center;
        let distance = delta.norm();
        if distance > travel {
            let angle = delta.y.atan2(delta.x);
            delta = Vector2::new(angle.cos() * travel, angle.sin() * travel);
        }

        self.vector = delta / travel;
        self.vector
    }

    pub fn release(&mut self) {
        self.active = false;
        self.touch_id = None;
        self.vector = Vector2::zeros();
    }

    fn tracks_touch(&self, id: u64) -> bool {
        self.active && self.touch_id == Some(id)
    }
}

/// Translates window events into an [`InputState`]
pub struct InputSystem {
    state: InputState,
    joystick: VirtualJoystick,
    cursor: Vector2,
}

impl InputSystem {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            state: InputState::new(config.initial_mode),
            joystick: VirtualJoystick::new(config),
            cursor: Vector2::zeros(),
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn joystick(&self) -> &VirtualJoystick {
        &self.joystick
    }

    /// Process a keyboard event
    ///
    /// Returns true if the key is bound to something.
    pub fn on_keyboard_input(&mut self, keycode: KeyCode, state: ElementState, repeat: bool) -> bool {
        if keycode == KeyCode::Tab {
            if state == ElementState::Pressed && !repeat {
                self.toggle_control_mode();
            }
            return true;
        }

        match Direction::from_key_code(keycode) {
            Some(direction) => {
                self.state.set_pressed(direction, state == ElementState::Pressed);
                true
            }
            None => false,
        }
    }

    /// Switch between buttons and joystick
    ///
    /// Leaving joystick mode also releases every held key, so no direction
    /// stays latched across the switch.
    pub fn toggle_control_mode(&mut self) -> ControlMode {
        self.state.mode = self.state.mode.toggled();
        if self.state.mode == ControlMode::Buttons {
            self.state.release_all();
        }
        self.joystick.release();
        self.state.joystick = Vector2::zeros();
        info!(mode = ?self.state.mode, "Control mode switched");
        self.state.mode
    }

    pub fn on_cursor_moved(&mut self, position: (f64, f64)) {
        self.cursor = Vector2::new(position.0 as f32, position.1 as f32);
        if self.joystick.is_active() && self.joystick.touch_id.is_none() {
            self.state.joystick = self.joystick.drag(self.cursor);
        }
    }

    /// Mouse drives the joystick pad on desktop
    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                if self.state.mode == ControlMode::Joystick && self.joystick.press(self.cursor, None) {
                    debug!("Joystick grabbed by mouse");
                    self.state.joystick = self.joystick.vector();
                }
            }
            ElementState::Released => {
                if self.joystick.is_active() && self.joystick.touch_id.is_none() {
                    self.joystick.release();
                    self.state.joystick = Vector2::zeros();
                }
            }
        }
    }

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, position: (f64, f64)) {
        let point = Vector2::new(position.0 as f32, position.1 as f32);
        match phase {
            TouchPhase::Started => {
                if self.state.mode == ControlMode::Joystick
                    && !self.joystick.is_active()
                    && self.joystick.press(point, Some(id))
                {
                    self.state.joystick = self.joystick.vector();
                }
            }
            TouchPhase::Moved => {
                if self.joystick.tracks_touch(id) {
                    self.state.joystick = self.joystick.drag(point);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.joystick.tracks_touch(id) {
                    self.joystick.release();
                    self.state.joystick = Vector2::zeros();
                }
            }
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.joystick.layout(width, height);
    }

    /// Drop all held input, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.joystick.release();
        self.state.clear();
    }

    /// Hold a direction programmatically (headless runs)
    pub fn hold(&mut self, direction: Direction) {
        self.state.set_pressed(direction, true);
    }
}
