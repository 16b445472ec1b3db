//! Input mapping from raw key events to host actions
//!
//! Most keys become [`EngineCommand`]s. A few act on the host itself
//! (fullscreen, exit, the active flag) or on the simulated tilt sensor.
//! Pointer, wheel and touch events are not mapped here; they go straight to
//! the engine's producer methods.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

use tessera_core::{AxisId, EngineCommand, ProjectionParam};

/// Actions triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Forward to the engine unchanged
    Command(EngineCommand),
    /// Flip the orientation source on/off (O key)
    ToggleOrientation,
    /// Flip the touch source on/off (T key)
    ToggleTouch,
    /// Nudge a projection parameter target by this amount
    AdjustParameter(ProjectionParam, f32),
    /// Tilt the simulated device: (beta, gamma, alpha) in steps
    Tilt { beta: f32, gamma: f32, alpha: f32 },
    /// Pause/resume the animation loop (Tab)
    ToggleActive,
    /// Log the full engine snapshot (P)
    LogSnapshot,
    ToggleFullscreen,
    Exit,
}

/// Per-press parameter steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSteps {
    pub fov: f32,
    pub perspective: f32,
    pub camera_z: f32,
}

impl Default for ParameterSteps {
    fn default() -> Self {
        Self {
            fov: 5.0,
            perspective: 0.25,
            camera_z: 0.5,
        }
    }
}

/// Maps key presses to actions
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    steps: ParameterSteps,
}

impl InputMapper {
    pub fn new(steps: ParameterSteps) -> Self {
        Self { steps }
    }

    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unmapped keys
    pub fn map_keyboard(&self, key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        let toggle = |axis| Some(InputAction::Command(EngineCommand::ToggleAxis(axis)));
        let adjust = |param, delta| Some(InputAction::AdjustParameter(param, delta));
        let tilt = |beta, gamma, alpha| Some(InputAction::Tilt { beta, gamma, alpha });

        match key {
            KeyCode::Digit1 => toggle(AxisId::Rx),
            KeyCode::Digit2 => toggle(AxisId::Ry),
            KeyCode::Digit3 => toggle(AxisId::Rwx),
            KeyCode::Digit4 => toggle(AxisId::Rwy),
            KeyCode::Digit5 => toggle(AxisId::CameraRx),
            KeyCode::Digit6 => toggle(AxisId::CameraRy),
            KeyCode::Digit7 => toggle(AxisId::CameraRz),
            KeyCode::KeyR => Some(InputAction::Command(EngineCommand::ResetAll)),
            KeyCode::KeyY => Some(InputAction::Command(EngineCommand::ResolvePermission(true))),
            KeyCode::KeyN => Some(InputAction::Command(EngineCommand::ResolvePermission(false))),
            KeyCode::KeyO => Some(InputAction::ToggleOrientation),
            KeyCode::KeyT => Some(InputAction::ToggleTouch),
            KeyCode::BracketLeft => adjust(ProjectionParam::Fov, -self.steps.fov),
            KeyCode::BracketRight => adjust(ProjectionParam::Fov, self.steps.fov),
            KeyCode::Minus => adjust(ProjectionParam::PerspectiveStrength, -self.steps.perspective),
            KeyCode::Equal => adjust(ProjectionParam::PerspectiveStrength, self.steps.perspective),
            KeyCode::Comma => adjust(ProjectionParam::CameraZ, -self.steps.camera_z),
            KeyCode::Period => adjust(ProjectionParam::CameraZ, self.steps.camera_z),
            KeyCode::ArrowUp => tilt(-1.0, 0.0, 0.0),
            KeyCode::ArrowDown => tilt(1.0, 0.0, 0.0),
            KeyCode::ArrowLeft => tilt(0.0, -1.0, 0.0),
            KeyCode::ArrowRight => tilt(0.0, 1.0, 0.0),
            KeyCode::KeyQ => tilt(0.0, 0.0, 1.0),
            KeyCode::KeyE => tilt(0.0, 0.0, -1.0),
            KeyCode::Tab => Some(InputAction::ToggleActive),
            KeyCode::KeyP => Some(InputAction::LogSnapshot),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode) -> Option<InputAction> {
        InputMapper::default().map_keyboard(key, ElementState::Pressed)
    }

    #[test]
    fn test_digits_toggle_axes_in_order() {
        let keys = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
        ];
        for (key, axis) in keys.into_iter().zip(AxisId::ALL) {
            assert_eq!(press(key), Some(InputAction::Command(EngineCommand::ToggleAxis(axis))));
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::default().map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_parameter_keys_use_configured_steps() {
        let mapper = InputMapper::new(ParameterSteps {
            fov: 2.0,
            perspective: 0.1,
            camera_z: 1.0,
        });
        assert_eq!(
            mapper.map_keyboard(KeyCode::BracketLeft, ElementState::Pressed),
            Some(InputAction::AdjustParameter(ProjectionParam::Fov, -2.0))
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::Period, ElementState::Pressed),
            Some(InputAction::AdjustParameter(ProjectionParam::CameraZ, 1.0))
        );
    }

    #[test]
    fn test_permission_keys() {
        assert_eq!(
            press(KeyCode::KeyY),
            Some(InputAction::Command(EngineCommand::ResolvePermission(true)))
        );
        assert_eq!(
            press(KeyCode::KeyN),
            Some(InputAction::Command(EngineCommand::ResolvePermission(false)))
        );
    }

    #[test]
    fn test_host_keys() {
        assert_eq!(press(KeyCode::Tab), Some(InputAction::ToggleActive));
        assert_eq!(press(KeyCode::KeyF), Some(InputAction::ToggleFullscreen));
        assert_eq!(press(KeyCode::Escape), Some(InputAction::Exit));
        assert_eq!(press(KeyCode::KeyW), None);
    }
}
