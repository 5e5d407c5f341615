//! Raw device input classification.
//!
//! The windowing layer hands every raw event to [`InputPreprocessor`], which
//! decides which input method (if any) the event implies and forwards the
//! request to the arbiter. Keyboard, mouse and touch payloads use winit's
//! types; gamepad payloads use the config crate's positional enums.

use serde::{Deserialize, Serialize};
use winit::event::{MouseButton, TouchPhase};
use winit::keyboard::KeyCode;

use commonkit_config::{GamepadAxis, GamepadButton, GamepadConfig, InputMethod};

use crate::arbiter::{InputArbiter, RequestOutcome};
use crate::platform::PlatformCapabilities;

/// A raw device event as delivered by the windowing or gamepad layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum RawInput {
    /// Keyboard key press
    Key { code: KeyCode },
    /// Mouse button press
    MouseButton { button: MouseButton },
    /// Pointer moved to an absolute position
    PointerMotion {
        x: f64,
        y: f64,
        /// Motion generated by software (e.g. a gamepad-driven cursor)
        #[serde(default)]
        synthesized: bool,
    },
    /// Touch contact
    Touch { phase: TouchPhase },
    /// Gamepad button press
    GamepadButton {
        button: GamepadButton,
        /// Controller profile reported by the device layer
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile: Option<String>,
    },
    /// Gamepad stick or trigger deflection in -1.0..=1.0
    GamepadAxis { axis: GamepadAxis, value: f32 },
}

/// Returns true if `code` is a hardware key found on phones and tablets
/// (back, menu, volume) that can also arrive from a mobile gamepad.
pub fn is_mobile_gamepad_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::BrowserBack
            | KeyCode::ContextMenu
            | KeyCode::AudioVolumeDown
            | KeyCode::AudioVolumeUp
    )
}

/// Classifies raw input and feeds the arbiter.
#[derive(Debug, Clone)]
pub struct InputPreprocessor {
    accept_button: GamepadButton,
    analog_deadzone: f32,
}

impl InputPreprocessor {
    pub fn new(config: &GamepadConfig) -> Self {
        Self {
            accept_button: config.accept_button,
            analog_deadzone: config.analog_deadzone,
        }
    }

    /// The input method `input` implies, or `None` if it should not affect
    /// arbitration.
    pub fn classify<P: PlatformCapabilities>(
        &self,
        input: &RawInput,
        platform: &P,
    ) -> Option<InputMethod> {
        match input {
            RawInput::Key { code } => {
                if is_mobile_gamepad_key(*code)
                    && platform.default_input_method() == InputMethod::Touch
                {
                    None
                } else {
                    Some(InputMethod::MouseAndKeyboard)
                }
            }
            RawInput::MouseButton { .. } => Some(InputMethod::MouseAndKeyboard),
            RawInput::PointerMotion { synthesized, .. } => {
                (!synthesized).then_some(InputMethod::MouseAndKeyboard)
            }
            RawInput::Touch { phase } => match phase {
                TouchPhase::Started | TouchPhase::Moved => Some(InputMethod::Touch),
                TouchPhase::Ended | TouchPhase::Cancelled => None,
            },
            RawInput::GamepadButton { .. } => Some(InputMethod::Gamepad),
            RawInput::GamepadAxis { value, .. } => {
                (value.abs() >= self.analog_deadzone).then_some(InputMethod::Gamepad)
            }
        }
    }

    /// Classify `input`, update the arbiter's device sub-state and request
    /// the implied method.
    ///
    /// Pointer motion always updates the tracked cursor, synthesized or not.
    /// Returns `None` when the input was ignored for arbitration.
    pub fn process<P: PlatformCapabilities>(
        &self,
        arbiter: &mut InputArbiter<P>,
        input: &RawInput,
        now: f64,
    ) -> Option<RequestOutcome> {
        // Synthesized motion moves the cursor without voting for a method.
        if let RawInput::PointerMotion { x, y, .. } = input {
            arbiter.set_cursor_position((*x, *y), false);
        }

        let Some(method) = self.classify(input, arbiter.platform()) else {
            log::trace!("Ignoring input {:?}", input);
            return None;
        };

        match input {
            RawInput::MouseButton { .. } => arbiter.set_is_gamepad_simulated_click(false),
            RawInput::GamepadButton { button, profile } => {
                if let Some(profile) = profile {
                    arbiter.set_gamepad_input_type(profile);
                }
                arbiter.set_is_gamepad_simulated_click(*button == self.accept_button);
            }
            _ => {}
        }

        Some(arbiter.request_input_method(method, now))
    }
}

impl Default for InputPreprocessor {
    fn default() -> Self {
        Self::new(&GamepadConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformProfile;
    use commonkit_config::PlatformKind;

    fn desktop() -> PlatformProfile {
        PlatformProfile::preset(PlatformKind::Desktop)
    }

    #[test]
    fn test_keyboard_and_mouse_classify_as_mouse_and_keyboard() {
        let pre = InputPreprocessor::default();
        let platform = desktop();
        assert_eq!(
            pre.classify(&RawInput::Key { code: KeyCode::KeyW }, &platform),
            Some(InputMethod::MouseAndKeyboard)
        );
        assert_eq!(
            pre.classify(
                &RawInput::MouseButton {
                    button: MouseButton::Left
                },
                &platform
            ),
            Some(InputMethod::MouseAndKeyboard)
        );
    }

    #[test]
    fn test_mobile_keys_ignored_on_touch_platforms() {
        let pre = InputPreprocessor::default();
        let back = RawInput::Key {
            code: KeyCode::BrowserBack,
        };
        assert_eq!(
            pre.classify(&back, &PlatformProfile::preset(PlatformKind::Mobile)),
            None
        );
        assert_eq!(
            pre.classify(&back, &desktop()),
            Some(InputMethod::MouseAndKeyboard)
        );
    }

    #[test]
    fn test_is_mobile_gamepad_key() {
        assert!(is_mobile_gamepad_key(KeyCode::AudioVolumeUp));
        assert!(is_mobile_gamepad_key(KeyCode::ContextMenu));
        assert!(!is_mobile_gamepad_key(KeyCode::Escape));
    }

    #[test]
    fn test_synthesized_motion_ignored() {
        let pre = InputPreprocessor::default();
        let motion = RawInput::PointerMotion {
            x: 1.0,
            y: 2.0,
            synthesized: true,
        };
        assert_eq!(pre.classify(&motion, &desktop()), None);
    }

    #[test]
    fn test_synthesized_motion_moves_cursor_only() {
        let pre = InputPreprocessor::default();
        let mut arbiter = InputArbiter::new(desktop());
        let before = arbiter.current_input_type();
        let motion = RawInput::PointerMotion {
            x: 120.0,
            y: 48.0,
            synthesized: true,
        };

        assert_eq!(pre.process(&mut arbiter, &motion, 0.0), None);
        assert_eq!(arbiter.cursor_position(), (120.0, 48.0));
        assert_eq!(arbiter.current_input_type(), before);
    }

    #[test]
    fn test_touch_phases() {
        let pre = InputPreprocessor::default();
        let platform = desktop();
        assert_eq!(
            pre.classify(
                &RawInput::Touch {
                    phase: TouchPhase::Started
                },
                &platform
            ),
            Some(InputMethod::Touch)
        );
        assert_eq!(
            pre.classify(
                &RawInput::Touch {
                    phase: TouchPhase::Ended
                },
                &platform
            ),
            None
        );
    }

    #[test]
    fn test_axis_deadzone() {
        let pre = InputPreprocessor::default();
        let platform = desktop();
        let small = RawInput::GamepadAxis {
            axis: GamepadAxis::LeftStickX,
            value: 0.1,
        };
        let large = RawInput::GamepadAxis {
            axis: GamepadAxis::LeftStickY,
            value: -0.8,
        };
        assert_eq!(pre.classify(&small, &platform), None);
        assert_eq!(pre.classify(&large, &platform), Some(InputMethod::Gamepad));
    }

    #[test]
    fn test_accept_button_sets_simulated_click() {
        let pre = InputPreprocessor::default();
        let mut arbiter = InputArbiter::new(desktop());

        let outcome = pre.process(
            &mut arbiter,
            &RawInput::GamepadButton {
                button: GamepadButton::FaceBottom,
                profile: Some("XboxOne".to_string()),
            },
            0.0,
        );
        assert_eq!(outcome, Some(RequestOutcome::Changed(InputMethod::Gamepad)));
        assert!(arbiter.is_gamepad_simulated_click());
        assert_eq!(arbiter.current_gamepad_name(), "XboxOne");

        pre.process(
            &mut arbiter,
            &RawInput::MouseButton {
                button: MouseButton::Left,
            },
            5.0,
        );
        assert!(!arbiter.is_gamepad_simulated_click());
        assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);
    }

    #[test]
    fn test_pointer_motion_moves_cursor() {
        let pre = InputPreprocessor::default();
        let mut arbiter = InputArbiter::new(desktop());
        let outcome = pre.process(
            &mut arbiter,
            &RawInput::PointerMotion {
                x: 12.0,
                y: 34.0,
                synthesized: false,
            },
            0.0,
        );
        assert_eq!(outcome, Some(RequestOutcome::Unchanged));
        assert_eq!(arbiter.cursor_position(), (12.0, 34.0));
    }

    #[test]
    fn test_raw_input_yaml_shape() {
        let yaml = "device: key\ncode: KeyA\n";
        let input: RawInput = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(input, RawInput::Key { code: KeyCode::KeyA });

        let yaml = "device: gamepad_button\nbutton: face_right\n";
        let input: RawInput = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            input,
            RawInput::GamepadButton {
                button: GamepadButton::FaceRight,
                profile: None
            }
        );
    }
}
