//! Integration tests for commonkit-input.
//!
//! These exercise the arbiter as a host would drive it: raw requests with
//! caller-supplied timestamps, locks and filters from UI code, and change
//! notifications observed through both delivery paths.

use std::cell::RefCell;
use std::rc::Rc;

use commonkit_config::{Config, PlatformKind};
use commonkit_input::{
    InputArbiter, InputMethod, PlatformCapabilities, PlatformProfile, RequestOutcome,
    ThrashDetector,
};

/// Platform double with a fixed capability table.
struct FakePlatform {
    default: InputMethod,
    touch: bool,
}

impl PlatformCapabilities for FakePlatform {
    fn supports_input_method(&self, method: InputMethod) -> bool {
        match method {
            InputMethod::Touch => self.touch,
            _ => true,
        }
    }

    fn default_input_method(&self) -> InputMethod {
        self.default
    }

    fn supports_hardware_cursor(&self) -> bool {
        true
    }
}

fn desktop_arbiter() -> InputArbiter {
    InputArbiter::from_config(&Config::new().with_platform(PlatformKind::Desktop))
}

fn record_changes<P: PlatformCapabilities>(
    arbiter: &mut InputArbiter<P>,
) -> Rc<RefCell<Vec<InputMethod>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    arbiter.subscribe(move |method| sink.borrow_mut().push(method));
    seen
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_request_broadcasts_once() {
    let mut arbiter = desktop_arbiter();
    let seen = record_changes(&mut arbiter);

    assert!(arbiter.request_input_method(InputMethod::Gamepad, 0.0).is_changed());
    assert_eq!(
        arbiter.request_input_method(InputMethod::Gamepad, 0.05),
        RequestOutcome::Unchanged
    );
    assert_eq!(*seen.borrow(), vec![InputMethod::Gamepad]);
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

#[test]
fn lock_overrides_requests() {
    let mut arbiter = InputArbiter::new(FakePlatform {
        default: InputMethod::MouseAndKeyboard,
        touch: true,
    });
    arbiter.add_or_remove_input_type_lock("R", InputMethod::Gamepad, true);

    arbiter.request_input_method(InputMethod::Touch, 0.0);
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);
    arbiter.request_input_method(InputMethod::MouseAndKeyboard, 5.0);
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);
}

#[test]
fn lock_release_restores_arbitration() {
    let mut arbiter = InputArbiter::new(FakePlatform {
        default: InputMethod::MouseAndKeyboard,
        touch: true,
    });
    arbiter.add_or_remove_input_type_lock("R", InputMethod::Gamepad, true);
    arbiter.add_or_remove_input_type_lock("R", InputMethod::Gamepad, false);

    let outcome = arbiter.request_input_method(InputMethod::Touch, 0.0);
    assert_eq!(outcome, RequestOutcome::Changed(InputMethod::Touch));
    assert_eq!(arbiter.current_input_type(), InputMethod::Touch);
}

#[test]
fn most_recent_lock_wins_until_released() {
    let mut arbiter = desktop_arbiter();
    arbiter.add_or_remove_input_type_lock("menu", InputMethod::Gamepad, true);
    arbiter.add_or_remove_input_type_lock("tutorial", InputMethod::MouseAndKeyboard, true);
    assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);

    arbiter.add_or_remove_input_type_lock("tutorial", InputMethod::MouseAndKeyboard, false);
    // Remaining lock governs the next request
    arbiter.request_input_method(InputMethod::MouseAndKeyboard, 0.0);
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);
}

#[test]
fn removing_unknown_lock_is_silent() {
    let mut arbiter = desktop_arbiter();
    let seen = record_changes(&mut arbiter);
    arbiter.add_or_remove_input_type_lock("never-added", InputMethod::Touch, false);
    assert!(arbiter.locks().is_empty());
    assert!(seen.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// Platform substitution
// ---------------------------------------------------------------------------

#[test]
fn unsupported_method_substitutes_default() {
    let mut arbiter = InputArbiter::new(FakePlatform {
        default: InputMethod::MouseAndKeyboard,
        touch: false,
    });
    arbiter.request_input_method(InputMethod::Gamepad, 0.0);
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);

    let outcome = arbiter.request_input_method(InputMethod::Touch, 5.0);
    assert_eq!(outcome, RequestOutcome::Changed(InputMethod::MouseAndKeyboard));
    assert_eq!(arbiter.current_input_type(), arbiter.default_input_type());
}

#[test]
fn desktop_profile_rejects_touch() {
    let mut arbiter = desktop_arbiter();
    assert_eq!(
        arbiter.request_input_method(InputMethod::Touch, 0.0),
        RequestOutcome::Unchanged
    );
    assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn filter_hides_method_without_changing_it() {
    let mut arbiter = desktop_arbiter();
    arbiter.request_input_method(InputMethod::Gamepad, 0.0);
    assert!(arbiter.is_input_method_active(InputMethod::Gamepad));

    arbiter.set_input_type_filter(InputMethod::Gamepad, "x", true);
    assert!(!arbiter.is_input_method_active(InputMethod::Gamepad));
    assert!(arbiter.input_type_filter(InputMethod::Gamepad));
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);

    arbiter.set_input_type_filter(InputMethod::Gamepad, "x", false);
    assert!(arbiter.is_input_method_active(InputMethod::Gamepad));
}

#[test]
fn filter_does_not_block_becoming_current() {
    let mut arbiter = desktop_arbiter();
    arbiter.set_input_type_filter(InputMethod::Gamepad, "x", true);
    assert!(arbiter.request_input_method(InputMethod::Gamepad, 0.0).is_changed());
    assert!(!arbiter.is_input_method_active(InputMethod::Gamepad));
    assert!(!arbiter.is_input_method_active(InputMethod::MouseAndKeyboard));
}

// ---------------------------------------------------------------------------
// Thrash protection
// ---------------------------------------------------------------------------

#[test]
fn thrash_suppresses_then_recovers() {
    let mut arbiter = desktop_arbiter().with_thrash_detector(ThrashDetector::new(3, 1.0));

    let sequence = [
        (InputMethod::Gamepad, 0.0),
        (InputMethod::MouseAndKeyboard, 0.1),
        (InputMethod::Gamepad, 0.2),
        (InputMethod::MouseAndKeyboard, 0.3),
    ];
    for (method, now) in sequence {
        assert!(arbiter.request_input_method(method, now).is_changed());
    }
    assert_eq!(
        arbiter.request_input_method(InputMethod::Gamepad, 0.4),
        RequestOutcome::Suppressed
    );
    assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);

    // Still inside the thrash window
    assert_eq!(
        arbiter.request_input_method(InputMethod::Gamepad, 1.0),
        RequestOutcome::Suppressed
    );

    // Window elapsed with no accepted change
    assert_eq!(
        arbiter.request_input_method(InputMethod::Gamepad, 1.5),
        RequestOutcome::Changed(InputMethod::Gamepad)
    );
}

#[test]
fn no_op_requests_do_not_count_toward_thrashing() {
    let mut arbiter = desktop_arbiter().with_thrash_detector(ThrashDetector::new(1, 1.0));
    arbiter.request_input_method(InputMethod::Gamepad, 0.0);
    for i in 1..20 {
        arbiter.request_input_method(InputMethod::Gamepad, i as f64 * 0.01);
    }
    assert!(arbiter
        .request_input_method(InputMethod::MouseAndKeyboard, 0.5)
        .is_changed());
}

#[test]
fn disabled_thrash_protection_accepts_everything() {
    let config = Config::new()
        .with_platform(PlatformKind::Desktop)
        .with_thrash_protection(false);
    let mut arbiter = InputArbiter::from_config(&config);
    let mut method = InputMethod::Gamepad;
    for i in 0..30 {
        assert!(arbiter.request_input_method(method, i as f64 * 0.01).is_changed());
        method = if method == InputMethod::Gamepad {
            InputMethod::MouseAndKeyboard
        } else {
            InputMethod::Gamepad
        };
    }
}

// ---------------------------------------------------------------------------
// Gamepad sub-state
// ---------------------------------------------------------------------------

#[test]
fn simulated_click_flag_is_independent_of_method() {
    let mut arbiter = desktop_arbiter();
    arbiter.set_is_gamepad_simulated_click(true);
    assert!(arbiter.is_gamepad_simulated_click());
    assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);
    arbiter.set_is_gamepad_simulated_click(false);
    assert!(!arbiter.is_gamepad_simulated_click());
}

#[test]
fn gamepad_name_defaults_from_config() {
    let mut config = Config::new().with_platform(PlatformKind::Console);
    config.gamepad.default_name = "PS5".to_string();
    let arbiter = InputArbiter::from_config(&config);
    assert_eq!(arbiter.current_gamepad_name(), "PS5");
    assert!(!arbiter.platform_supports_hardware_cursor());
}

// ---------------------------------------------------------------------------
// Notification delivery
// ---------------------------------------------------------------------------

#[test]
fn both_delivery_paths_fire() {
    let mut arbiter = desktop_arbiter();
    let seen = record_changes(&mut arbiter);
    let rx = arbiter.subscribe_channel();

    arbiter.request_input_method(InputMethod::Gamepad, 0.0);

    assert_eq!(*seen.borrow(), vec![InputMethod::Gamepad]);
    let change = rx.try_recv().unwrap();
    assert_eq!(change.previous, InputMethod::MouseAndKeyboard);
    assert_eq!(change.current, InputMethod::Gamepad);
    assert!(rx.try_recv().is_err());
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let mut arbiter = desktop_arbiter();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = arbiter.subscribe(move |_| *sink.borrow_mut() += 1);
    assert!(arbiter.unsubscribe(id));

    arbiter.request_input_method(InputMethod::Gamepad, 0.0);
    assert_eq!(*count.borrow(), 0);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_scenario() {
    let platform = FakePlatform {
        default: InputMethod::MouseAndKeyboard,
        touch: true,
    };
    let mut arbiter = InputArbiter::new(platform).with_thrash_detector(ThrashDetector::new(3, 1.0));
    let seen = record_changes(&mut arbiter);

    arbiter.request_input_method(InputMethod::Gamepad, 0.0);
    assert_eq!(arbiter.current_input_type(), InputMethod::Gamepad);
    assert_eq!(*seen.borrow(), vec![InputMethod::Gamepad]);

    arbiter.request_input_method(InputMethod::MouseAndKeyboard, 0.1);
    assert_eq!(seen.borrow().len(), 2);

    arbiter.request_input_method(InputMethod::Gamepad, 0.2);
    arbiter.request_input_method(InputMethod::MouseAndKeyboard, 0.3);
    let outcome = arbiter.request_input_method(InputMethod::Gamepad, 0.4);

    assert_eq!(outcome, RequestOutcome::Suppressed);
    assert_eq!(arbiter.current_input_type(), InputMethod::MouseAndKeyboard);
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn mobile_profile_starts_in_touch() {
    let arbiter = InputArbiter::new(PlatformProfile::preset(PlatformKind::Mobile));
    assert_eq!(arbiter.current_input_type(), InputMethod::Touch);
    assert!(arbiter.is_using_pointer_input());
}
