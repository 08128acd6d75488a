use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::input::{InputEvent, PointerState, RawButton};

/// Pixels per wheel line, for devices that report line deltas.
pub const LINE_DELTA_PX: f64 = 100.0;

/// Translates a winit `WindowEvent` into an `InputEvent`.
///
/// Returns `None` for events the dispatcher has no use for.
pub fn translate_window_event(pointer: &mut PointerState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Resized(size) => {
            pointer.set_window_size(size.width, size.height);
            None
        }

        WindowEvent::CursorEntered { .. } => Some(InputEvent::PointerEnter),

        WindowEvent::CursorLeft { .. } => {
            pointer.left();
            Some(InputEvent::PointerLeave)
        }

        // Releases that happen while unfocused never arrive; treat focus loss like the
        // pointer leaving.
        WindowEvent::Focused(false) => Some(InputEvent::PointerLeave),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = pointer.moved_to(position.x, position.y);
            Some(InputEvent::MouseMove { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let button = raw_button(*button);
            match state {
                ElementState::Pressed => {
                    let (x, y) = pointer.position();
                    Some(InputEvent::MouseDown { button, x, y })
                }
                ElementState::Released => Some(InputEvent::MouseUp { button }),
            }
        }

        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel {
            delta_y: wheel_delta_y(*delta),
        }),

        WindowEvent::KeyboardInput { event, .. } => {
            let key = key_identifier(&event.logical_key);
            match event.state {
                ElementState::Pressed => Some(InputEvent::KeyDown(key)),
                ElementState::Released => Some(InputEvent::KeyUp(key)),
            }
        }

        _ => None,
    }
}

/// DOM `MouseEvent.button` numbering.
pub fn raw_button(b: WinitMouseButton) -> RawButton {
    match b {
        WinitMouseButton::Left => 0,
        WinitMouseButton::Middle => 1,
        WinitMouseButton::Right => 2,
        WinitMouseButton::Back => 3,
        WinitMouseButton::Forward => 4,
        WinitMouseButton::Other(v) => v,
    }
}

/// DOM `WheelEvent.deltaY` convention: positive scrolls down, in pixels.
///
/// winit reports positive values for scrolling up.
pub fn wheel_delta_y(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -(y as f64) * LINE_DELTA_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y,
    }
}

/// DOM `KeyboardEvent.key` naming for a winit logical key.
pub fn key_identifier(key: &Key) -> String {
    match key {
        Key::Character(s) => s.to_string(),
        Key::Named(named) => named_key_identifier(*named),
        Key::Dead(_) => "Dead".to_string(),
        Key::Unidentified(_) => "Unidentified".to_string(),
    }
}

fn named_key_identifier(named: NamedKey) -> String {
    let name = match named {
        NamedKey::Space => " ",
        NamedKey::Super | NamedKey::Meta => "Meta",
        NamedKey::Control => "Control",
        NamedKey::Alt => "Alt",
        NamedKey::Shift => "Shift",
        NamedKey::Enter => "Enter",
        NamedKey::Escape => "Escape",
        NamedKey::ArrowUp => "ArrowUp",
        NamedKey::ArrowDown => "ArrowDown",
        NamedKey::ArrowLeft => "ArrowLeft",
        NamedKey::ArrowRight => "ArrowRight",
        // winit's variant names already follow DOM naming for the rest (F1, Tab, ...).
        other => return format!("{other:?}"),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tables::key_code;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn character_keys_keep_their_case() {
        assert_eq!(key_identifier(&Key::Character("a".into())), "a");
        assert_eq!(key_identifier(&Key::Character("A".into())), "A");
    }

    #[test]
    fn named_keys_resolve_to_table_codes() {
        let cases = [
            (NamedKey::Space, 42),
            (NamedKey::Super, 36),
            (NamedKey::Control, 37),
            (NamedKey::Alt, 38),
            (NamedKey::Shift, 39),
            (NamedKey::Enter, 40),
            (NamedKey::Escape, 41),
            (NamedKey::ArrowUp, 43),
            (NamedKey::ArrowDown, 44),
            (NamedKey::ArrowLeft, 45),
            (NamedKey::ArrowRight, 46),
        ];
        for (named, code) in cases {
            let id = key_identifier(&Key::Named(named));
            assert_eq!(key_code(&id), Some(code), "{named:?} -> {id:?}");
        }
    }

    #[test]
    fn unsupported_named_keys_miss_the_table() {
        let id = key_identifier(&Key::Named(NamedKey::F1));
        assert_eq!(id, "F1");
        assert_eq!(key_code(&id), None);
    }

    #[test]
    fn buttons_use_dom_numbering() {
        assert_eq!(raw_button(WinitMouseButton::Left), 0);
        assert_eq!(raw_button(WinitMouseButton::Middle), 1);
        assert_eq!(raw_button(WinitMouseButton::Right), 2);
        assert_eq!(raw_button(WinitMouseButton::Other(9)), 9);
    }

    #[test]
    fn wheel_sign_follows_dom() {
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 1.0)), -100.0);
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -2.0)), 200.0);
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -35.0))),
            35.0
        );
    }
}
