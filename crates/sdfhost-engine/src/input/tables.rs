//! Code tables shared with the compute module.
//!
//! Lookups are case-sensitive, but upper- and lowercase letters share a code.

use super::types::RawButton;

/// Key identifier → key code.
#[rustfmt::skip]
pub const KEY_CODES: [(&str, i32); 73] = [
    ("a", 0), ("b", 1), ("c", 2), ("d", 3), ("e", 4), ("f", 5), ("g", 6),
    ("h", 7), ("i", 8), ("j", 9), ("k", 10), ("l", 11), ("m", 12), ("n", 13),
    ("o", 14), ("p", 15), ("q", 16), ("r", 17), ("s", 18), ("t", 19), ("u", 20),
    ("v", 21), ("w", 22), ("x", 23), ("y", 24), ("z", 25),
    ("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4), ("F", 5), ("G", 6),
    ("H", 7), ("I", 8), ("J", 9), ("K", 10), ("L", 11), ("M", 12), ("N", 13),
    ("O", 14), ("P", 15), ("Q", 16), ("R", 17), ("S", 18), ("T", 19), ("U", 20),
    ("V", 21), ("W", 22), ("X", 23), ("Y", 24), ("Z", 25),
    ("0", 26), ("1", 27), ("2", 28), ("3", 29), ("4", 30),
    ("5", 31), ("6", 32), ("7", 33), ("8", 34), ("9", 35),
    ("Meta", 36),
    ("Control", 37),
    ("Alt", 38),
    ("Shift", 39),
    ("Enter", 40),
    ("Escape", 41),
    (" ", 42),
    ("ArrowUp", 43),
    ("ArrowDown", 44),
    ("ArrowLeft", 45),
    ("ArrowRight", 46),
];

/// Raw button index → button code (primary 1, auxiliary 2, secondary 3).
pub const BUTTON_CODES: [(RawButton, i32); 3] = [(0, 1), (1, 2), (2, 3)];

pub fn key_code(raw_key: &str) -> Option<i32> {
    KEY_CODES
        .iter()
        .find(|(name, _)| *name == raw_key)
        .map(|&(_, code)| code)
}

pub fn button_code(raw_button: RawButton) -> Option<i32> {
    BUTTON_CODES
        .iter()
        .find(|(raw, _)| *raw == raw_button)
        .map(|&(_, code)| code)
}
