//! Platform adapters that turn windowing events into [`InputEvent`](super::InputEvent)s.

pub mod winit;
