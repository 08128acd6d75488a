//! Input subsystem.
//!
//! Public API is platform-agnostic: [`InputDispatcher`] consumes [`InputEvent`]s and
//! forwards them to the compute module as table codes. Platform adapters under
//! [`platform`] translate windowing events into `InputEvent`s.

mod dispatch;
pub mod platform;
mod state;
pub mod tables;
mod types;

pub use dispatch::InputDispatcher;
pub use state::PointerState;
pub use types::{Dispatch, InputEvent, RawButton};
