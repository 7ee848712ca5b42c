//! The three engines behind the dock, plus the explicit scheduling
//! primitives they are driven by.
//!
//! ```text
//!   pointer x ─▶ magnify ─▶ ScaleVector ─▶ layout ─▶ PositionVector
//!   click(i)  ─▶ activation ─▶ TimerQueue ─(settle)─▶ activation
//! ```
//!
//! `magnify` spaces its influence zones on the rest layout while `layout`
//! places items by their current scaled widths. The mismatch between the
//! two is what makes neighbours ripple outwards.

pub mod activation;
pub mod layout;
pub mod magnify;
pub mod scheduler;

pub use activation::{Activation, ActivationError, ActivationState, JumpPhase};
pub use layout::{compute_positions, item_at};
pub use magnify::{compute_scales, rest_center, scale_for_distance};
pub use scheduler::{FrameSlot, TaskId, TimerQueue};
