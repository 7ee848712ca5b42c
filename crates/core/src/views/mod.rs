pub mod bounce;
pub mod dock;

pub use dock::{dock_origin, render_dock};
