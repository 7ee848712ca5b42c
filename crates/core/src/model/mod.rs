pub mod item;
pub mod vectors;

pub use item::{DockItem, ItemSpec};
pub use vectors::{PositionVector, ScaleVector};
