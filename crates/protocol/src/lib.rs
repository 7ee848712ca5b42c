pub mod commands;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::RenderCommand;
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Point, Rect, Viewport};
