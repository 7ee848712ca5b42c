//! Core of magdock: the proximity magnification engine, the layout fold it
//! drives, the activation state machine, and the views that turn a dock
//! snapshot into render commands.

pub mod config;
pub mod engine;
pub mod model;
pub mod session;
pub mod svg;
pub mod views;

pub use config::{ConfigError, DockConfig};
pub use session::{DockSession, DockSnapshot, ItemView};
