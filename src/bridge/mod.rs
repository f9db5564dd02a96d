pub mod base;
pub mod frame;
pub mod http_bridge;
pub mod static_bridge;

// Re-export from base.rs so we can do "use crate::bridge::*;"
pub use base::*;
pub use frame::{ConsoleFrame, FrameContext};
