pub mod api;
pub mod core;
pub mod error;
pub mod gfx;

// Re-export key types at crate root for convenience
pub use api::minigame::{HostConfig, HostContext, Minigame, MinigameDef, SessionSignals};
pub use api::types::{PlayerId, Rgba};
pub use core::session::{SessionPhase, SessionRunner};
pub use core::time::FixedTimestep;
pub use error::HostError;
pub use gfx::headless::{HeadlessGraphics, ResourceCounters};
pub use gfx::service::{
    ColorDepth, DisplayConfig, FilterMode, GammaMode, GraphicsService, ModelHandle, RenderHandle,
    ViewportId,
};
