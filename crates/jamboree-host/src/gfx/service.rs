//! Graphics service boundary.
//!
//! The real 3D pipeline (display, rasterizer, model formats, command
//! compiler) belongs to the host runtime, not to this crate. This trait
//! defines the contract minigames program against; `HeadlessGraphics`
//! is the in-tree backend for tests and headless runs.

use glam::{Mat4, Vec3};

use crate::api::types::Rgba;
use crate::error::HostError;

/// Color depth of the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Bpp16,
    Bpp32,
}

/// Gamma handling applied on scan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GammaMode {
    None,
    Correct,
}

/// Output filtering applied on scan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    None,
    Resample,
    Dedither,
    ResampleAntialias,
}

/// Output surface configuration, handed to the service once at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub depth: ColorDepth,
    /// Number of framebuffers to rotate through.
    pub buffer_count: u32,
    pub gamma: GammaMode,
    pub filter: FilterMode,
}

impl DisplayConfig {
    /// 320x240, 16 bpp, triple buffered, resampled. The common cartridge setup.
    pub const fn standard() -> Self {
        Self {
            width: 320,
            height: 240,
            depth: ColorDepth::Bpp16,
            buffer_count: 3,
            gamma: GammaMode::None,
            filter: FilterMode::Resample,
        }
    }
}

/// Opaque handle to a model loaded and owned by the graphics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(u32);

impl ModelHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to a precompiled, replayable draw-command sequence.
///
/// Deliberately neither `Copy` nor `Clone`: `free_render_handle`
/// consumes the handle, so a freed sequence cannot be replayed.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(u32);

impl RenderHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to a viewport created by the graphics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportId(u32);

impl ViewportId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// The host-supplied 3D graphics service.
///
/// Minigames reach this through `HostContext::gfx`. Calls are
/// single-threaded and host-sequenced; implementations never need
/// internal locking.
pub trait GraphicsService {
    /// Backend identifier (e.g. "headless", "t3d").
    fn backend(&self) -> &'static str;

    // -- Display and rendering context --

    /// Configure the output surface. Fatal on failure.
    fn display_init(&mut self, config: &DisplayConfig) -> Result<(), HostError>;

    /// Release the output surface.
    fn display_close(&mut self);

    /// Acquire the 3D rendering context. Fatal on failure.
    fn context_init(&mut self) -> Result<(), HostError>;

    /// Release the 3D rendering context.
    fn context_destroy(&mut self);

    // -- Camera --

    fn viewport_create(&mut self) -> ViewportId;

    fn viewport_set_projection(
        &mut self,
        viewport: ViewportId,
        fov_radians: f32,
        near: f32,
        far: f32,
    );

    fn viewport_look_at(&mut self, viewport: ViewportId, eye: Vec3, target: Vec3, up: Vec3);

    // -- Assets --

    /// Load a model by logical path (e.g. a ROM-relative identifier).
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, HostError>;

    fn free_model(&mut self, model: ModelHandle);

    // -- Precompiled command sequences --

    /// Start recording draw commands into a replayable sequence.
    fn begin_recording(&mut self);

    /// Record a matrix push onto the transform stack.
    fn push_matrix(&mut self, transform: Mat4);

    /// Record a draw of the given model under the current transform.
    fn draw_model(&mut self, model: &ModelHandle);

    /// Record popping `count` matrices off the transform stack.
    fn pop_matrix(&mut self, count: u32);

    /// Finish recording and return the compiled sequence.
    fn end_recording(&mut self) -> RenderHandle;

    /// Replay a previously compiled sequence.
    fn replay(&mut self, handle: &RenderHandle);

    /// Release a compiled sequence. Consumes the handle.
    fn free_render_handle(&mut self, handle: RenderHandle);

    // -- Per-frame render state --

    /// Begin a frame targeting the given viewport.
    fn frame_begin(&mut self, viewport: ViewportId);

    fn clear_color(&mut self, color: Rgba);

    fn clear_depth(&mut self);

    fn set_ambient_light(&mut self, color: Rgba);

    fn set_directional_light(&mut self, index: u32, color: Rgba, direction: Vec3);

    fn set_light_count(&mut self, count: u32);

    /// Flush and swap to the display.
    fn present(&mut self);
}
