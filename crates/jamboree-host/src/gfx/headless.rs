use glam::{Mat4, Vec3};

use crate::api::types::Rgba;
use crate::error::HostError;
use crate::gfx::service::{DisplayConfig, GraphicsService, ModelHandle, RenderHandle, ViewportId};

/// Acquire/release tallies kept by `HeadlessGraphics`.
///
/// Tests assert `balanced()` after a full session to prove every
/// resource acquired at init was released exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounters {
    pub displays_opened: u32,
    pub displays_closed: u32,
    pub contexts_created: u32,
    pub contexts_destroyed: u32,
    pub models_loaded: u32,
    pub models_freed: u32,
    pub sequences_recorded: u32,
    pub sequences_freed: u32,
    pub replays: u32,
    pub frames_presented: u32,
    /// Invalid operations observed (freeing an unknown handle, replaying
    /// a freed sequence, unmatched recording calls).
    pub misuse: u32,
}

impl ResourceCounters {
    /// True when every acquire has exactly one matching release and no
    /// misuse was observed.
    pub fn balanced(&self) -> bool {
        self.displays_opened == self.displays_closed
            && self.contexts_created == self.contexts_destroyed
            && self.models_loaded == self.models_freed
            && self.sequences_recorded == self.sequences_freed
            && self.misuse == 0
    }
}

/// No-op graphics backend that validates call discipline.
///
/// Draw state is discarded; what it keeps is the set of live handles and
/// the acquire/release tallies, which is exactly what lifecycle tests
/// need.
#[derive(Debug, Default)]
pub struct HeadlessGraphics {
    counters: ResourceCounters,
    display_open: bool,
    context_active: bool,
    next_handle: u32,
    live_models: Vec<u32>,
    live_sequences: Vec<u32>,
    recording: Option<u32>,
    viewports: u32,
    last_clear_color: Option<Rgba>,
    light_count: u32,
    refuse_loads: bool,
}

impl HeadlessGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `load_model` fail, to exercise the fatal
    /// init path.
    pub fn set_refuse_loads(&mut self, refuse: bool) {
        self.refuse_loads = refuse;
    }

    pub fn counters(&self) -> ResourceCounters {
        self.counters
    }

    pub fn is_display_open(&self) -> bool {
        self.display_open
    }

    pub fn is_context_active(&self) -> bool {
        self.context_active
    }

    pub fn live_model_count(&self) -> usize {
        self.live_models.len()
    }

    pub fn live_sequence_count(&self) -> usize {
        self.live_sequences.len()
    }

    pub fn last_clear_color(&self) -> Option<Rgba> {
        self.last_clear_color
    }

    fn fresh_handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn misuse(&mut self, what: &str) {
        self.counters.misuse += 1;
        log::warn!("headless gfx misuse: {what}");
    }
}

impl GraphicsService for HeadlessGraphics {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn display_init(&mut self, config: &DisplayConfig) -> Result<(), HostError> {
        if self.display_open {
            self.misuse("display_init while display open");
        }
        if config.buffer_count == 0 {
            return Err(HostError::resource("display with zero framebuffers"));
        }
        self.display_open = true;
        self.counters.displays_opened += 1;
        Ok(())
    }

    fn display_close(&mut self) {
        if !self.display_open {
            self.misuse("display_close without open display");
            return;
        }
        self.display_open = false;
        self.counters.displays_closed += 1;
    }

    fn context_init(&mut self) -> Result<(), HostError> {
        if !self.display_open {
            return Err(HostError::resource("3d context requires an open display"));
        }
        if self.context_active {
            self.misuse("context_init while context active");
        }
        self.context_active = true;
        self.counters.contexts_created += 1;
        Ok(())
    }

    fn context_destroy(&mut self) {
        if !self.context_active {
            self.misuse("context_destroy without active context");
            return;
        }
        self.context_active = false;
        self.counters.contexts_destroyed += 1;
    }

    fn viewport_create(&mut self) -> ViewportId {
        self.viewports += 1;
        ViewportId::from_raw(self.viewports)
    }

    fn viewport_set_projection(
        &mut self,
        _viewport: ViewportId,
        _fov_radians: f32,
        _near: f32,
        _far: f32,
    ) {
    }

    fn viewport_look_at(&mut self, _viewport: ViewportId, _eye: Vec3, _target: Vec3, _up: Vec3) {}

    fn load_model(&mut self, path: &str) -> Result<ModelHandle, HostError> {
        if !self.context_active {
            return Err(HostError::resource(format!(
                "model load without active context: {path}"
            )));
        }
        if self.refuse_loads {
            return Err(HostError::resource(format!("model not found: {path}")));
        }
        let raw = self.fresh_handle();
        self.live_models.push(raw);
        self.counters.models_loaded += 1;
        Ok(ModelHandle::from_raw(raw))
    }

    fn free_model(&mut self, model: ModelHandle) {
        match self.live_models.iter().position(|&m| m == model.raw()) {
            Some(idx) => {
                self.live_models.swap_remove(idx);
                self.counters.models_freed += 1;
            }
            None => self.misuse("free_model on unknown handle"),
        }
    }

    fn begin_recording(&mut self) {
        if self.recording.is_some() {
            self.misuse("begin_recording while already recording");
        }
        self.recording = Some(0);
    }

    fn push_matrix(&mut self, _transform: Mat4) {
        match &mut self.recording {
            Some(ops) => *ops += 1,
            None => self.misuse("push_matrix outside recording"),
        }
    }

    fn draw_model(&mut self, model: &ModelHandle) {
        if !self.live_models.contains(&model.raw()) {
            self.misuse("draw_model on unknown handle");
            return;
        }
        match &mut self.recording {
            Some(ops) => *ops += 1,
            None => self.misuse("draw_model outside recording"),
        }
    }

    fn pop_matrix(&mut self, count: u32) {
        match &mut self.recording {
            Some(ops) => *ops += count,
            None => self.misuse("pop_matrix outside recording"),
        }
    }

    fn end_recording(&mut self) -> RenderHandle {
        if self.recording.take().is_none() {
            self.misuse("end_recording without begin_recording");
        }
        let raw = self.fresh_handle();
        self.live_sequences.push(raw);
        self.counters.sequences_recorded += 1;
        RenderHandle::from_raw(raw)
    }

    fn replay(&mut self, handle: &RenderHandle) {
        if !self.live_sequences.contains(&handle.raw()) {
            self.misuse("replay of unknown or freed sequence");
            return;
        }
        self.counters.replays += 1;
    }

    fn free_render_handle(&mut self, handle: RenderHandle) {
        match self.live_sequences.iter().position(|&s| s == handle.raw()) {
            Some(idx) => {
                self.live_sequences.swap_remove(idx);
                self.counters.sequences_freed += 1;
            }
            None => self.misuse("free_render_handle on unknown handle"),
        }
    }

    fn frame_begin(&mut self, _viewport: ViewportId) {}

    fn clear_color(&mut self, color: Rgba) {
        self.last_clear_color = Some(color);
    }

    fn clear_depth(&mut self) {}

    fn set_ambient_light(&mut self, _color: Rgba) {}

    fn set_directional_light(&mut self, _index: u32, _color: Rgba, _direction: Vec3) {}

    fn set_light_count(&mut self, count: u32) {
        self.light_count = count;
    }

    fn present(&mut self) {
        self.counters.frames_presented += 1;
    }
}
