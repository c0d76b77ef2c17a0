use serde::{Deserialize, Serialize};

use crate::api::types::PlayerId;
use crate::error::HostError;
use crate::gfx::service::GraphicsService;

/// Static metadata describing a minigame to the host's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameDef {
    /// Display name shown in the minigame picker.
    pub name: String,
    /// Credited author.
    pub author: String,
    /// One-line pitch shown next to the name.
    pub description: String,
    /// How-to-play text shown on the intro screen.
    pub instructions: String,
}

impl MinigameDef {
    /// Serialize for host-side menu listings.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Per-session engine configuration, provided by the minigame.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Fixed simulation timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Number of participants in the session (default: 4).
    pub player_count: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            player_count: 4,
        }
    }
}

/// Out-signals a minigame raises toward the host during a session.
/// Owned by the session runner; minigames write through `HostContext`.
#[derive(Debug, Default)]
pub struct SessionSignals {
    winner: Option<PlayerId>,
    ended: bool,
}

impl SessionSignals {
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

/// Host-side state handed to every minigame entry point.
pub struct HostContext<'a> {
    /// The opaque 3D graphics service supplied by the host.
    pub gfx: &'a mut dyn GraphicsService,
    config: &'a HostConfig,
    signals: &'a mut SessionSignals,
}

impl<'a> HostContext<'a> {
    pub fn new(
        gfx: &'a mut dyn GraphicsService,
        config: &'a HostConfig,
        signals: &'a mut SessionSignals,
    ) -> Self {
        Self {
            gfx,
            config,
            signals,
        }
    }

    pub fn player_count(&self) -> u32 {
        self.config.player_count
    }

    /// Declare the session winner. The first declaration sticks; repeats
    /// are logged and ignored.
    pub fn declare_winner(&mut self, player: PlayerId) {
        if let Some(existing) = self.signals.winner {
            log::warn!(
                "winner already declared as player {}, ignoring player {}",
                existing.0,
                player.0
            );
            return;
        }
        self.signals.winner = Some(player);
    }

    /// Signal that the minigame session is over. Idempotent; the runner
    /// picks this up after the current fixed step.
    pub fn end_game(&mut self) {
        self.signals.ended = true;
    }
}

/// The contract every minigame must fulfill.
///
/// The host drives these entry points synchronously and in sequence:
/// `init` once, then interleaved `fixed_update` (simulation, fixed dt)
/// and `update` (presentation, frame dt), then `cleanup` once.
pub trait Minigame {
    /// Static descriptor for the host menu.
    fn def(&self) -> MinigameDef;

    /// Return engine configuration. Called once before init.
    fn config(&self) -> HostConfig {
        HostConfig::default()
    }

    /// Acquire resources and set up the scene. Errors abort the session.
    fn init(&mut self, ctx: &mut HostContext) -> Result<(), HostError>;

    /// One simulation step at the fixed timestep. `dt >= 0`.
    fn fixed_update(&mut self, ctx: &mut HostContext, dt: f32);

    /// Present one frame. Must not affect simulation state.
    fn update(&mut self, ctx: &mut HostContext, dt: f32);

    /// Release every resource acquired in `init`.
    fn cleanup(&mut self, ctx: &mut HostContext);
}
