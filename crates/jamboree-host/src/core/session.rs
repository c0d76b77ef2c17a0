use crate::api::minigame::{HostConfig, HostContext, Minigame, MinigameDef, SessionSignals};
use crate::api::types::PlayerId;
use crate::core::time::FixedTimestep;
use crate::error::HostError;
use crate::gfx::service::GraphicsService;

/// Lifecycle phase of one minigame session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Running,
    Finished,
    TornDown,
}

/// Drives one minigame session against a graphics backend.
///
/// The runner owns the minigame and the backend, enforces the legal
/// entry-point sequence, and turns the game's end signal into the
/// Running → Finished transition. Out-of-sequence calls come back as
/// `HostError::InvalidState` instead of corrupting the session.
pub struct SessionRunner<M: Minigame, G: GraphicsService> {
    minigame: M,
    gfx: G,
    config: HostConfig,
    signals: SessionSignals,
    phase: SessionPhase,
    timestep: FixedTimestep,
}

impl<M: Minigame, G: GraphicsService> SessionRunner<M, G> {
    pub fn new(minigame: M, gfx: G) -> Self {
        let config = minigame.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        Self {
            minigame,
            gfx,
            config,
            signals: SessionSignals::default(),
            phase: SessionPhase::Uninitialized,
            timestep,
        }
    }

    pub fn def(&self) -> MinigameDef {
        self.minigame.def()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The declared winner, if the session has resolved.
    pub fn winner(&self) -> Option<PlayerId> {
        self.signals.winner()
    }

    pub fn minigame(&self) -> &M {
        &self.minigame
    }

    pub fn graphics(&self) -> &G {
        &self.gfx
    }

    /// Tear the runner apart and hand back the graphics backend.
    pub fn into_graphics(self) -> G {
        self.gfx
    }

    /// Initialize the minigame. Legal only once, from Uninitialized.
    /// Init failures propagate unchanged and leave the session unstarted.
    pub fn init(&mut self) -> Result<(), HostError> {
        if self.phase != SessionPhase::Uninitialized {
            return Err(HostError::InvalidState {
                entry: "init",
                phase: self.phase,
            });
        }
        let mut ctx = HostContext::new(&mut self.gfx, &self.config, &mut self.signals);
        self.minigame.init(&mut ctx)?;
        self.phase = SessionPhase::Running;
        log::info!("session running: {}", self.minigame.def().name);
        Ok(())
    }

    /// One fixed simulation step. Legal while Running; tolerated (as a
    /// no-op) while Finished, since the host may keep ticking until it
    /// notices the end signal.
    pub fn fixed_tick(&mut self, dt: f32) -> Result<(), HostError> {
        match self.phase {
            SessionPhase::Running => {}
            SessionPhase::Finished => return Ok(()),
            phase => {
                return Err(HostError::InvalidState {
                    entry: "fixed_tick",
                    phase,
                })
            }
        }
        let mut ctx = HostContext::new(&mut self.gfx, &self.config, &mut self.signals);
        self.minigame.fixed_update(&mut ctx, dt);
        if self.signals.is_ended() {
            self.phase = SessionPhase::Finished;
            match self.signals.winner() {
                Some(winner) => log::info!("session finished, winner: player {}", winner.0),
                None => log::warn!("session finished with no winner declared"),
            }
        }
        Ok(())
    }

    /// Present one frame. Legal while Running or Finished; never touches
    /// simulation state.
    pub fn frame(&mut self, dt: f32) -> Result<(), HostError> {
        match self.phase {
            SessionPhase::Running | SessionPhase::Finished => {}
            phase => {
                return Err(HostError::InvalidState {
                    entry: "frame",
                    phase,
                })
            }
        }
        let mut ctx = HostContext::new(&mut self.gfx, &self.config, &mut self.signals);
        self.minigame.update(&mut ctx, dt);
        Ok(())
    }

    /// Convenience driver: accumulate frame time, run the due fixed
    /// steps, then present one frame.
    pub fn tick(&mut self, frame_dt: f32) -> Result<(), HostError> {
        match self.phase {
            SessionPhase::Running | SessionPhase::Finished => {}
            phase => {
                return Err(HostError::InvalidState {
                    entry: "tick",
                    phase,
                })
            }
        }
        let steps = self.timestep.steps(frame_dt);
        for _ in 0..steps {
            self.fixed_tick(self.timestep.dt())?;
        }
        self.frame(frame_dt)
    }

    /// Release the minigame's resources. Legal from Finished, or from
    /// Running when the host force-stops a session. A second cleanup is
    /// an error, not undefined behavior.
    pub fn cleanup(&mut self) -> Result<(), HostError> {
        match self.phase {
            SessionPhase::Running | SessionPhase::Finished => {}
            phase => {
                return Err(HostError::InvalidState {
                    entry: "cleanup",
                    phase,
                })
            }
        }
        let mut ctx = HostContext::new(&mut self.gfx, &self.config, &mut self.signals);
        self.minigame.cleanup(&mut ctx);
        self.phase = SessionPhase::TornDown;
        log::info!("session torn down: {}", self.minigame.def().name);
        Ok(())
    }
}
