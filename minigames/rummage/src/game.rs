use glam::{Mat4, Vec3};
use jamboree_host::{
    ColorDepth, DisplayConfig, FilterMode, GammaMode, HostContext, HostError, Minigame,
    MinigameDef, ModelHandle, PlayerId, RenderHandle, Rgba, ViewportId,
};

use crate::countdown::Countdown;

/// Seconds on the opening countdown before the round resolves.
const COUNTDOWN_DELAY: f32 = 3.0;
/// Backdrop clear color (0xRRGGBBAA).
const GAME_BACKGROUND: u32 = 0xffff00ff;
/// Placeholder: no rummaging or key-stealing is scored yet, so the round
/// always goes to the first player.
const WINNER: PlayerId = PlayerId(0);

const CAMERA_EYE: Vec3 = Vec3::new(0.0, 100.0, 150.0);
const CAMERA_TARGET: Vec3 = Vec3::ZERO;
const LIGHT_DIR: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const AMBIENT_COLOR: Rgba = Rgba::new(0xaa, 0xaa, 0xaa, 0xff);
const DIRECTIONAL_COLOR: Rgba = Rgba::new(0xff, 0xaa, 0xaa, 0xff);
const FOV_DEGREES: f32 = 90.0;
const NEAR_PLANE: f32 = 20.0;
const FAR_PLANE: f32 = 160.0;
const ROOM_MODEL: &str = "rom:/rummage/room.t3dm";

/// Camera, lighting, and room geometry fixed at init for the whole
/// session.
struct SceneSetup {
    viewport: ViewportId,
    eye: Vec3,
    target: Vec3,
    light_dir: Vec3,
    room: ModelHandle,
    room_block: RenderHandle,
}

/// The Rummage minigame.
///
/// Currently just the opening countdown over the static room scene: the
/// timer runs down, the placeholder winner is declared, and the session
/// ends.
pub struct Rummage {
    countdown: Countdown,
    scene: Option<SceneSetup>,
}

impl Rummage {
    pub fn new() -> Self {
        Self {
            countdown: Countdown::new(COUNTDOWN_DELAY),
            scene: None,
        }
    }

    /// Seconds left on the opening countdown.
    pub fn countdown_remaining(&self) -> f32 {
        self.countdown.remaining()
    }
}

impl Default for Rummage {
    fn default() -> Self {
        Self::new()
    }
}

impl Minigame for Rummage {
    fn def(&self) -> MinigameDef {
        MinigameDef {
            name: "Rummage".into(),
            author: "tfmoe__".into(),
            description: "Find the key and be the first to open the safe!".into(),
            instructions: "Press A to rummage through the furniture or to steal the key.".into(),
        }
    }

    fn init(&mut self, ctx: &mut HostContext) -> Result<(), HostError> {
        ctx.gfx.display_init(&DisplayConfig {
            width: 320,
            height: 240,
            depth: ColorDepth::Bpp16,
            buffer_count: 3,
            gamma: GammaMode::None,
            filter: FilterMode::Resample,
        })?;
        ctx.gfx.context_init()?;
        let viewport = ctx.gfx.viewport_create();

        // Compile the static room into a replayable draw sequence.
        let room = ctx.gfx.load_model(ROOM_MODEL)?;
        ctx.gfx.begin_recording();
        ctx.gfx.push_matrix(Mat4::IDENTITY);
        ctx.gfx.draw_model(&room);
        ctx.gfx.pop_matrix(1);
        let room_block = ctx.gfx.end_recording();

        self.scene = Some(SceneSetup {
            viewport,
            eye: CAMERA_EYE,
            target: CAMERA_TARGET,
            light_dir: LIGHT_DIR.normalize(),
            room,
            room_block,
        });
        self.countdown = Countdown::new(COUNTDOWN_DELAY);
        log::info!("rummage: scene ready, countdown {COUNTDOWN_DELAY}s");
        Ok(())
    }

    fn fixed_update(&mut self, ctx: &mut HostContext, dt: f32) {
        if self.countdown.tick(dt) {
            ctx.declare_winner(WINNER);
            ctx.end_game();
        }
    }

    fn update(&mut self, ctx: &mut HostContext, _dt: f32) {
        let Some(scene) = &self.scene else { return };

        ctx.gfx.viewport_set_projection(
            scene.viewport,
            FOV_DEGREES.to_radians(),
            NEAR_PLANE,
            FAR_PLANE,
        );
        ctx.gfx
            .viewport_look_at(scene.viewport, scene.eye, scene.target, Vec3::Y);

        ctx.gfx.frame_begin(scene.viewport);
        ctx.gfx.clear_color(Rgba::from_packed(GAME_BACKGROUND));
        ctx.gfx.clear_depth();
        ctx.gfx.set_ambient_light(AMBIENT_COLOR);
        ctx.gfx
            .set_directional_light(0, DIRECTIONAL_COLOR, scene.light_dir);
        ctx.gfx.set_light_count(1);
        ctx.gfx.replay(&scene.room_block);
        ctx.gfx.present();
    }

    fn cleanup(&mut self, ctx: &mut HostContext) {
        if let Some(scene) = self.scene.take() {
            ctx.gfx.free_render_handle(scene.room_block);
            ctx.gfx.free_model(scene.room);
        }
        ctx.gfx.context_destroy();
        ctx.gfx.display_close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamboree_host::{HeadlessGraphics, SessionPhase, SessionRunner};

    const EPSILON: f32 = 1e-4;

    fn session() -> SessionRunner<Rummage, HeadlessGraphics> {
        SessionRunner::new(Rummage::new(), HeadlessGraphics::new())
    }

    #[test]
    fn stays_running_under_three_seconds() {
        let mut session = session();
        session.init().unwrap();

        let steps = [0.5, 0.25, 1.0, 0.75];
        for dt in steps {
            session.fixed_tick(dt).unwrap();
        }

        let elapsed: f32 = steps.iter().sum();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(
            (session.minigame().countdown_remaining() - (COUNTDOWN_DELAY - elapsed)).abs()
                < EPSILON
        );
    }

    #[test]
    fn three_one_second_ticks_resolve_the_round() {
        let mut session = session();
        session.init().unwrap();

        session.fixed_tick(1.0).unwrap();
        assert!((session.minigame().countdown_remaining() - 2.0).abs() < EPSILON);
        assert_eq!(session.phase(), SessionPhase::Running);

        session.fixed_tick(1.0).unwrap();
        assert!((session.minigame().countdown_remaining() - 1.0).abs() < EPSILON);
        assert_eq!(session.phase(), SessionPhase::Running);

        session.fixed_tick(1.0).unwrap();
        assert!(session.minigame().countdown_remaining().abs() < EPSILON);
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.winner(), Some(WINNER));
    }

    #[test]
    fn overshoot_resolves_on_the_same_tick() {
        let mut session = session();
        session.init().unwrap();

        session.fixed_tick(5.0).unwrap();
        assert!((session.minigame().countdown_remaining() + 2.0).abs() < EPSILON);
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.winner(), Some(WINNER));
    }

    #[test]
    fn timer_freezes_after_the_round_resolves() {
        let mut session = session();
        session.init().unwrap();
        session.fixed_tick(5.0).unwrap();

        let frozen = session.minigame().countdown_remaining();
        session.fixed_tick(1.0).unwrap();
        session.fixed_tick(1.0).unwrap();
        assert_eq!(session.minigame().countdown_remaining(), frozen);
        assert_eq!(session.winner(), Some(WINNER));
    }

    #[test]
    fn frames_never_touch_the_countdown() {
        let mut session = session();
        session.init().unwrap();

        for _ in 0..50 {
            session.frame(1.0 / 60.0).unwrap();
        }
        assert_eq!(session.minigame().countdown_remaining(), COUNTDOWN_DELAY);
        assert_eq!(session.phase(), SessionPhase::Running);

        session.fixed_tick(5.0).unwrap();
        for _ in 0..50 {
            session.frame(1.0 / 60.0).unwrap();
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
    }

    #[test]
    fn frames_present_the_room_scene() {
        let mut session = session();
        session.init().unwrap();
        session.frame(1.0 / 60.0).unwrap();
        session.frame(1.0 / 60.0).unwrap();

        let counters = session.graphics().counters();
        assert_eq!(counters.frames_presented, 2);
        assert_eq!(counters.replays, 2);
        assert_eq!(
            session.graphics().last_clear_color(),
            Some(Rgba::from_packed(GAME_BACKGROUND))
        );
    }

    #[test]
    fn full_session_balances_every_resource() {
        let mut session = session();
        session.init().unwrap();

        while session.phase() == SessionPhase::Running {
            session.tick(1.0 / 60.0).unwrap();
        }
        session.cleanup().unwrap();

        let gfx = session.into_graphics();
        assert!(gfx.counters().balanced(), "{:?}", gfx.counters());
        assert_eq!(gfx.live_model_count(), 0);
        assert_eq!(gfx.live_sequence_count(), 0);
        assert!(!gfx.is_context_active());
        assert!(!gfx.is_display_open());
    }

    #[test]
    fn missing_room_model_aborts_init() {
        let mut gfx = HeadlessGraphics::new();
        gfx.set_refuse_loads(true);
        let mut session = SessionRunner::new(Rummage::new(), gfx);

        let err = session.init().unwrap_err();
        assert!(matches!(err, HostError::ResourceUnavailable { .. }));
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn descriptor_matches_the_cartridge_menu_entry() {
        let def = Rummage::new().def();
        assert_eq!(def.name, "Rummage");
        assert_eq!(def.author, "tfmoe__");
        assert_eq!(
            def.description,
            "Find the key and be the first to open the safe!"
        );
        assert_eq!(
            def.instructions,
            "Press A to rummage through the furniture or to steal the key."
        );
    }
}
