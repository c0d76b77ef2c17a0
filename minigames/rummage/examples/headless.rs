//! Run a full Rummage session against the headless graphics backend.
//!
//! ```sh
//! cargo run --example headless
//! ```

use jamboree_host::{HeadlessGraphics, HostError, SessionPhase, SessionRunner};
use rummage::Rummage;

fn main() -> Result<(), HostError> {
    env_logger::init();

    let mut session = SessionRunner::new(Rummage::new(), HeadlessGraphics::new());
    let def = session.def();
    println!("{} by {}", def.name, def.author);
    println!("  {}", def.description);
    println!("  {}", def.instructions);

    session.init()?;
    let mut frames = 0u32;
    while session.phase() == SessionPhase::Running {
        session.tick(1.0 / 60.0)?;
        frames += 1;
    }

    if let Some(winner) = session.winner() {
        println!("round over after {frames} frames, winner: player {}", winner.0);
    }
    session.cleanup()?;

    let counters = session.into_graphics().counters();
    println!(
        "frames presented: {}, resources balanced: {}",
        counters.frames_presented,
        counters.balanced()
    );
    Ok(())
}
