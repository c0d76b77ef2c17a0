mod countdown;
mod game;

pub use countdown::Countdown;
pub use game::Rummage;
