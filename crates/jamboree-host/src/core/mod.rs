pub mod session;
pub mod time;
