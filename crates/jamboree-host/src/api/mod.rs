pub mod minigame;
pub mod types;
