pub mod headless;
pub mod service;
