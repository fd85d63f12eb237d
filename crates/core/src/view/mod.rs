pub mod engine;
pub mod log;
pub mod region;
