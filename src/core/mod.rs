pub mod analysis;
pub mod calculator;
pub mod classifier;
pub mod feedback;
pub mod log;
pub mod session;
pub mod timer;
