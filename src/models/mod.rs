pub mod activity;
pub mod cycle;
pub mod landmark;
pub mod session;
pub mod stats;
