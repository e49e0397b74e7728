pub mod classify;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod session;
pub mod stats;
pub mod timer;
