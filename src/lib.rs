pub mod cli;
pub mod compose;
pub mod config;
pub mod drag;
pub mod error;
pub mod probe;
pub mod report;
