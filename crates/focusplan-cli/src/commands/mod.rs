pub mod config;
pub mod plan;
pub mod stats;
pub mod timer;
