//! Infrastructure layer
//!
//! Handles all I/O with the outside world: spawning toolchain processes and
//! locating the project on disk.

pub mod dirs;
pub mod executor;
pub mod workdir;
