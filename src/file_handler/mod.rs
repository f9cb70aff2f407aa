//! File handler module for mdpress
//!
//! Handles all file system operations:
//! - Reading markdown input with encoding detection
//! - Atomic writes of the rendered output

pub mod io;

pub use io::*;
