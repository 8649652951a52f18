// src/core/ignore.rs
mod loader;
mod patterns;

pub use loader::{IGNORE_FILE, load_ignore_patterns};
pub use patterns::Patterns;
