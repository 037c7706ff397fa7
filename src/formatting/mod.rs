//! Printing parsed Scribe documents back out for inspection

pub mod formatter;
mod renderer;
mod syntax;

// Re-export all public symbols
pub use renderer::*;
pub use syntax::*;
