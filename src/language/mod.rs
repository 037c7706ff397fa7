// Types representing music read from Scribe files

mod clef;
mod error;
mod types;

// Re-export all public symbols
pub use clef::*;
pub use error::*;
pub use types::*;
