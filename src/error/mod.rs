//! Error types for Gemini client setup and model use.

mod categories;
mod mapper;
mod types;

pub use categories::*;
pub use mapper::*;
pub use types::*;
