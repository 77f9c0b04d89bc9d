pub mod import;
pub mod risk;

// Re-export commonly used types
pub use import::*;
pub use risk::*;
