pub mod core;
pub mod utils;

// Re-export everything from core and utils for ergonomic library use
// Users can write `legwork::bootstrap` instead of `legwork::core::bootstrap`
pub use self::core::*;
pub use self::utils::*;
