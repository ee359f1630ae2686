#![no_std] // Shared by the WASM-friendly analyzer crate

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

// Re-export core types for convenience
pub use ids::BunsetsuId;
pub use morphology::*;

pub mod model;
pub use model::*;
