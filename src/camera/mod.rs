// Camera module
//
// This module owns the view into the battle map:
// - transform.rs: pure isometric projection math
// - viewport.rs: scroll offset, viewed level, edge scrolling

pub mod transform;
pub mod viewport;

// Re-export main types
pub use viewport::Camera;
