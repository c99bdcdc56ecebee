// Inventory system module
//
// This module provides the battle inventory screen's model:
// - Container layout registry (slot grids, hands, the ground strip)
// - Item placement engine (held item, moves, loading, unloading)
// - Placement denial reasons and their warning keys

pub mod error;
pub mod layout;
pub mod placement;

// Re-export main types
pub use error::PlacementDenied;
pub use layout::{ContainerDefinition, ContainerKind, ContainerRegistry};
pub use placement::{MouseButton, PlacementSession};
