//! Battle view core for an isometric, turn-based tactics game.
//!
//! Two subsystems live here. The camera maps between map cells (and
//! sub-cell voxels) and screen pixels under a 2:1 diamond projection,
//! and owns the scroll offset, viewed level, and edge-scroll state. The
//! inventory model governs how items with rectangular footprints occupy
//! container cells across body slots, hands, and the ground pile, and
//! runs the pick-up / place / load / unload state machine with its
//! time-unit cost gating.
//!
//! Everything platform-shaped -- pixels, sounds, timers, the turn
//! engine's stat bookkeeping -- sits behind the trait seams in
//! [`services`]; the host game plugs in real implementations, tests
//! plug in fakes.

pub mod battlefield;
pub mod camera;
pub mod inventory;
pub mod item;
pub mod position;
pub mod services;

pub use battlefield::{BattleUnit, Battlefield, Tile, UnitId};
pub use camera::Camera;
pub use inventory::{
    ContainerDefinition, ContainerKind, ContainerRegistry, MouseButton, PlacementDenied,
    PlacementSession,
};
pub use item::{BattleItem, ItemDefinition, ItemId, ItemRegistry, Placement, RegistryError};
pub use position::{GridPosition, ScreenPosition, ViewOffset, VoxelPosition};
