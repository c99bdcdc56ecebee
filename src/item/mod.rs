// Item system module
//
// This module provides the battle item system:
// - Item definitions (footprint, ammo compatibility, sprite)
// - Item registry for centralized definition storage
// - Battle item instances (placement, owner, loaded ammo)

pub mod battle_item;
pub mod definition;
pub mod registry;

// Re-export main types for convenient access
pub use battle_item::{BattleItem, ItemId, Placement};
pub use definition::ItemDefinition;
pub use registry::{ItemRegistry, RegistryError};
