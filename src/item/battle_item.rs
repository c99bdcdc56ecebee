use serde::{Deserialize, Serialize};

use super::definition::ItemDefinition;
use crate::battlefield::UnitId;

/// Handle to a battle item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Where an item currently sits: a container id plus a cell inside it.
///
/// Ground items use the strip's logical cells, which run unbounded to the
/// right; the x here is not necessarily on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub container: String,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(container: impl Into<String>, x: i32, y: i32) -> Self {
        Placement {
            container: container.into(),
            x,
            y,
        }
    }
}

/// An instance of an item on the battlefield
///
/// This represents one concrete item: which type it is, where it sits,
/// who carries it, and what is loaded into it. An item loaded into a
/// weapon has no placement and no owner; it exists only through the
/// weapon's ammo reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleItem {
    /// Instance handle, unique within a battlefield
    pub id: ItemId,

    /// Id of the item definition in ItemRegistry
    pub item_id: String,

    /// Current container cell, or None while loaded into a weapon
    pub placement: Option<Placement>,

    /// Carrying unit; ground items and loaded ammo have none
    pub owner: Option<UnitId>,

    /// Item currently loaded into this one
    pub ammo: Option<ItemId>,
}

impl BattleItem {
    /// Creates an unplaced item instance
    pub fn new(id: ItemId, item_id: impl Into<String>) -> Self {
        BattleItem {
            id,
            item_id: item_id.into(),
            placement: None,
            owner: None,
            ammo: None,
        }
    }

    /// Returns true if this item's footprint covers the given cell of the
    /// given container.
    ///
    /// Pure rectangle test; the hand containers' any-cell matching is the
    /// placement engine's concern.
    pub fn occupies_cell(&self, definition: &ItemDefinition, container: &str, x: i32, y: i32) -> bool {
        match &self.placement {
            Some(p) => {
                p.container == container
                    && x >= p.x
                    && x < p.x + definition.width
                    && y >= p.y
                    && y < p.y + definition.height
            }
            None => false,
        }
    }
}
