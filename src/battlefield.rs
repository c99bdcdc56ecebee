// Battlefield state and entity management
//
// This module contains the Battlefield struct which owns all battle
// entities relevant to the view: units, item instances, and the per-tile
// ground piles. Placement semantics (what may go where, at what cost)
// live in the inventory module; this is the state they operate on.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::item::{BattleItem, ItemId, ItemRegistry, RegistryError};
use crate::position::GridPosition;

/// Handle to a battle unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// A unit standing on the battlefield.
///
/// Stats live behind the action-budget seam; the view only needs to know
/// where the unit stands to find its ground pile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleUnit {
    pub id: UnitId,
    pub name: String,
    pub position: GridPosition,
}

/// One map tile's view-relevant state: the pile of items lying on it.
///
/// The pile is ordered; ground arrangement walks it in drop order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tile {
    pub items: Vec<ItemId>,
}

/// Battlefield encapsulates the battle state the view reads and mutates
///
/// Owns all units and item instances. Items are keyed by id so placements,
/// piles and ammo references can point at each other without aliasing.
pub struct Battlefield {
    map_length: i32,
    map_width: i32,
    map_height: i32,
    tiles: HashMap<GridPosition, Tile>,
    units: BTreeMap<UnitId, BattleUnit>,
    items: BTreeMap<ItemId, BattleItem>,
    next_unit_id: u32,
    next_item_id: u32,
}

impl Battlefield {
    /// Creates an empty battlefield of the given size in cells.
    pub fn new(map_length: i32, map_width: i32, map_height: i32) -> Self {
        Battlefield {
            map_length,
            map_width,
            map_height,
            tiles: HashMap::new(),
            units: BTreeMap::new(),
            items: BTreeMap::new(),
            next_unit_id: 1,
            next_item_id: 1,
        }
    }

    pub fn map_length(&self) -> i32 {
        self.map_length
    }

    pub fn map_width(&self) -> i32 {
        self.map_width
    }

    pub fn map_height(&self) -> i32 {
        self.map_height
    }

    /// Returns true if the cell lies inside the map.
    pub fn in_bounds(&self, position: GridPosition) -> bool {
        position.x >= 0
            && position.x < self.map_length
            && position.y >= 0
            && position.y < self.map_width
            && position.z >= 0
            && position.z < self.map_height
    }

    // ======================================================================
    // Units
    // ======================================================================

    /// Adds a unit and returns its handle.
    pub fn add_unit(&mut self, name: impl Into<String>, position: GridPosition) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(
            id,
            BattleUnit {
                id,
                name: name.into(),
                position,
            },
        );
        id
    }

    pub fn unit(&self, id: UnitId) -> Option<&BattleUnit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut BattleUnit> {
        self.units.get_mut(&id)
    }

    // ======================================================================
    // Items
    // ======================================================================

    /// Spawns an unplaced item instance of a registered type.
    ///
    /// Returns an error if the type id is unknown; everything stored in a
    /// battlefield resolves against the registry.
    pub fn spawn_item(
        &mut self,
        registry: &ItemRegistry,
        item_id: &str,
    ) -> Result<ItemId, RegistryError> {
        if !registry.exists(item_id) {
            return Err(RegistryError::UnknownDefinition(item_id.to_string()));
        }
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        self.items.insert(id, BattleItem::new(id, item_id));
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&BattleItem> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut BattleItem> {
        self.items.get_mut(&id)
    }

    /// All items a unit carries, in stable id order.
    pub fn unit_items(&self, unit: UnitId) -> impl Iterator<Item = &BattleItem> {
        self.items
            .values()
            .filter(move |item| item.owner == Some(unit))
    }

    // ======================================================================
    // Ground piles
    // ======================================================================

    /// The pile of items on a tile, in drop order.
    pub fn tile_items(&self, position: GridPosition) -> &[ItemId] {
        self.tiles
            .get(&position)
            .map(|tile| tile.items.as_slice())
            .unwrap_or(&[])
    }

    /// Appends an item to a tile's pile. Out-of-bounds tiles are ignored.
    pub fn push_to_tile(&mut self, position: GridPosition, item: ItemId) {
        if !self.in_bounds(position) {
            return;
        }
        self.tiles.entry(position).or_default().items.push(item);
    }

    /// Removes an item from a tile's pile if present.
    pub fn remove_from_tile(&mut self, position: GridPosition, item: ItemId) {
        if let Some(tile) = self.tiles.get_mut(&position) {
            tile.items.retain(|candidate| *candidate != item);
        }
    }
}
