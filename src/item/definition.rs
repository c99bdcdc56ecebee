use serde::{Deserialize, Serialize};

/// The blueprint for an item type
///
/// This defines the static properties shared across all battle instances
/// of an item. Think of it as the "class" and BattleItem as the
/// "instance".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups and configuration)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Footprint width in inventory cells
    pub width: i32,

    /// Footprint height in inventory cells
    pub height: i32,

    /// Frame index in the battle item sprite sheet
    pub sprite: u32,

    /// Item type ids this item can be loaded with (empty = not a weapon)
    #[serde(default)]
    pub compatible_ammo: Vec<String>,
}

impl ItemDefinition {
    /// Creates a new item definition with no ammo compatibility
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width: i32,
        height: i32,
        sprite: u32,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            width,
            height,
            sprite,
            compatible_ammo: Vec::new(),
        }
    }

    /// Creates a weapon definition listing the ammo types it accepts
    pub fn new_weapon(
        id: impl Into<String>,
        name: impl Into<String>,
        width: i32,
        height: i32,
        sprite: u32,
        compatible_ammo: &[&str],
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            width,
            height,
            sprite,
            compatible_ammo: compatible_ammo.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Returns true if this item can be loaded with the given item type
    pub fn accepts_ammo(&self, item_id: &str) -> bool {
        self.compatible_ammo.iter().any(|a| a == item_id)
    }
}
