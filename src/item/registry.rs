use std::collections::HashMap;
use std::fmt;

use super::definition::ItemDefinition;

/// Errors raised while building a registry from code or configuration
#[derive(Debug)]
pub enum RegistryError {
    /// Configuration JSON failed to parse
    SerializationError(serde_json::Error),

    /// Two definitions share an id
    DuplicateDefinition(String),

    /// A definition's fields don't make sense (zero footprint, no cells)
    InvalidDefinition(String),

    /// An id was looked up that no definition carries
    UnknownDefinition(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::SerializationError(e) => {
                write!(f, "Serialization error: {}", e)
            }
            RegistryError::DuplicateDefinition(id) => {
                write!(f, "Definition '{}' already registered", id)
            }
            RegistryError::InvalidDefinition(msg) => {
                write!(f, "Invalid definition: {}", msg)
            }
            RegistryError::UnknownDefinition(id) => {
                write!(f, "Unknown definition: {}", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::SerializationError(err)
    }
}

/// Central registry of all item definitions
///
/// This is the single source of truth for what item types exist in a
/// battle. All item references (placements, piles, loaded ammo) use ids
/// that look up definitions in this registry.
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ItemRegistry {
            items: HashMap::new(),
        }
    }

    /// Creates a registry with the standard item set pre-registered
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_items();
        registry
    }

    /// Builds a registry from a JSON array of definitions
    ///
    /// # Arguments
    /// * `json` - JSON text holding an array of item definitions.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<ItemDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Registers a new item definition
    ///
    /// Returns an error if the id is taken or the footprint is degenerate.
    pub fn register(&mut self, item: ItemDefinition) -> Result<(), RegistryError> {
        if item.width < 1 || item.height < 1 {
            return Err(RegistryError::InvalidDefinition(format!(
                "item '{}' has footprint {}x{}",
                item.id, item.width, item.height
            )));
        }
        if self.items.contains_key(&item.id) {
            return Err(RegistryError::DuplicateDefinition(item.id));
        }

        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Gets an item definition by id
    ///
    /// Returns None if no item with this id exists.
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Returns true if an item with this id exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    // ======================================================================
    // Item Registration - Standard Battle Items
    // ======================================================================

    /// Registers the standard battle item set
    fn register_base_items(&mut self) {
        self.register(ItemDefinition::new_weapon(
            "rifle",
            "Rifle",
            1,
            3, // tall weapon, hands or backpack only
            0,
            &["rifle_clip"],
        ))
        .expect("Failed to register rifle");

        self.register(ItemDefinition::new("rifle_clip", "Rifle Clip", 1, 1, 1))
            .expect("Failed to register rifle_clip");

        self.register(ItemDefinition::new_weapon(
            "pistol",
            "Pistol",
            1,
            2,
            2,
            &["pistol_clip"],
        ))
        .expect("Failed to register pistol");

        self.register(ItemDefinition::new("pistol_clip", "Pistol Clip", 1, 1, 3))
            .expect("Failed to register pistol_clip");

        self.register(ItemDefinition::new("grenade", "Grenade", 1, 1, 4))
            .expect("Failed to register grenade");

        self.register(ItemDefinition::new("medikit", "Medikit", 1, 2, 5))
            .expect("Failed to register medikit");

        self.register(ItemDefinition::new("flare", "Flare", 1, 1, 6))
            .expect("Failed to register flare");
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_base_items() {
        let registry = ItemRegistry::create_default();
        assert!(registry.exists("rifle"));
        assert!(registry.exists("rifle_clip"));
        assert!(registry.get("rifle").unwrap().accepts_ammo("rifle_clip"));
        assert!(!registry.get("rifle").unwrap().accepts_ammo("pistol_clip"));
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut registry = ItemRegistry::new();
        registry
            .register(ItemDefinition::new("knife", "Knife", 1, 1, 9))
            .unwrap();
        let result = registry.register(ItemDefinition::new("knife", "Knife", 1, 1, 9));
        assert!(matches!(result, Err(RegistryError::DuplicateDefinition(_))));
    }

    #[test]
    fn test_register_rejects_zero_footprint() {
        let mut registry = ItemRegistry::new();
        let result = registry.register(ItemDefinition::new("ghost", "Ghost", 0, 1, 9));
        assert!(matches!(result, Err(RegistryError::InvalidDefinition(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "rocket", "name": "Rocket", "width": 1, "height": 2, "sprite": 10},
            {"id": "launcher", "name": "Launcher", "width": 2, "height": 3, "sprite": 11,
             "compatible_ammo": ["rocket"]}
        ]"#;
        let registry = ItemRegistry::from_json(json).unwrap();
        assert!(registry.get("launcher").unwrap().accepts_ammo("rocket"));
        assert_eq!(registry.get("rocket").unwrap().height, 2);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id": "rocket", "name": "Rocket", "width": 1, "height": 2, "sprite": 10},
            {"id": "rocket", "name": "Rocket", "width": 1, "height": 2, "sprite": 10}
        ]"#;
        assert!(ItemRegistry::from_json(json).is_err());
    }
}
