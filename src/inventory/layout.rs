//! Container layout registry for the inventory screen.
//!
//! Containers are loaded once from configuration (or built as the
//! standard set) and answer two geometric questions: which container and
//! cell sits under a screen pixel, and whether a footprint's cells all
//! exist in a container. Occupancy is the placement engine's concern.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::item::RegistryError;
use crate::position::ScreenPosition;

/// Width of one inventory cell in pixels.
pub const SLOT_W: i32 = 16;
/// Height of one inventory cell in pixels.
pub const SLOT_H: i32 = 16;
/// Hand container width in cells.
pub const HAND_COLS: i32 = 2;
/// Hand container height in cells.
pub const HAND_ROWS: i32 = 3;

/// What kind of placement rules a container follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerKind {
    /// Explicit cell offsets; irregular shapes are fine
    Slot { cells: Vec<(i32, i32)> },

    /// One logical slot drawn as a 2x3 box, holding a single item of any
    /// footprint
    Hand,

    /// The viewed unit's tile pile, presented as a strip of cells from the
    /// pixel origin to the screen edge. Logical cells run unbounded to the
    /// right; only the drawn grid wraps into further rows.
    Ground,
}

/// One container on the inventory screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerDefinition {
    /// Unique identifier (used for placements and cost tables)
    pub id: String,

    /// Pixel origin on the inventory screen
    pub x: i32,
    pub y: i32,

    #[serde(flatten)]
    pub kind: ContainerKind,

    /// Time cost to move an item out of here, keyed by destination
    /// container id. Missing destinations cost nothing.
    #[serde(default)]
    pub costs: HashMap<String, u32>,
}

impl ContainerDefinition {
    pub fn is_ground(&self) -> bool {
        matches!(self.kind, ContainerKind::Ground)
    }

    pub fn is_hand(&self) -> bool {
        matches!(self.kind, ContainerKind::Hand)
    }

    /// Cost of moving an item from this container into `destination`.
    pub fn cost_to(&self, destination: &str) -> u32 {
        self.costs.get(destination).copied().unwrap_or(0)
    }
}

/// On-disk shape of a layout configuration.
#[derive(Debug, Serialize, Deserialize)]
struct LayoutConfig {
    screen_width: i32,
    screen_height: i32,
    containers: Vec<ContainerDefinition>,
}

/// Central registry of the inventory screen's containers
///
/// Iteration and hit-testing run in id order, so pointer resolution is
/// deterministic regardless of registration order.
pub struct ContainerRegistry {
    containers: BTreeMap<String, ContainerDefinition>,
    screen_width: i32,
    screen_height: i32,
}

impl ContainerRegistry {
    /// Creates an empty registry for a screen of the given pixel size.
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        ContainerRegistry {
            containers: BTreeMap::new(),
            screen_width,
            screen_height,
        }
    }

    /// Creates the standard soldier layout on a 320x200 screen: two hands,
    /// a belt, a backpack, and the ground strip along the bottom.
    pub fn create_default() -> Self {
        let mut registry = Self::new(320, 200);
        registry.register_base_containers();
        registry
    }

    /// Builds a registry from a JSON layout configuration.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        let mut registry = Self::new(config.screen_width, config.screen_height);
        for container in config.containers {
            registry.register(container)?;
        }
        Ok(registry)
    }

    /// Registers a container definition.
    ///
    /// Rejects duplicate ids, Slot containers without cells, and a second
    /// Ground container; the engine assumes a single ground strip.
    pub fn register(&mut self, container: ContainerDefinition) -> Result<(), RegistryError> {
        if let ContainerKind::Slot { cells } = &container.kind {
            if cells.is_empty() {
                return Err(RegistryError::InvalidDefinition(format!(
                    "container '{}' has no cells",
                    container.id
                )));
            }
        }
        if container.is_ground() && self.ground_container().is_some() {
            return Err(RegistryError::InvalidDefinition(format!(
                "container '{}' is a second ground strip",
                container.id
            )));
        }
        if self.containers.contains_key(&container.id) {
            return Err(RegistryError::DuplicateDefinition(container.id));
        }

        self.containers.insert(container.id.clone(), container);
        Ok(())
    }

    /// Gets a container definition by id
    pub fn get(&self, id: &str) -> Option<&ContainerDefinition> {
        self.containers.get(id)
    }

    /// All containers in id order.
    pub fn containers(&self) -> impl Iterator<Item = &ContainerDefinition> {
        self.containers.values()
    }

    /// The ground strip, if the layout has one.
    pub fn ground_container(&self) -> Option<&ContainerDefinition> {
        self.containers.values().find(|c| c.is_ground())
    }

    pub fn screen_width(&self) -> i32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> i32 {
        self.screen_height
    }

    /// Rows of the ground strip visible on screen.
    pub fn ground_rows(&self, container: &ContainerDefinition) -> i32 {
        (self.screen_height - container.y) / SLOT_H
    }

    /// Columns of the ground strip visible on screen.
    pub fn ground_columns(&self, container: &ContainerDefinition) -> i32 {
        (self.screen_width - container.x) / SLOT_W
    }

    /// Resolves a screen pixel to the container and local cell under it.
    ///
    /// Containers are probed in id order. Slot containers test each of
    /// their cells, so holes in irregular shapes miss; Hand containers
    /// resolve anywhere in their box to cell (0,0); the Ground strip
    /// resolves from its origin to the screen edges.
    pub fn container_at(
        &self,
        position: ScreenPosition,
    ) -> Option<(&ContainerDefinition, (i32, i32))> {
        for container in self.containers.values() {
            match &container.kind {
                ContainerKind::Slot { cells } => {
                    for (cx, cy) in cells {
                        let px = container.x + cx * SLOT_W;
                        let py = container.y + cy * SLOT_H;
                        if position.x >= px
                            && position.x < px + SLOT_W
                            && position.y >= py
                            && position.y < py + SLOT_H
                        {
                            return Some((container, (*cx, *cy)));
                        }
                    }
                }
                ContainerKind::Hand => {
                    if position.x >= container.x
                        && position.x < container.x + HAND_COLS * SLOT_W
                        && position.y >= container.y
                        && position.y < container.y + HAND_ROWS * SLOT_H
                    {
                        return Some((container, (0, 0)));
                    }
                }
                ContainerKind::Ground => {
                    if position.x >= container.x
                        && position.x < self.screen_width
                        && position.y >= container.y
                        && position.y < self.screen_height
                    {
                        let cell = (
                            (position.x - container.x) / SLOT_W,
                            (position.y - container.y) / SLOT_H,
                        );
                        return Some((container, cell));
                    }
                }
            }
        }
        None
    }

    /// Tests whether every cell of a footprint exists in a container.
    ///
    /// Occupancy by other items is not considered here.
    pub fn fits_footprint(
        &self,
        container: &ContainerDefinition,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> bool {
        match &container.kind {
            ContainerKind::Slot { cells } => {
                for dx in 0..width {
                    for dy in 0..height {
                        if !cells.contains(&(x + dx, y + dy)) {
                            return false;
                        }
                    }
                }
                true
            }
            // the whole hand is one cell; any footprint goes in at (0,0)
            ContainerKind::Hand => x == 0 && y == 0,
            ContainerKind::Ground => {
                x >= 0 && y >= 0 && y + height <= self.ground_rows(container)
            }
        }
    }

    /// Screen position of a Slot or Hand container's cell.
    pub fn cell_position(&self, container: &ContainerDefinition, x: i32, y: i32) -> ScreenPosition {
        ScreenPosition::new(container.x + x * SLOT_W, container.y + y * SLOT_H)
    }

    /// Screen position of a ground cell, wrapping the unbounded strip into
    /// visible rows.
    ///
    /// Only drawing wraps; hit-testing and fit tests use the logical cells.
    pub fn ground_cell_position(
        &self,
        container: &ContainerDefinition,
        x: i32,
        y: i32,
    ) -> ScreenPosition {
        let columns = self.ground_columns(container);
        let column = x.rem_euclid(columns);
        let row = y + x.div_euclid(columns);
        ScreenPosition::new(container.x + column * SLOT_W, container.y + row * SLOT_H)
    }

    // ======================================================================
    // Container Registration - Standard Soldier Layout
    // ======================================================================

    fn register_base_containers(&mut self) {
        let cost = |pairs: &[(&str, u32)]| -> HashMap<String, u32> {
            pairs
                .iter()
                .map(|(id, amount)| (id.to_string(), *amount))
                .collect()
        };

        self.register(ContainerDefinition {
            id: "right_hand".to_string(),
            x: 0,
            y: 120,
            kind: ContainerKind::Hand,
            costs: cost(&[("ground", 2), ("belt", 4), ("backpack", 10), ("left_hand", 3)]),
        })
        .expect("Failed to register right_hand");

        self.register(ContainerDefinition {
            id: "left_hand".to_string(),
            x: 288,
            y: 120,
            kind: ContainerKind::Hand,
            costs: cost(&[("ground", 2), ("belt", 4), ("backpack", 10), ("right_hand", 3)]),
        })
        .expect("Failed to register left_hand");

        // 4 cells across the waist plus one pouch on each hip
        self.register(ContainerDefinition {
            id: "belt".to_string(),
            x: 128,
            y: 72,
            kind: ContainerKind::Slot {
                cells: vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (3, 1)],
            },
            costs: cost(&[("right_hand", 4), ("left_hand", 4), ("backpack", 12), ("ground", 4)]),
        })
        .expect("Failed to register belt");

        self.register(ContainerDefinition {
            id: "backpack".to_string(),
            x: 192,
            y: 72,
            kind: ContainerKind::Slot {
                cells: (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect(),
            },
            costs: cost(&[("right_hand", 8), ("left_hand", 8), ("belt", 12), ("ground", 10)]),
        })
        .expect("Failed to register backpack");

        self.register(ContainerDefinition {
            id: "ground".to_string(),
            x: 32,
            y: 168,
            kind: ContainerKind::Ground,
            costs: cost(&[("right_hand", 8), ("left_hand", 8), ("belt", 10), ("backpack", 12)]),
        })
        .expect("Failed to register ground");
    }
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_at_resolves_slot_cells() {
        let registry = ContainerRegistry::create_default();
        let (container, cell) = registry
            .container_at(ScreenPosition::new(210, 106))
            .unwrap();
        assert_eq!(container.id, "backpack");
        assert_eq!(cell, (1, 2));
    }

    #[test]
    fn test_container_at_misses_irregular_hole() {
        let registry = ContainerRegistry::create_default();
        // the belt has no (1,1) or (2,1) cells
        assert!(registry.container_at(ScreenPosition::new(152, 96)).is_none());

        let (container, cell) = registry
            .container_at(ScreenPosition::new(184, 96))
            .unwrap();
        assert_eq!(container.id, "belt");
        assert_eq!(cell, (3, 1));
    }

    #[test]
    fn test_container_at_hand_resolves_to_origin_cell() {
        let registry = ContainerRegistry::create_default();
        let (container, cell) = registry.container_at(ScreenPosition::new(16, 140)).unwrap();
        assert_eq!(container.id, "right_hand");
        assert_eq!(cell, (0, 0));

        let (container, cell) = registry
            .container_at(ScreenPosition::new(290, 160))
            .unwrap();
        assert_eq!(container.id, "left_hand");
        assert_eq!(cell, (0, 0));
    }

    #[test]
    fn test_container_at_resolves_ground_cells() {
        let registry = ContainerRegistry::create_default();
        let (container, cell) = registry.container_at(ScreenPosition::new(48, 176)).unwrap();
        assert_eq!(container.id, "ground");
        assert_eq!(cell, (1, 0));

        let (_, cell) = registry.container_at(ScreenPosition::new(32, 168)).unwrap();
        assert_eq!(cell, (0, 0));

        let (_, cell) = registry
            .container_at(ScreenPosition::new(319, 199))
            .unwrap();
        assert_eq!(cell, (17, 1));
    }

    #[test]
    fn test_container_at_misses_dead_space() {
        let registry = ContainerRegistry::create_default();
        assert!(registry.container_at(ScreenPosition::new(100, 20)).is_none());
        assert!(registry.container_at(ScreenPosition::new(10, 60)).is_none());
    }

    #[test]
    fn test_fits_footprint_slot() {
        let registry = ContainerRegistry::create_default();
        let backpack = registry.get("backpack").unwrap();
        assert!(registry.fits_footprint(backpack, 0, 0, 3, 3));
        assert!(!registry.fits_footprint(backpack, 1, 1, 3, 3));

        let belt = registry.get("belt").unwrap();
        assert!(registry.fits_footprint(belt, 0, 0, 1, 2));
        assert!(!registry.fits_footprint(belt, 1, 0, 1, 2));
    }

    #[test]
    fn test_fits_footprint_hand_only_at_origin() {
        let registry = ContainerRegistry::create_default();
        let hand = registry.get("right_hand").unwrap();
        assert!(registry.fits_footprint(hand, 0, 0, 2, 3));
        assert!(!registry.fits_footprint(hand, 1, 0, 1, 1));
    }

    #[test]
    fn test_fits_footprint_ground_unbounded_right() {
        let registry = ContainerRegistry::create_default();
        let ground = registry.get("ground").unwrap();
        assert_eq!(registry.ground_rows(ground), 2);
        assert!(registry.fits_footprint(ground, 5, 0, 2, 2));
        assert!(registry.fits_footprint(ground, 999, 0, 1, 1));
        assert!(!registry.fits_footprint(ground, 0, 1, 1, 2));
        assert!(!registry.fits_footprint(ground, -1, 0, 1, 1));
    }

    #[test]
    fn test_cost_lookup_defaults_to_zero() {
        let registry = ContainerRegistry::create_default();
        let hand = registry.get("right_hand").unwrap();
        assert_eq!(hand.cost_to("ground"), 2);
        assert_eq!(hand.cost_to("right_hand"), 0);
    }

    #[test]
    fn test_ground_cell_position_wraps_rows() {
        let registry = ContainerRegistry::create_default();
        let ground = registry.get("ground").unwrap();
        assert_eq!(registry.ground_columns(ground), 18);
        assert_eq!(
            registry.ground_cell_position(ground, 0, 0),
            ScreenPosition::new(32, 168)
        );
        assert_eq!(
            registry.ground_cell_position(ground, 17, 0),
            ScreenPosition::new(32 + 17 * 16, 168)
        );
        // column 18 spills into the second visible row
        assert_eq!(
            registry.ground_cell_position(ground, 18, 0),
            ScreenPosition::new(32, 184)
        );
    }

    #[test]
    fn test_register_rejects_bad_definitions() {
        let mut registry = ContainerRegistry::new(320, 200);
        registry
            .register(ContainerDefinition {
                id: "pouch".to_string(),
                x: 0,
                y: 0,
                kind: ContainerKind::Slot {
                    cells: vec![(0, 0)],
                },
                costs: HashMap::new(),
            })
            .unwrap();

        let duplicate = registry.register(ContainerDefinition {
            id: "pouch".to_string(),
            x: 0,
            y: 0,
            kind: ContainerKind::Hand,
            costs: HashMap::new(),
        });
        assert!(matches!(
            duplicate,
            Err(RegistryError::DuplicateDefinition(_))
        ));

        let empty = registry.register(ContainerDefinition {
            id: "empty".to_string(),
            x: 0,
            y: 0,
            kind: ContainerKind::Slot { cells: vec![] },
            costs: HashMap::new(),
        });
        assert!(matches!(empty, Err(RegistryError::InvalidDefinition(_))));
    }

    #[test]
    fn test_register_rejects_second_ground() {
        let mut registry = ContainerRegistry::new(320, 200);
        registry
            .register(ContainerDefinition {
                id: "ground".to_string(),
                x: 0,
                y: 160,
                kind: ContainerKind::Ground,
                costs: HashMap::new(),
            })
            .unwrap();
        let second = registry.register(ContainerDefinition {
            id: "floor".to_string(),
            x: 0,
            y: 100,
            kind: ContainerKind::Ground,
            costs: HashMap::new(),
        });
        assert!(matches!(second, Err(RegistryError::InvalidDefinition(_))));
    }

    #[test]
    fn test_from_json_layout() {
        let json = r#"{
            "screen_width": 320,
            "screen_height": 200,
            "containers": [
                {"id": "holster", "x": 16, "y": 40, "kind": "slot",
                 "cells": [[0, 0], [0, 1]],
                 "costs": {"floor": 3}},
                {"id": "floor", "x": 0, "y": 160, "kind": "ground"}
            ]
        }"#;
        let registry = ContainerRegistry::from_json(json).unwrap();
        assert_eq!(registry.screen_width(), 320);

        let holster = registry.get("holster").unwrap();
        assert!(registry.fits_footprint(holster, 0, 0, 1, 2));
        assert_eq!(holster.cost_to("floor"), 3);

        let (container, cell) = registry.container_at(ScreenPosition::new(20, 60)).unwrap();
        assert_eq!(container.id, "holster");
        assert_eq!(cell, (0, 1));
        assert!(registry.ground_container().is_some());
    }
}
