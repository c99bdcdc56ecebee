//! Item placement engine: the held-item state machine.
//!
//! One item at a time can be picked up by the player; placing it again is
//! where all the rules live. A drop on an empty cell is a move, gated by
//! the source container's cost table; a drop on an occupied cell is a
//! load attempt, gated by the target's ammo compatibility. Every denial
//! leaves the battlefield exactly as it was and the item still held.

use log::{debug, warn};

use crate::battlefield::{Battlefield, UnitId};
use crate::inventory::error::PlacementDenied;
use crate::inventory::layout::{
    ContainerDefinition, ContainerRegistry, HAND_COLS, HAND_ROWS, SLOT_H, SLOT_W,
};
use crate::item::{ItemId, ItemRegistry, Placement};
use crate::position::ScreenPosition;
use crate::services::{ActionBudget, RenderSurface, SoundPlayer, WarningSink};

/// Time units to load a weapon, regardless of containers.
pub const LOAD_COST: u32 = 15;
/// Time units to unload a weapon into the hands.
pub const UNLOAD_COST: u32 = 8;

/// Container the weapon lands in on unload.
pub const WEAPON_HAND: &str = "right_hand";
/// Container the ammo lands in on unload.
pub const AMMO_HAND: &str = "left_hand";

/// Sprite set item frames are blitted from.
pub const ITEM_SPRITE_SET: &str = "items";
/// Sound set battle effects play from.
pub const BATTLE_SOUND_SET: &str = "battle";
/// Sound index played on a successful move.
pub const SOUND_ITEM_DROP: u32 = 38;
/// Sound index played on a successful load.
pub const SOUND_ITEM_LOAD: u32 = 17;

/// Pointer buttons the inventory screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Interaction state for one inventory screen session
///
/// Owns what used to be scattered globals: the held item, the unit whose
/// inventory is shown, and whether actions cost time units. All battle
/// state stays in the Battlefield; all platform effects stay behind the
/// service seams passed into each call.
pub struct PlacementSession {
    held: Option<ItemId>,
    viewed_unit: Option<UnitId>,
    tu_mode: bool,
}

impl PlacementSession {
    /// Creates a session with nothing held and costs enforced.
    pub fn new() -> Self {
        PlacementSession {
            held: None,
            viewed_unit: None,
            tu_mode: true,
        }
    }

    /// The item currently in the pointer's grasp, if any.
    pub fn held_item(&self) -> Option<ItemId> {
        self.held
    }

    pub fn viewed_unit(&self) -> Option<UnitId> {
        self.viewed_unit
    }

    /// Turns time-unit costs on (battle) or off (pre-equip screen).
    ///
    /// The cost checker is still consulted when off, with enforcement
    /// disabled, so spends can be recorded either way.
    pub fn set_tu_mode(&mut self, enforce: bool) {
        self.tu_mode = enforce;
    }

    /// Switches the inventory to another unit and repacks its ground pile.
    pub fn set_viewed_unit(
        &mut self,
        field: &mut Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        unit: UnitId,
    ) {
        self.viewed_unit = Some(unit);
        debug!("viewing inventory of unit {:?}", unit);
        self.arrange_ground(field, items, layout);
    }

    /// Picks an item up. No cost and no validation; callers resolve the
    /// click to an occupied cell first.
    pub fn pick_up(&mut self, item: ItemId) {
        self.held = Some(item);
    }

    /// Drops the held item back where it came from.
    ///
    /// Its recorded placement was never touched while held, so clearing
    /// the grasp is the whole operation.
    pub fn cancel(&mut self) {
        self.held = None;
    }

    // ======================================================================
    // Occupancy queries
    // ======================================================================

    /// Finds the item covering a cell of a container, if any.
    ///
    /// Checks the viewed unit's items first, then its tile's ground pile.
    /// A hand container matches any item it holds regardless of the cell
    /// asked about; everything else matches by footprint. The ground scan
    /// has no hand shortcut since pile items never sit in a hand.
    pub fn item_in_slot(
        &self,
        field: &Battlefield,
        items: &ItemRegistry,
        container: &ContainerDefinition,
        x: i32,
        y: i32,
    ) -> Option<ItemId> {
        let unit = self.viewed_unit?;

        for item in field.unit_items(unit) {
            let Some(definition) = items.get(&item.item_id) else {
                continue;
            };
            let in_container = item
                .placement
                .as_ref()
                .is_some_and(|p| p.container == container.id);
            if in_container
                && (container.is_hand() || item.occupies_cell(definition, &container.id, x, y))
            {
                return Some(item.id);
            }
        }

        let tile = field.unit(unit)?.position;
        for id in field.tile_items(tile) {
            let Some(item) = field.item(*id) else {
                continue;
            };
            let Some(definition) = items.get(&item.item_id) else {
                continue;
            };
            if item.occupies_cell(definition, &container.id, x, y) {
                return Some(item.id);
            }
        }
        None
    }

    /// Tests whether an item could sit at a container cell.
    ///
    /// Every footprint cell must exist in the container and be free of
    /// any *other* item; the item itself may already cover some of them
    /// (moving an item one cell over is legal).
    pub fn fits_at(
        &self,
        field: &Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        item: ItemId,
        container: &str,
        x: i32,
        y: i32,
    ) -> bool {
        let Some(container) = layout.get(container) else {
            return false;
        };
        let Some(definition) = field.item(item).and_then(|i| items.get(&i.item_id)) else {
            return false;
        };

        if !layout.fits_footprint(container, x, y, definition.width, definition.height) {
            return false;
        }
        for dx in 0..definition.width {
            for dy in 0..definition.height {
                let occupant = self.item_in_slot(field, items, container, x + dx, y + dy);
                if occupant.is_some_and(|other| other != item) {
                    return false;
                }
            }
        }
        true
    }

    // ======================================================================
    // Placement transitions
    // ======================================================================

    /// Drops the held item on a container cell.
    ///
    /// An empty target cell starts a move: the footprint must fit, and
    /// the source container's cost toward the destination must be
    /// spendable. A cell occupied by another item starts a load: the
    /// occupant must accept the held item as ammo and be unloaded, at a
    /// fixed cost. Either way a denial leaves the item held and the
    /// battlefield untouched. Without a held item or a viewed unit the
    /// call does nothing.
    ///
    /// # Arguments
    /// * `container` - Target container id.
    /// * `x` / `y` - Target cell in container coordinates.
    pub fn place(
        &mut self,
        field: &mut Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        container: &str,
        x: i32,
        y: i32,
        budget: &mut dyn ActionBudget,
        warnings: &mut dyn WarningSink,
        sounds: &mut dyn SoundPlayer,
    ) -> Result<(), PlacementDenied> {
        let (Some(held), Some(unit)) = (self.held, self.viewed_unit) else {
            return Ok(());
        };
        let Some(target) = layout.get(container) else {
            return Err(deny(warnings, PlacementDenied::InvalidContainer));
        };
        if field.item(held).and_then(|i| items.get(&i.item_id)).is_none() {
            let id = field
                .item(held)
                .map(|i| i.item_id.clone())
                .unwrap_or_else(|| format!("#{}", held.0));
            return Err(deny(warnings, PlacementDenied::InvalidItem(id)));
        }

        match self.item_in_slot(field, items, target, x, y) {
            Some(occupant) if occupant != held => {
                self.load(field, items, layout, held, occupant, unit, budget, warnings, sounds)
            }
            _ => {
                if !self.fits_at(field, items, layout, held, container, x, y) {
                    return Err(deny(warnings, PlacementDenied::NoFit));
                }
                let cost = field
                    .item(held)
                    .and_then(|i| i.placement.as_ref())
                    .and_then(|p| layout.get(&p.container))
                    .map(|source| source.cost_to(container))
                    .unwrap_or(0);
                if !budget.try_spend(unit, cost, self.tu_mode) {
                    return Err(deny(warnings, PlacementDenied::InsufficientTimeUnits));
                }

                commit_move(field, layout, unit, held, container, x, y);
                self.held = None;
                sounds.play(BATTLE_SOUND_SET, SOUND_ITEM_DROP);
                debug!("moved item {:?} to {} ({}, {})", held, container, x, y);
                Ok(())
            }
        }
    }

    /// Loads the held item into the weapon occupying the target cell.
    fn load(
        &mut self,
        field: &mut Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        held: ItemId,
        weapon: ItemId,
        unit: UnitId,
        budget: &mut dyn ActionBudget,
        warnings: &mut dyn WarningSink,
        sounds: &mut dyn SoundPlayer,
    ) -> Result<(), PlacementDenied> {
        let held_type = field.item(held).map(|i| i.item_id.clone()).unwrap_or_default();
        let accepts = field
            .item(weapon)
            .and_then(|i| items.get(&i.item_id))
            .is_some_and(|definition| definition.accepts_ammo(&held_type));
        if !accepts {
            return Err(deny(warnings, PlacementDenied::IncompatibleAmmo));
        }
        if field.item(weapon).is_some_and(|i| i.ammo.is_some()) {
            return Err(deny(warnings, PlacementDenied::AlreadyLoaded));
        }
        if !budget.try_spend(unit, LOAD_COST, self.tu_mode) {
            return Err(deny(warnings, PlacementDenied::InsufficientTimeUnits));
        }

        // The round leaves every container: off the pile if it lay on the
        // ground, out of the owner's slots otherwise. It lives on only
        // through the weapon's ammo reference.
        let tile = field.unit(unit).map(|u| u.position);
        let from_ground = field
            .item(held)
            .and_then(|i| i.placement.as_ref())
            .and_then(|p| layout.get(&p.container))
            .is_some_and(|c| c.is_ground());
        if from_ground {
            if let Some(tile) = tile {
                field.remove_from_tile(tile, held);
            }
        }
        if let Some(round) = field.item_mut(held) {
            round.placement = None;
            round.owner = None;
        }
        if let Some(weapon) = field.item_mut(weapon) {
            weapon.ammo = Some(held);
        }
        self.held = None;
        sounds.play(BATTLE_SOUND_SET, SOUND_ITEM_LOAD);
        debug!("loaded item {:?} into {:?}", held, weapon);
        Ok(())
    }

    /// Unloads a weapon, putting it in one hand and its ammo in the other.
    ///
    /// Both hands must be free of anything but the weapon itself, checked
    /// before any cost is spent; a busy hand or an empty weapon rejects
    /// quietly, the way clicking them does nothing on screen. If the
    /// weapon was the held item it is released on success.
    pub fn unload(
        &mut self,
        field: &mut Battlefield,
        layout: &ContainerRegistry,
        weapon: ItemId,
        budget: &mut dyn ActionBudget,
        warnings: &mut dyn WarningSink,
    ) -> Result<(), PlacementDenied> {
        let Some(unit) = self.viewed_unit else {
            return Ok(());
        };
        let Some(round) = field.item(weapon).and_then(|i| i.ammo) else {
            return Err(PlacementDenied::NoFit);
        };
        if layout.get(WEAPON_HAND).is_none() || layout.get(AMMO_HAND).is_none() {
            return Err(PlacementDenied::InvalidContainer);
        }

        let hands_busy = field.unit_items(unit).any(|item| {
            item.id != weapon
                && item
                    .placement
                    .as_ref()
                    .and_then(|p| layout.get(&p.container))
                    .is_some_and(|c| c.is_hand())
        });
        if hands_busy {
            return Err(PlacementDenied::NoFit);
        }
        if !budget.try_spend(unit, UNLOAD_COST, self.tu_mode) {
            return Err(deny(warnings, PlacementDenied::InsufficientTimeUnits));
        }

        commit_move(field, layout, unit, round, AMMO_HAND, 0, 0);
        commit_move(field, layout, unit, weapon, WEAPON_HAND, 0, 0);
        if let Some(weapon) = field.item_mut(weapon) {
            weapon.ammo = None;
        }
        if self.held == Some(weapon) {
            self.held = None;
        }
        debug!("unloaded item {:?}, round {:?} to {}", weapon, round, AMMO_HAND);
        Ok(())
    }

    /// Repacks the viewed unit's ground pile for display.
    ///
    /// Pile items have no permanent positions; they are dealt out
    /// left-to-right in pile order, each advancing by its footprint
    /// width, all on row 0. The logical strip never wraps -- only the
    /// drawn grid does.
    pub fn arrange_ground(
        &mut self,
        field: &mut Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
    ) {
        let Some(unit) = self.viewed_unit else {
            return;
        };
        let Some(ground) = layout.ground_container().map(|c| c.id.clone()) else {
            return;
        };
        let Some(tile) = field.unit(unit).map(|u| u.position) else {
            return;
        };

        let pile: Vec<ItemId> = field.tile_items(tile).to_vec();
        let mut x = 0;
        for id in pile {
            let width = field
                .item(id)
                .and_then(|i| items.get(&i.item_id))
                .map(|definition| definition.width)
                .unwrap_or(1);
            if let Some(item) = field.item_mut(id) {
                item.placement = Some(Placement::new(ground.clone(), x, 0));
            }
            x += width;
        }
    }

    // ======================================================================
    // Pointer entry point
    // ======================================================================

    /// Routes a pointer click on the inventory screen.
    ///
    /// Left with empty hands picks up whatever occupies the clicked cell;
    /// left while holding drops at the cell under the held sprite's first
    /// cell (the sprite is drawn centered on the pointer, so the probe
    /// shifts by half the footprint); right cancels. Clicks that resolve
    /// to no container while holding report [`PlacementDenied::InvalidContainer`]
    /// and keep the item held.
    pub fn click_at(
        &mut self,
        field: &mut Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        pixel: ScreenPosition,
        button: MouseButton,
        budget: &mut dyn ActionBudget,
        warnings: &mut dyn WarningSink,
        sounds: &mut dyn SoundPlayer,
    ) -> Result<(), PlacementDenied> {
        if button == MouseButton::Right {
            self.cancel();
            return Ok(());
        }
        if self.viewed_unit.is_none() {
            return Ok(());
        }

        match self.held {
            None => {
                if let Some((container, (x, y))) = layout.container_at(pixel) {
                    if let Some(item) = self.item_in_slot(field, items, container, x, y) {
                        self.pick_up(item);
                        debug!("picked up item {:?} from {}", item, container.id);
                    }
                }
                Ok(())
            }
            Some(held) => {
                let (width, height) = field
                    .item(held)
                    .and_then(|i| items.get(&i.item_id))
                    .map(|definition| (definition.width, definition.height))
                    .unwrap_or((1, 1));
                // centre of the held sprite's top-left cell, so the drop
                // lands where the item is drawn rather than under the tip
                // of the pointer
                let probe = ScreenPosition::new(
                    pixel.x + (1 - width) * SLOT_W / 2,
                    pixel.y + (1 - height) * SLOT_H / 2,
                );
                let Some((container, (x, y))) = layout.container_at(probe) else {
                    return Err(PlacementDenied::InvalidContainer);
                };
                let id = container.id.clone();
                self.place(field, items, layout, &id, x, y, budget, warnings, sounds)
            }
        }
    }

    // ======================================================================
    // Drawing
    // ======================================================================

    /// Emits a blit for every visible item on the inventory screen.
    ///
    /// Slot items sit on their cells, hand items are centered in the hand
    /// box, and ground items use the strip's wrapped on-screen grid. The
    /// held item is skipped; it follows the pointer instead.
    pub fn draw_items(
        &self,
        field: &Battlefield,
        items: &ItemRegistry,
        layout: &ContainerRegistry,
        surface: &mut dyn RenderSurface,
    ) {
        let Some(unit) = self.viewed_unit else {
            return;
        };

        for item in field.unit_items(unit) {
            if Some(item.id) == self.held {
                continue;
            }
            let Some(placement) = &item.placement else {
                continue;
            };
            let (Some(container), Some(definition)) =
                (layout.get(&placement.container), items.get(&item.item_id))
            else {
                continue;
            };
            let position = if container.is_hand() {
                hand_centered_position(container, definition.width, definition.height)
            } else {
                layout.cell_position(container, placement.x, placement.y)
            };
            surface.blit(ITEM_SPRITE_SET, definition.sprite, position);
        }

        let Some(tile) = field.unit(unit).map(|u| u.position) else {
            return;
        };
        for id in field.tile_items(tile) {
            if Some(*id) == self.held {
                continue;
            }
            let Some(item) = field.item(*id) else {
                continue;
            };
            let Some(placement) = &item.placement else {
                continue;
            };
            let (Some(container), Some(definition)) =
                (layout.get(&placement.container), items.get(&item.item_id))
            else {
                continue;
            };
            let position = layout.ground_cell_position(container, placement.x, placement.y);
            surface.blit(ITEM_SPRITE_SET, definition.sprite, position);
        }
    }
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Surfaces a denial's message key and logs it, passing the reason back.
fn deny(warnings: &mut dyn WarningSink, reason: PlacementDenied) -> PlacementDenied {
    if let Some(key) = reason.message_key() {
        warnings.show(key);
    }
    warn!("placement denied: {}", reason);
    reason
}

/// Screen position centering an item's sprite inside a hand box.
fn hand_centered_position(
    container: &ContainerDefinition,
    width: i32,
    height: i32,
) -> ScreenPosition {
    ScreenPosition::new(
        container.x + (HAND_COLS - width) * SLOT_W / 2,
        container.y + (HAND_ROWS - height) * SLOT_H / 2,
    )
}

/// Rewrites an item's placement, keeping owner and pile membership in step.
///
/// Crossing onto the ground clears the owner and appends to the viewed
/// unit's tile pile; leaving the ground (or arriving from nowhere, as
/// unloaded ammo does) claims the item for the unit and drops any pile
/// membership. Moves within one container only touch the cell.
fn commit_move(
    field: &mut Battlefield,
    layout: &ContainerRegistry,
    unit: UnitId,
    item: ItemId,
    destination: &str,
    x: i32,
    y: i32,
) {
    let Some(tile) = field.unit(unit).map(|u| u.position) else {
        return;
    };
    let source = field.item(item).and_then(|i| i.placement.clone());
    let same_container = source.as_ref().is_some_and(|p| p.container == destination);

    if !same_container {
        let to_ground = layout.get(destination).is_some_and(|c| c.is_ground());
        let from_ground = source
            .as_ref()
            .map(|p| layout.get(&p.container).is_some_and(|c| c.is_ground()))
            .unwrap_or(true);
        if to_ground {
            if let Some(item) = field.item_mut(item) {
                item.owner = None;
            }
            field.push_to_tile(tile, item);
        } else if from_ground {
            if let Some(item) = field.item_mut(item) {
                item.owner = Some(unit);
            }
            field.remove_from_tile(tile, item);
        }
    }
    if let Some(item) = field.item_mut(item) {
        item.placement = Some(Placement::new(destination, x, y));
    }
}
