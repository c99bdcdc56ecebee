//! Viewport state for the battle map: scroll offset, viewed level, edge
//! scrolling, and the screen/map conversions that depend on them.

use crate::camera::transform;
use crate::position::{GridPosition, ScreenPosition, ViewOffset, VoxelPosition};
use crate::services::ScrollTimer;

/// Width of the screen-edge band that triggers scrolling, in pixels.
pub const SCROLL_BORDER: i32 = 5;
/// Width of the corner band that adds a diagonal component, in pixels.
pub const SCROLL_DIAGONAL_EDGE: i32 = 60;
/// Default edge-scroll speed in pixels per tick.
pub const DEFAULT_SCROLL_SPEED: i32 = 8;

// Fresh battles open looking at this offset until something centers the view.
const INITIAL_OFFSET_X: i32 = -250;
const INITIAL_OFFSET_Y: i32 = 250;

/// The battle camera.
///
/// Owns the view offset, the cached center cell and the edge-scroll
/// velocity. All conversions between clicks and map cells go through here
/// so they see a consistent offset and level.
pub struct Camera {
    sprite_width: i32,
    sprite_height: i32,
    map_length: i32,
    map_width: i32,
    map_height: i32,
    screen_width: i32,
    screen_height: i32,
    visible_height: i32,
    offset: ViewOffset,
    center: GridPosition,
    scroll_x: i32,
    scroll_y: i32,
    scroll_speed: i32,
}

impl Camera {
    /// Creates a camera for a battle map.
    ///
    /// # Arguments
    /// * `sprite_width` / `sprite_height` - Cell sprite size in pixels.
    /// * `map_length` / `map_width` / `map_height` - Map size in cells
    ///   (length along x, width along y, height in levels).
    /// * `screen_width` / `screen_height` - View surface size in pixels.
    /// * `visible_height` - Pixels of the surface not covered by the HUD;
    ///   centering aims for the middle of this strip.
    pub fn new(
        sprite_width: i32,
        sprite_height: i32,
        map_length: i32,
        map_width: i32,
        map_height: i32,
        screen_width: i32,
        screen_height: i32,
        visible_height: i32,
    ) -> Self {
        Camera {
            sprite_width,
            sprite_height,
            map_length,
            map_width,
            map_height,
            screen_width,
            screen_height,
            visible_height,
            offset: ViewOffset {
                x: INITIAL_OFFSET_X,
                y: INITIAL_OFFSET_Y,
                z: 0,
            },
            center: GridPosition::new(0, 0, 0),
            scroll_x: 0,
            scroll_y: 0,
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }

    pub fn offset(&self) -> ViewOffset {
        self.offset
    }

    /// The currently viewed map level.
    pub fn view_level(&self) -> i32 {
        self.offset.z
    }

    /// Current edge-scroll velocity in pixels per tick.
    pub fn velocity(&self) -> (i32, i32) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn set_scroll_speed(&mut self, speed: i32) {
        self.scroll_speed = speed;
    }

    /// Updates the scroll velocity from the pointer position and keeps the
    /// external scroll timer in step with it.
    ///
    /// Pointer in the border band scrolls toward that edge at full speed;
    /// inside the corner band the second component runs at half speed so
    /// diagonal scrolling moves about as fast as orthogonal. A pointer
    /// coordinate of exactly 0 means the pointer left the window, and that
    /// component's velocity is left as it was.
    pub fn handle_mouse_over(&mut self, x: i32, y: i32, timer: &mut dyn ScrollTimer) {
        if x < SCROLL_BORDER && x > 0 {
            self.scroll_x = self.scroll_speed;
            if y < SCROLL_DIAGONAL_EDGE && y > 0 {
                self.scroll_y = self.scroll_speed / 2;
            } else if y > self.screen_height - SCROLL_DIAGONAL_EDGE {
                self.scroll_y = -self.scroll_speed / 2;
            }
        } else if x > self.screen_width - SCROLL_BORDER {
            self.scroll_x = -self.scroll_speed;
            if y < SCROLL_DIAGONAL_EDGE && y > 0 {
                self.scroll_y = self.scroll_speed / 2;
            } else if y > self.screen_height - SCROLL_DIAGONAL_EDGE {
                self.scroll_y = -self.scroll_speed / 2;
            }
        } else if x != 0 {
            self.scroll_x = 0;
        }

        if y < SCROLL_BORDER && y > 0 {
            self.scroll_y = self.scroll_speed;
            if x < SCROLL_DIAGONAL_EDGE && x > 0 {
                self.scroll_x = self.scroll_speed;
                self.scroll_y /= 2;
            } else if x > self.screen_width - SCROLL_DIAGONAL_EDGE {
                self.scroll_x = -self.scroll_speed;
                self.scroll_y /= 2;
            }
        } else if y > self.screen_height - SCROLL_BORDER {
            self.scroll_y = -self.scroll_speed;
            if x < SCROLL_DIAGONAL_EDGE && x > 0 {
                self.scroll_x = self.scroll_speed;
                self.scroll_y /= 2;
            } else if x > self.screen_width - SCROLL_DIAGONAL_EDGE {
                self.scroll_x = -self.scroll_speed;
                self.scroll_y /= 2;
            }
        } else if y != 0 && self.scroll_x == 0 {
            // a diagonal set by the horizontal band survives the vertical reset
            self.scroll_y = 0;
        }

        if (self.scroll_x != 0 || self.scroll_y != 0) && !timer.is_running() {
            timer.start();
        } else if self.scroll_x == 0 && self.scroll_y == 0 && timer.is_running() {
            timer.stop();
        }
    }

    /// Applies one tick of the current scroll velocity.
    pub fn scroll(&mut self) -> bool {
        self.pan(self.scroll_x, self.scroll_y)
    }

    /// Shifts the view by a pixel delta, holding it at the map edge.
    ///
    /// The center cell is recomputed from the screen midpoint; if it lands
    /// outside the map interior the whole step is reverted and `false`
    /// returned, leaving the offset exactly as it was.
    pub fn pan(&mut self, dx: i32, dy: i32) -> bool {
        self.offset.x += dx;
        self.offset.y += dy;

        let mid = ScreenPosition::new(self.screen_width / 2, self.screen_height / 2);
        self.center = self.screen_to_map(mid);

        if self.center.x < 0
            || self.center.x > self.map_length - 1
            || self.center.y < 0
            || self.center.y > self.map_width - 1
        {
            self.offset.x -= dx;
            self.offset.y -= dy;
            return false;
        }
        true
    }

    /// Moves the view one level up, keeping the same spot under the cursor.
    pub fn level_up(&mut self) {
        if self.offset.z < self.map_height - 1 {
            self.offset.z += 1;
            self.offset.y += self.sprite_height / 2;
        }
    }

    /// Moves the view one level down.
    pub fn level_down(&mut self) {
        if self.offset.z > 0 {
            self.offset.z -= 1;
            self.offset.y -= self.sprite_height / 2;
        }
    }

    /// Jumps straight to a level, clamped to the map's height.
    pub fn set_view_level(&mut self, level: i32) {
        self.offset.z = level.clamp(0, self.map_height - 1);
    }

    /// Centers the view on a map position.
    ///
    /// The target is clamped to the map (one cell of slack on x/y for the
    /// edge sentinels) and the offset is set so its projection lands in
    /// the middle of the visible strip.
    pub fn center_on(&mut self, target: GridPosition) {
        self.center = GridPosition {
            x: target.x.clamp(-1, self.map_length),
            y: target.y.clamp(-1, self.map_width),
            z: target.z.clamp(0, self.map_height - 1),
        };
        let proj = transform::map_to_screen(self.center, self.sprite_width, self.sprite_height);
        self.offset.x = -(proj.x - self.screen_width / 2);
        self.offset.y = -(proj.y - self.visible_height / 2);
        self.offset.z = self.center.z;
    }

    /// The cell currently in the middle of the view.
    pub fn center(&self) -> GridPosition {
        GridPosition {
            z: self.offset.z,
            ..self.center
        }
    }

    /// Converts a screen pixel to the map cell under it on the viewed level.
    pub fn screen_to_map(&self, screen: ScreenPosition) -> GridPosition {
        transform::screen_to_map(
            screen,
            self.offset,
            self.sprite_width,
            self.sprite_height,
            self.map_length,
            self.map_width,
        )
    }

    /// Screen position of a cell's sprite anchor under the current offset.
    pub fn screen_position_of(&self, grid: GridPosition) -> ScreenPosition {
        let proj = transform::map_to_screen(grid, self.sprite_width, self.sprite_height);
        ScreenPosition {
            x: proj.x + self.offset.x,
            y: proj.y + self.offset.y,
        }
    }

    /// Screen position of a voxel under the current offset.
    pub fn voxel_screen_position(&self, voxel: VoxelPosition) -> ScreenPosition {
        transform::voxel_to_screen(voxel, self.offset, self.sprite_width, self.sprite_height)
    }
}
