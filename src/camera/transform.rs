//! Pure projection math between map space and screen space.
//!
//! The battle map uses a 2:1 isometric diamond projection: one grid step
//! in x moves a sprite half a cell right and a quarter cell down, one step
//! in y mirrors that to the left. Levels stack upward by shearing the
//! screen y axis. The forward projection is offset-free (the camera adds
//! its scroll offset when drawing); the inverse and the voxel projection
//! take the current offset, since a pixel only names a cell relative to
//! where the view sits.

use crate::position::{GridPosition, ScreenPosition, ViewOffset, VoxelPosition};

/// Pixels a position rises on screen per level of height.
///
/// Shared by the forward projection and the inverse pre-shift; the two
/// must agree or level changes would drift the view sideways.
pub fn level_rise(sprite_width: i32, sprite_height: i32) -> i32 {
    (sprite_height + sprite_width / 4) / 2
}

/// Projects a grid cell to the screen position of its sprite anchor.
///
/// # Arguments
/// * `grid` - Cell to project.
/// * `sprite_width` - Cell sprite width in pixels.
/// * `sprite_height` - Cell sprite height in pixels.
pub fn map_to_screen(grid: GridPosition, sprite_width: i32, sprite_height: i32) -> ScreenPosition {
    ScreenPosition {
        x: (grid.x - grid.y) * (sprite_width / 2),
        y: (grid.x + grid.y) * (sprite_width / 4) - grid.z * level_rise(sprite_width, sprite_height),
    }
}

/// Finds the map cell under a screen pixel on the currently viewed level.
///
/// Exact inverse of [`map_to_screen`] plus offset: feeding a projected
/// anchor back in returns its cell. The level shear is unwound first so
/// higher levels pick their own cells, then the diamond is unsheared with
/// floor division; a pixel left of cell 0 must resolve to -1, not
/// collapse onto 0. Outputs are clamped to `[-1, map_length]` /
/// `[-1, map_width]`, one cell of slack past each edge.
pub fn screen_to_map(
    screen: ScreenPosition,
    offset: ViewOffset,
    sprite_width: i32,
    sprite_height: i32,
    map_length: i32,
    map_width: i32,
) -> GridPosition {
    let shifted_y =
        screen.y - sprite_width / 2 + offset.z * level_rise(sprite_width, sprite_height);

    let raw_y = -screen.x + offset.x + 2 * shifted_y - 2 * offset.y + sprite_width;
    let raw_x = shifted_y - offset.y - raw_y.div_euclid(4) + sprite_width / 2;

    GridPosition {
        x: raw_x.div_euclid(sprite_width / 4).clamp(-1, map_length),
        y: raw_y.div_euclid(sprite_width).clamp(-1, map_width),
        z: offset.z,
    }
}

/// Projects a voxel to its exact on-screen position under an offset.
///
/// Projects the containing cell, then nudges by the voxel's offset within
/// that cell: x voxels run down-right, y voxels down-left, z voxels
/// straight up. Used for targeting and projectile visuals, where whole
/// cells are too coarse.
pub fn voxel_to_screen(
    voxel: VoxelPosition,
    offset: ViewOffset,
    sprite_width: i32,
    sprite_height: i32,
) -> ScreenPosition {
    let base = map_to_screen(voxel.containing_cell(), sprite_width, sprite_height);
    let (dx, dy, dz) = voxel.cell_offset();
    ScreenPosition {
        x: base.x + (dx - dy) + sprite_width / 2 + offset.x,
        y: base.y + (sprite_height + dx + dy - 2 * dz) / 2 + offset.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRITE_W: i32 = 32;
    const SPRITE_H: i32 = 40;

    fn still() -> ViewOffset {
        ViewOffset { x: 0, y: 0, z: 0 }
    }

    #[test]
    fn test_origin_projects_to_origin() {
        let screen = map_to_screen(GridPosition::new(0, 0, 0), SPRITE_W, SPRITE_H);
        assert_eq!(screen, ScreenPosition::new(0, 0));
    }

    #[test]
    fn test_x_step_moves_down_right() {
        let screen = map_to_screen(GridPosition::new(1, 0, 0), SPRITE_W, SPRITE_H);
        assert_eq!(screen, ScreenPosition::new(16, 8));
    }

    #[test]
    fn test_y_step_moves_down_left() {
        let screen = map_to_screen(GridPosition::new(0, 1, 0), SPRITE_W, SPRITE_H);
        assert_eq!(screen, ScreenPosition::new(-16, 8));
    }

    #[test]
    fn test_level_raises_sprite() {
        // one level up rises by (40 + 8) / 2 = 24 px
        let ground = map_to_screen(GridPosition::new(3, 2, 0), SPRITE_W, SPRITE_H);
        let raised = map_to_screen(GridPosition::new(3, 2, 1), SPRITE_W, SPRITE_H);
        assert_eq!(raised.x, ground.x);
        assert_eq!(raised.y, ground.y - 24);
    }

    #[test]
    fn test_round_trip_under_arbitrary_offset() {
        let offset = ViewOffset { x: -137, y: 89, z: 0 };
        for x in -1..=10 {
            for y in -1..=10 {
                let cell = GridPosition::new(x, y, 0);
                let projected = map_to_screen(cell, SPRITE_W, SPRITE_H);
                let screen = ScreenPosition::new(projected.x + offset.x, projected.y + offset.y);
                assert_eq!(
                    screen_to_map(screen, offset, SPRITE_W, SPRITE_H, 20, 20),
                    cell
                );
            }
        }
    }

    #[test]
    fn test_inverse_floors_left_of_the_map() {
        // one pixel above a projected anchor crosses into the previous
        // y row; floor division must say -1 rather than 0
        let anchor = map_to_screen(GridPosition::new(0, 0, 0), SPRITE_W, SPRITE_H);
        let above = ScreenPosition::new(anchor.x, anchor.y - 1);
        assert_eq!(
            screen_to_map(above, still(), SPRITE_W, SPRITE_H, 10, 10),
            GridPosition::new(0, -1, 0)
        );
    }

    #[test]
    fn test_inverse_clamps_far_outside() {
        let far = ScreenPosition::new(5000, 5000);
        let cell = screen_to_map(far, still(), SPRITE_W, SPRITE_H, 10, 10);
        assert_eq!((cell.x, cell.y), (10, 10));
        let near = ScreenPosition::new(-5000, -5000);
        let cell = screen_to_map(near, still(), SPRITE_W, SPRITE_H, 10, 10);
        assert_eq!((cell.x, cell.y), (-1, -1));
    }

    #[test]
    fn test_voxel_at_cell_corner() {
        let cell = map_to_screen(GridPosition::new(2, 1, 0), SPRITE_W, SPRITE_H);
        let screen = voxel_to_screen(VoxelPosition::new(32, 16, 0), still(), SPRITE_W, SPRITE_H);
        // corner voxel sits at the diamond's top corner, half a sprite in
        assert_eq!(screen, ScreenPosition::new(cell.x + 16, cell.y + 20));
    }

    #[test]
    fn test_voxel_offsets_within_cell() {
        let base = voxel_to_screen(VoxelPosition::new(32, 16, 0), still(), SPRITE_W, SPRITE_H);
        // +x voxels drift down-right
        let vx = voxel_to_screen(VoxelPosition::new(34, 16, 0), still(), SPRITE_W, SPRITE_H);
        assert_eq!((vx.x - base.x, vx.y - base.y), (2, 1));
        // +y voxels drift down-left
        let vy = voxel_to_screen(VoxelPosition::new(32, 18, 0), still(), SPRITE_W, SPRITE_H);
        assert_eq!((vy.x - base.x, vy.y - base.y), (-2, 1));
        // +z voxels rise straight up
        let vz = voxel_to_screen(VoxelPosition::new(32, 16, 4), still(), SPRITE_W, SPRITE_H);
        assert_eq!((vz.x - base.x, vz.y - base.y), (0, -4));
    }

    #[test]
    fn test_voxel_z_spans_cell_heights() {
        // 24 voxels of height equal exactly one level of rise
        let floor = voxel_to_screen(VoxelPosition::new(8, 8, 0), still(), SPRITE_W, SPRITE_H);
        let above = voxel_to_screen(VoxelPosition::new(8, 8, 24), still(), SPRITE_W, SPRITE_H);
        assert_eq!(above.x, floor.x);
        assert_eq!(above.y, floor.y - 24);
    }

    #[test]
    fn test_voxel_projection_carries_the_offset() {
        let offset = ViewOffset { x: -250, y: 250, z: 0 };
        let still_pos = voxel_to_screen(VoxelPosition::new(40, 12, 6), still(), SPRITE_W, SPRITE_H);
        let moved = voxel_to_screen(VoxelPosition::new(40, 12, 6), offset, SPRITE_W, SPRITE_H);
        assert_eq!((moved.x - still_pos.x, moved.y - still_pos.y), (-250, 250));
    }
}
