use serde::{Deserialize, Serialize};

/// Voxels per grid cell along the x axis.
pub const VOXELS_PER_CELL_X: i32 = 16;
/// Voxels per grid cell along the y axis.
pub const VOXELS_PER_CELL_Y: i32 = 16;
/// Voxels per grid cell along the z axis (cells are taller than wide).
pub const VOXELS_PER_CELL_Z: i32 = 24;

/// A cell on the battle map.
///
/// Axis convention: x runs along the map's length axis, y along its width
/// axis, z is the level. The interior is `0 <= x < map_length`,
/// `0 <= y < map_width`, `0 <= z < map_height`; transform outputs may use
/// -1 / max as an "off the edge" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        GridPosition { x, y, z }
    }
}

/// A pixel position on screen. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: i32,
    pub y: i32,
}

impl ScreenPosition {
    pub fn new(x: i32, y: i32) -> Self {
        ScreenPosition { x, y }
    }
}

/// Pixel translation applied to projected positions.
///
/// x/y shift everything drawn on screen; z doubles as the currently
/// viewed map level. Mutated only by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A sub-cell position in voxel space (16x16x24 voxels per grid cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        VoxelPosition { x, y, z }
    }

    /// Returns the grid cell containing this voxel.
    ///
    /// Uses floor division so voxels left/above the map origin resolve to
    /// negative cells instead of collapsing onto cell 0.
    pub fn containing_cell(&self) -> GridPosition {
        GridPosition {
            x: self.x.div_euclid(VOXELS_PER_CELL_X),
            y: self.y.div_euclid(VOXELS_PER_CELL_Y),
            z: self.z.div_euclid(VOXELS_PER_CELL_Z),
        }
    }

    /// Returns the voxel offset within its containing cell.
    ///
    /// Components are always in `[0, 16)` / `[0, 16)` / `[0, 24)`.
    pub fn cell_offset(&self) -> (i32, i32, i32) {
        (
            self.x.rem_euclid(VOXELS_PER_CELL_X),
            self.y.rem_euclid(VOXELS_PER_CELL_Y),
            self.z.rem_euclid(VOXELS_PER_CELL_Z),
        )
    }
}
