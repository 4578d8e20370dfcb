//! Provides constants for the library.

use std::f32::consts::PI;

/// Default maze dimension (cells per side)
pub const DEFAULT_GRID_SIZE: usize = 6;
/// Default linear scale of one occupancy cell in viewer-space units
pub const DEFAULT_CELL_SIZE: f32 = 64.0;
/// Default field of view, 75 degrees
pub const DEFAULT_FOV: f32 = 75.0 * PI / 180.0;
/// Default forward speed of the viewer, in viewer-space units per frame
pub const DEFAULT_VIEWER_SPEED: f32 = 2.0;
/// Default number of rays per frame, one per output column
pub const DEFAULT_RAY_COUNT: usize = 320;
