//! First-person viewer pose.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Position, facing angle, and forward speed of the first-person viewer.
///
/// Coordinates live in occupancy-grid space scaled by the engine's cell
/// size. The host's input step is the single writer, mutating the pose once
/// per frame before rays are cast.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    /// Horizontal position, in viewer-space units
    pub x: f32,
    /// Vertical position, in viewer-space units (grows downward)
    pub y: f32,
    /// Facing angle in radians; 0 points along +x
    pub angle: f32,
    /// Forward speed, in viewer-space units per frame
    pub speed: f32,
}

impl Viewer {
    /// Creates a stationary viewer at `(x, y)` facing `angle`.
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle,
            speed: 0.0,
        }
    }

    /// The viewer's position as a point.
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Integrates one frame of movement along the facing angle.
    pub fn advance(&mut self) {
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
    }

    /// Rotates the facing angle by `delta` radians.
    pub fn turn(&mut self, delta: f32) {
        self.angle += delta;
    }
}
