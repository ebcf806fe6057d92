//! Per-tick animation constants and the transform carried by every visual.

mod transform;

pub use transform::Transform;

use core::f32::consts::PI;

/// Interpolation factor applied once per frame. Not scaled by elapsed time.
pub const SPEED: f32 = 0.1;

/// Distance under which a moving card counts as arrived.
pub const ARRIVE_EPSILON: f32 = 0.01;

/// Angle (radians) under which a rotating card counts as settled.
pub const ROTATE_EPSILON: f32 = 0.01;

/// X tilt forced onto floating cards after they turn toward the viewer.
pub const FLOAT_TILT: f32 = -PI / 2.5;

/// Angle of the show/hide flip.
pub const FLIP_ANGLE: f32 = -PI / 2.0;
