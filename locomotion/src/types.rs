/*!
Core data types and math aliases shared by the solver modules.

This module intentionally contains no algorithms. It defines the data
exchanged between:
- the motor facade (grounding snapshots, capsule resize commands)
- the velocity and orientation passes
- the crouch manager
- the controller that sequences them per tick
*/

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Capsule dimensions for the character collider.
///
/// `height` is the full end-to-end capsule height and `center_y` the capsule
/// center's offset along the character's local up axis, matching the resize
/// command the motor accepts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDims {
    pub radius: f32,
    pub height: f32,
    pub center_y: f32,
}

impl CapsuleDims {
    #[inline]
    pub fn new(radius: f32, height: f32, center_y: f32) -> Self {
        Self {
            radius,
            height,
            center_y,
        }
    }
}

/// Per-tick grounding snapshot reported by the motor.
///
/// The solver treats this as authoritative truth for the current tick; it
/// never re-probes or second-guesses it, only reacts.
///
/// - `is_stable_on_ground`: standing on ground within the walkable slope
///   limit (snap/no-slide behavior applies).
/// - `found_any_ground`: some ground was contacted, walkable or not. Always
///   true when `is_stable_on_ground` is.
/// - `ground_normal`: surface normal of the contacted ground. Only
///   meaningful when `found_any_ground` is true.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundingStatus {
    pub is_stable_on_ground: bool,
    pub found_any_ground: bool,
    pub ground_normal: Vec3,
}

impl GroundingStatus {
    /// No ground contact at all this tick.
    #[inline]
    pub fn airborne() -> Self {
        Self {
            is_stable_on_ground: false,
            found_any_ground: false,
            ground_normal: Vec3::y(),
        }
    }

    /// Firmly planted on walkable ground.
    #[inline]
    pub fn stable(ground_normal: Vec3) -> Self {
        Self {
            is_stable_on_ground: true,
            found_any_ground: true,
            ground_normal,
        }
    }

    /// Touching ground that is too steep to stand on (sliding).
    #[inline]
    pub fn unstable(ground_normal: Vec3) -> Self {
        Self {
            is_stable_on_ground: false,
            found_any_ground: true,
            ground_normal,
        }
    }
}

impl Default for GroundingStatus {
    fn default() -> Self {
        Self::airborne()
    }
}
