//! Facade over the external character motor.
//!
//! The motor owns collision: capsule sweeps, ground probing, overlap
//! resolution, and the actual move. The solver only reads the motor's
//! per-tick report and issues a handful of commands through this trait.
//! Implementations are expected to be cheap accessors over state the motor
//! already computed for the tick.

use crate::math;
use crate::types::{CapsuleDims, GroundingStatus, Quat, Vec3};

pub trait CharacterMotor {
    /// Grounding report for the current tick.
    fn grounding(&self) -> GroundingStatus;

    /// The character's local up axis in world space (unit).
    fn character_up(&self) -> Vec3;

    /// The character's current facing in world space (unit).
    fn character_forward(&self) -> Vec3;

    /// Position the motor is currently integrating toward this tick.
    fn transient_position(&self) -> Vec3;

    /// Rotation the motor is currently integrating toward this tick.
    fn transient_rotation(&self) -> Quat;

    /// Move the transient position directly (used to pivot slope
    /// re-alignment around the capsule's lower hemisphere center).
    fn set_transient_position(&mut self, position: Vec3);

    /// Skip ground snapping for one tick so a jump impulse can actually
    /// separate the character from the surface.
    fn force_unground(&mut self);

    /// Resize the character capsule.
    fn set_capsule_dimensions(&mut self, dims: CapsuleDims);

    /// Number of blocking overlaps the capsule would have at the given
    /// pose. Used to gate crouch stand-up.
    fn overlap_count(&mut self, position: Vec3, rotation: Quat) -> usize;

    /// Reorient `direction` into the plane tangent to `surface_normal`,
    /// preserving heading relative to the character's up axis.
    ///
    /// Motors with richer surface knowledge may override this; the default
    /// is the standard cross-product reprojection.
    fn direction_tangent_to_surface(&self, direction: Vec3, surface_normal: Vec3) -> Vec3 {
        math::direction_tangent_to_surface(direction, surface_normal, self.character_up())
    }
}
