/*!
Locomotion solver configuration and tolerances.

These parameters centralize everything the solver tunes on: speeds,
blending sharpness, grace windows, capsule sizes, and the orientation
policy. Keeping them together makes tuning easier and helps ensure
deterministic behavior across platforms.

Notes
- Distances are in meters, speeds in meters per second, times in seconds.
- The config is immutable once constructed; runtime state lives in the
  controller, never here.
*/

use serde::{Deserialize, Serialize};

use crate::types::{CapsuleDims, Vec3};

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, normalization checks, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Squared planar intent magnitude below which move input counts as idle.
/// Filters stick noise out of the Walk/Run classification.
pub const MOVE_INTENT_DEADZONE_SQ: f32 = 0.1;

/// How the character picks its facing target each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationMethod {
    /// Face the camera's planar forward direction.
    #[default]
    TowardsCamera,
    /// Face the current movement direction.
    TowardsMovement,
}

/// Optional secondary pass re-aligning the character's up axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusOrientationMethod {
    /// Keep up eased onto world-up.
    #[default]
    None,
    /// Ease up onto the inverse gravity direction.
    TowardsGravity,
    /// Ease up onto the ground normal while stably grounded, falling back
    /// to the gravity behavior while airborne.
    TowardsGroundSlopeAndGravity,
}

/// Immutable tuning for one character.
///
/// Construct once and hand to the controller; per-tick state (jump buffer,
/// crouch state, locomotion state) is owned by the controller itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocomotionConfig {
    // Ground movement
    /// Base max speed on stable ground (m/s), before state multipliers.
    pub max_stable_move_speed: f32,
    /// Blend sharpness for ground velocity. Higher reaches the target
    /// speed faster; the blend is exponential and frame-rate independent.
    pub stable_movement_sharpness: f32,

    // Air movement
    /// Planar speed cap enforced on air control (m/s).
    pub max_air_move_speed: f32,
    /// Acceleration applied by air control (m/s^2).
    pub air_acceleration_speed: f32,
    /// Air drag coefficient, applied as `v *= 1 / (1 + drag * dt)`.
    pub drag: f32,

    // Orientation
    pub orientation_method: OrientationMethod,
    /// Blend sharpness for facing. Zero disables facing updates.
    pub orientation_sharpness: f32,
    pub bonus_orientation_method: BonusOrientationMethod,
    /// Blend sharpness for the up-axis re-alignment pass.
    pub bonus_orientation_sharpness: f32,

    // Jumping
    /// Permit launching off ground that is too steep to stand on.
    pub allow_jumping_when_sliding: bool,
    /// Launch speed along the jump direction (m/s).
    pub jump_up_speed: f32,
    /// Extra launch speed along the move intent (m/s), scaled by intent
    /// magnitude.
    pub jump_scalable_forward_speed: f32,
    /// How long a buffered jump request stays valid before grounding (s).
    pub jump_pre_grounding_grace: f32,
    /// How long after leaving ground a jump is still honored (s).
    pub jump_post_grounding_grace: f32,

    // State machine
    /// Debounce window during which further state transitions no-op (s).
    pub state_transition_time: f32,
    /// Duration of the landing posture after a ground-contact edge (s).
    pub landing_duration: f32,
    /// Emit a `log::debug!` line on every state transition.
    pub log_state_transitions: bool,

    // Per-state speed multipliers
    pub run_speed_multiplier: f32,
    pub crouch_speed_multiplier: f32,

    // Physics
    /// World gravity (m/s^2). Also defines "down" for the orientation pass.
    pub gravity: Vec3,

    // Capsule
    pub standing_capsule: CapsuleDims,
    pub crouched_capsule: CapsuleDims,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_stable_move_speed: 10.0,
            stable_movement_sharpness: 15.0,

            max_air_move_speed: 15.0,
            air_acceleration_speed: 15.0,
            drag: 0.1,

            orientation_method: OrientationMethod::TowardsCamera,
            orientation_sharpness: 10.0,
            bonus_orientation_method: BonusOrientationMethod::None,
            bonus_orientation_sharpness: 10.0,

            allow_jumping_when_sliding: false,
            jump_up_speed: 10.0,
            jump_scalable_forward_speed: 10.0,
            jump_pre_grounding_grace: 0.1,
            jump_post_grounding_grace: 0.1,

            state_transition_time: 0.1,
            landing_duration: 0.15,
            log_state_transitions: false,

            run_speed_multiplier: 1.5,
            crouch_speed_multiplier: 0.5,

            gravity: Vec3::new(0.0, -30.0, 0.0),

            standing_capsule: CapsuleDims::new(0.5, 2.0, 1.0),
            crouched_capsule: CapsuleDims::new(0.5, 1.0, 0.5),
        }
    }
}
