//! Per-tick input snapshot and its translation into a motion intent.
//!
//! The input layer (device binding, camera rig) is external; it hands the
//! solver one immutable [`InputSnapshot`] per tick. [`MotionIntent`] is the
//! solver-facing form: world-space move/look directions on the character's
//! up-plane, derived fresh each tick and discarded after it.

use nalgebra as na;

use crate::bitmask_flags::BitmaskFlags;
use crate::define_bitmask_flags;
use crate::math::{clamp_magnitude, normalize_or_zero, project_on_plane};
use crate::settings::{DIST_EPS, OrientationMethod};
use crate::types::{Quat, Vec3};

define_bitmask_flags!(Button, u8, {
    /// Jump was pressed this tick (edge, not level).
    Jump,
    /// Crouch is held.
    Crouch,
    /// Run is held.
    Run,
});

pub type ButtonFlags = BitmaskFlags<u8>;

/// Immutable input capture for one tick.
#[derive(Clone, Copy, Debug)]
pub struct InputSnapshot {
    /// Raw planar move axes: x = strafe, y = forward. Magnitude may exceed
    /// 1 on diagonal digital input; the intent derivation clamps it.
    pub move_axes: na::Vector2<f32>,
    /// World-space rotation of the camera the move axes are relative to.
    pub camera_rotation: Quat,
    pub buttons: ButtonFlags,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            move_axes: na::Vector2::zeros(),
            camera_rotation: Quat::identity(),
            buttons: ButtonFlags::default(),
        }
    }
}

impl InputSnapshot {
    pub fn new(move_axes: na::Vector2<f32>, camera_rotation: Quat, buttons: ButtonFlags) -> Self {
        Self {
            move_axes,
            camera_rotation,
            buttons,
        }
    }
}

/// World-space motion intent for one tick.
#[derive(Clone, Copy, Debug)]
pub struct MotionIntent {
    /// Move direction on the character's up-plane, magnitude clamped to 1.
    pub move_dir: Vec3,
    /// Facing target (unit, or zero when there is nothing to face).
    pub look_dir: Vec3,
    pub jump_requested: bool,
    pub crouch_held: bool,
    pub run_held: bool,
}

impl Default for MotionIntent {
    fn default() -> Self {
        Self {
            move_dir: Vec3::zeros(),
            look_dir: Vec3::zeros(),
            jump_requested: false,
            crouch_held: false,
            run_held: false,
        }
    }
}

impl MotionIntent {
    /// Derive the tick's intent from the raw snapshot.
    ///
    /// The camera's forward is projected onto the plane orthogonal to `up`
    /// to get the planar reference frame. When the camera looks straight
    /// along the up axis that projection vanishes; the camera's own up
    /// vector is projected instead, which is never parallel to its forward.
    pub fn from_snapshot(input: &InputSnapshot, up: Vec3, method: OrientationMethod) -> Self {
        let raw_move = clamp_magnitude(
            Vec3::new(input.move_axes.x, 0.0, input.move_axes.y),
            1.0,
        );

        let mut camera_planar = project_on_plane(input.camera_rotation * Vec3::z(), up);
        if camera_planar.norm_squared() <= DIST_EPS * DIST_EPS {
            camera_planar = project_on_plane(input.camera_rotation * Vec3::y(), up);
        }
        let camera_planar = normalize_or_zero(camera_planar);

        let move_dir = if camera_planar == Vec3::zeros() {
            raw_move
        } else {
            Quat::face_towards(&camera_planar, &up) * raw_move
        };

        let look_dir = match method {
            OrientationMethod::TowardsCamera => camera_planar,
            OrientationMethod::TowardsMovement => normalize_or_zero(move_dir),
        };

        Self {
            move_dir,
            look_dir,
            jump_requested: input.buttons.has(Button::Jump),
            crouch_held: input.buttons.has(Button::Crouch),
            run_held: input.buttons.has(Button::Run),
        }
    }
}
