//! Orientation pass: facing blend plus optional up-axis re-alignment.

use crate::math::{normalize_or_zero, rotation_from_to, slerp_direction, smoothing};
use crate::motor::CharacterMotor;
use crate::settings::{BonusOrientationMethod, DIST_EPS, LocomotionConfig};
use crate::types::{Quat, Vec3};

/// Compute the tick's new rotation.
///
/// The facing pass eases the motor's forward toward `look_dir` with the
/// same exponential time-constant the velocity blend uses, then rebuilds
/// the rotation from the smoothed forward and the current up. The bonus
/// pass then eases the up axis toward world-up, inverse gravity, or the
/// ground slope, per config.
///
/// `capsule_radius` is needed by the slope re-alignment, which pivots the
/// character around the capsule's lower hemisphere center (moving the
/// transient position through the motor) so the feet stay planted instead
/// of the whole body sweeping around its origin.
pub fn update_rotation<M: CharacterMotor>(
    current_rotation: Quat,
    look_dir: Vec3,
    config: &LocomotionConfig,
    capsule_radius: f32,
    motor: &mut M,
    dt: f32,
) -> Quat {
    let up = motor.character_up();
    let mut rotation = current_rotation;

    if look_dir.norm_squared() > DIST_EPS * DIST_EPS && config.orientation_sharpness > 0.0 {
        let t = smoothing(config.orientation_sharpness, dt);
        let smoothed_forward = slerp_direction(motor.character_forward(), look_dir, t);
        if smoothed_forward.norm_squared() > DIST_EPS * DIST_EPS {
            rotation = Quat::face_towards(&smoothed_forward, &up);
        }
    }

    let current_up = rotation * Vec3::y();
    let t = smoothing(config.bonus_orientation_sharpness, dt);

    match config.bonus_orientation_method {
        BonusOrientationMethod::TowardsGravity => {
            align_up(&mut rotation, current_up, -config.gravity, t);
        }
        BonusOrientationMethod::TowardsGroundSlopeAndGravity => {
            let grounding = motor.grounding();
            if grounding.is_stable_on_ground {
                // Pivot around the lower hemisphere center, not the origin.
                let bottom_hemi_center = motor.transient_position() + current_up * capsule_radius;

                let smoothed_normal = slerp_direction(up, grounding.ground_normal, t);
                rotation = rotation_from_to(current_up, smoothed_normal) * rotation;

                motor.set_transient_position(
                    bottom_hemi_center + rotation * (Vec3::y() * -capsule_radius),
                );
            } else {
                align_up(&mut rotation, current_up, -config.gravity, t);
            }
        }
        BonusOrientationMethod::None => {
            align_up(&mut rotation, current_up, Vec3::y(), t);
        }
    }

    rotation
}

/// Ease the rotation's up axis toward `target_up` by blend factor `t`.
fn align_up(rotation: &mut Quat, current_up: Vec3, target_up: Vec3, t: f32) {
    let target = normalize_or_zero(target_up);
    if target == Vec3::zeros() {
        return;
    }
    let smoothed_up = slerp_direction(current_up, target, t);
    *rotation = rotation_from_to(current_up, smoothed_up) * *rotation;
}
