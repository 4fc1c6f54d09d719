//! Velocity pass: ground/air blending, air-speed clamping, jumping.

use crate::input::MotionIntent;
use crate::jump::JumpBuffer;
use crate::math::{
    clamp_magnitude, normalize_or_zero, project_on_plane, project_on_vector, smoothing,
};
use crate::motor::CharacterMotor;
use crate::settings::LocomotionConfig;
use crate::state::StatePolicy;
use crate::types::Vec3;

/// Compute the tick's new velocity from the current one.
///
/// Deterministic: the only state consulted beyond the arguments is the
/// motor's grounding report, and the only state mutated is the jump buffer
/// and the pending impulse (applied once, then cleared).
pub fn update_velocity<M: CharacterMotor>(
    mut velocity: Vec3,
    intent: &MotionIntent,
    policy: StatePolicy,
    jump: &mut JumpBuffer,
    pending_impulse: &mut Vec3,
    config: &LocomotionConfig,
    motor: &mut M,
    dt: f32,
) -> Vec3 {
    let grounding = motor.grounding();
    let up = motor.character_up();

    if grounding.is_stable_on_ground {
        // 1) Reorient the current velocity along the slope, preserving its
        //    magnitude so speed stays continuous across normal changes.
        let speed = velocity.norm();
        let ground_normal = grounding.ground_normal;
        velocity = motor.direction_tangent_to_surface(velocity, ground_normal) * speed;

        // 2) Target velocity follows the slope: reorient the planar intent
        //    into the ground plane, keep its magnitude.
        let input_right = intent.move_dir.cross(&up);
        let reoriented_input =
            normalize_or_zero(ground_normal.cross(&input_right)) * intent.move_dir.norm();
        let target_velocity =
            reoriented_input * (config.max_stable_move_speed * policy.speed_multiplier);

        // 3) Exponential blend toward the target (frame-rate independent).
        velocity = velocity.lerp(
            &target_velocity,
            smoothing(config.stable_movement_sharpness, dt),
        );
    } else {
        if intent.move_dir.norm_squared() > 0.0 {
            let mut added_velocity = intent.move_dir * (config.air_acceleration_speed * dt);

            let planar_velocity = project_on_plane(velocity, up);
            if planar_velocity.norm() < config.max_air_move_speed {
                // Cap the addition so the resulting planar speed never
                // exceeds the limit. Computing the delta from the clamped
                // total means over-speed deceleration is never flipped
                // into acceleration.
                let new_total =
                    clamp_magnitude(planar_velocity + added_velocity, config.max_air_move_speed);
                added_velocity = new_total - planar_velocity;
            } else if planar_velocity.dot(&added_velocity) > 0.0 {
                // Already over the limit: refuse additions along the
                // over-speed direction, keep the orthogonal part.
                added_velocity =
                    project_on_plane(added_velocity, normalize_or_zero(planar_velocity));
            }

            // Any contacted ground (walkable or not) blocks accelerating
            // into its slope, so air control cannot climb steep walls.
            if grounding.found_any_ground
                && (velocity + added_velocity).dot(&added_velocity) > 0.0
            {
                let obstruction_normal =
                    normalize_or_zero(up.cross(&grounding.ground_normal).cross(&up));
                added_velocity = project_on_plane(added_velocity, obstruction_normal);
            }

            velocity += added_velocity;
        }

        velocity += config.gravity * dt;
        velocity *= 1.0 / (1.0 + config.drag * dt);
    }

    // Jump sub-state machine, evaluated every tick after the branch above.
    jump.begin_tick(dt);
    if jump.requested && policy.allow_jump {
        let grounded_for_jump = if config.allow_jumping_when_sliding {
            grounding.found_any_ground
        } else {
            grounding.is_stable_on_ground
        };

        if jump.can_launch(grounded_for_jump, config.jump_post_grounding_grace) {
            // Pick the launch direction before leaving the ground: the
            // surface normal when only unstable ground holds us, else up.
            let mut jump_direction = up;
            if grounding.found_any_ground && !grounding.is_stable_on_ground {
                jump_direction = grounding.ground_normal;
            }

            // Without this the motor would snap us right back down.
            motor.force_unground();

            velocity += jump_direction * config.jump_up_speed - project_on_vector(velocity, up);
            velocity += intent.move_dir * config.jump_scalable_forward_speed;
            jump.mark_launched();
        }
    }

    // Externally queued impulses apply once, regardless of branch.
    if pending_impulse.norm_squared() > 0.0 {
        velocity += *pending_impulse;
        *pending_impulse = Vec3::zeros();
    }

    velocity
}
