//! Guarded geometric helpers used by the velocity and orientation passes.
//!
//! Every helper tolerates degenerate input (zero-length directions,
//! antiparallel axes) by returning zero vectors or identity rotations
//! instead of NaN. Callers rely on this: the solver has no error type.

use nalgebra as na;

use crate::settings::DIST_EPS;
use crate::types::{Quat, Vec3};

/// Remove the component of `v` along the (unit) plane normal `n`.
#[inline]
pub fn project_on_plane(v: Vec3, n: Vec3) -> Vec3 {
    v - n * v.dot(&n)
}

/// The component of `v` along the (unit) direction `n`.
#[inline]
pub fn project_on_vector(v: Vec3, n: Vec3) -> Vec3 {
    n * v.dot(&n)
}

/// Clamp `v` to at most `max_len` without changing its direction.
#[inline]
pub fn clamp_magnitude(v: Vec3, max_len: f32) -> Vec3 {
    let len_sq = v.norm_squared();
    if len_sq > max_len * max_len {
        v * (max_len / len_sq.sqrt())
    } else {
        v
    }
}

/// Normalize `v`, or return zero if it is too short to have a direction.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len_sq = v.norm_squared();
    if len_sq > DIST_EPS * DIST_EPS {
        v / len_sq.sqrt()
    } else {
        Vec3::zeros()
    }
}

/// Unit direction along `direction` re-expressed in the plane tangent to
/// `surface_normal`, using `up` to pick the sideways axis.
///
/// Returns zero when `direction` has no planar component to reorient.
#[inline]
pub fn direction_tangent_to_surface(direction: Vec3, surface_normal: Vec3, up: Vec3) -> Vec3 {
    let direction_right = direction.cross(&up);
    normalize_or_zero(surface_normal.cross(&direction_right))
}

/// Frame-rate independent blend factor for an exponential smoothing with
/// the given sharpness: `1 - exp(-sharpness * dt)`.
#[inline]
pub fn smoothing(sharpness: f32, dt: f32) -> f32 {
    1.0 - (-sharpness * dt).exp()
}

/// Shortest rotation taking `from` onto `to`.
///
/// Degenerate inputs yield the identity. Antiparallel inputs rotate half a
/// turn around an arbitrary axis orthogonal to `from`.
pub fn rotation_from_to(from: Vec3, to: Vec3) -> Quat {
    if from.norm_squared() <= DIST_EPS * DIST_EPS || to.norm_squared() <= DIST_EPS * DIST_EPS {
        return Quat::identity();
    }

    match Quat::rotation_between(&from, &to) {
        Some(q) => q,
        None => {
            let axis = na::Unit::new_normalize(orthogonal(from));
            Quat::from_axis_angle(&axis, std::f32::consts::PI)
        }
    }
}

/// Spherically interpolate between two directions, ignoring magnitudes.
///
/// Returns a unit vector (or zero if both inputs are degenerate). The path
/// between antiparallel directions is an arbitrary great circle.
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let from_n = normalize_or_zero(from);
    let to_n = normalize_or_zero(to);
    if from_n == Vec3::zeros() {
        return to_n;
    }
    if to_n == Vec3::zeros() {
        return from_n;
    }

    let partial = rotation_from_to(from_n, to_n).powf(t.clamp(0.0, 1.0));
    normalize_or_zero(partial * from_n)
}

/// Some vector orthogonal to `v` (not normalized).
fn orthogonal(v: Vec3) -> Vec3 {
    let candidate = if v.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    v.cross(&candidate)
}
