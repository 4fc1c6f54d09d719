//! Crouch/stand capsule negotiation.
//!
//! Crouching shrinks the capsule immediately on the input's rising edge.
//! Standing back up is gated: the capsule is tentatively resized to the
//! standing dimensions and an overlap probe runs at the current transient
//! pose; any obstruction reverts the resize and the attempt retries on the
//! next tick (level-triggered, not edge-triggered). A permanently blocked
//! stand-up is a steady state, not an error.

use crate::motor::CharacterMotor;
use crate::types::CapsuleDims;

/// Mesh squash factor applied while crouched, read by the render layer.
const CROUCH_VISUAL_SCALE: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
pub struct CrouchState {
    is_crouching: bool,
    wants_crouch: bool,
    standing_dims: CapsuleDims,
    crouched_dims: CapsuleDims,
}

impl CrouchState {
    pub fn new(standing_dims: CapsuleDims, crouched_dims: CapsuleDims) -> Self {
        Self {
            is_crouching: false,
            wants_crouch: false,
            standing_dims,
            crouched_dims,
        }
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    #[inline]
    pub fn wants_crouch(&self) -> bool {
        self.wants_crouch
    }

    /// Capsule dimensions currently in effect.
    #[inline]
    pub fn current_dims(&self) -> CapsuleDims {
        if self.is_crouching {
            self.crouched_dims
        } else {
            self.standing_dims
        }
    }

    /// Vertical scale cue for the character mesh.
    #[inline]
    pub fn visual_scale(&self) -> f32 {
        if self.is_crouching {
            CROUCH_VISUAL_SCALE
        } else {
            1.0
        }
    }

    /// Feed the tick's crouch input. The rising edge shrinks the capsule
    /// immediately; the falling edge only records the wish to stand.
    pub fn on_crouch_input<M: CharacterMotor>(&mut self, held: bool, motor: &mut M) {
        if held {
            self.wants_crouch = true;
            if !self.is_crouching {
                self.is_crouching = true;
                motor.set_capsule_dimensions(self.crouched_dims);
            }
        } else {
            self.wants_crouch = false;
        }
    }

    /// Attempt the pending stand-up, once per tick after the move.
    ///
    /// Returns true when the character stood up this call. Re-running on an
    /// already-standing character is a no-op.
    pub fn resolve_stand_up<M: CharacterMotor>(&mut self, motor: &mut M) -> bool {
        if !self.is_crouching || self.wants_crouch {
            return false;
        }

        // Probe at standing size before committing to it.
        motor.set_capsule_dimensions(self.standing_dims);
        let position = motor.transient_position();
        let rotation = motor.transient_rotation();
        if motor.overlap_count(position, rotation) > 0 {
            // Blocked: stay crouched and retry next tick.
            motor.set_capsule_dimensions(self.crouched_dims);
            return false;
        }

        self.is_crouching = false;
        true
    }
}
