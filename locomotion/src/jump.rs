//! Jump request buffering and grace-window bookkeeping.
//!
//! Two tolerance windows make tick-rate input timing forgiving:
//! - pre-grounding grace: a jump pressed slightly before landing stays
//!   buffered and launches on touchdown;
//! - post-grounding grace: a jump pressed slightly after walking off a
//!   ledge still launches.
//!
//! `consumed` latches between a successful launch and the next tick spent
//! grounded without launching, so holding jump cannot double-fire.

/// Mutable jump state owned by the controller.
#[derive(Clone, Copy, Debug)]
pub struct JumpBuffer {
    /// A jump request is pending.
    pub requested: bool,
    /// The current airborne phase already spent its jump.
    pub consumed: bool,
    /// A launch happened during the current tick's velocity pass.
    pub jumped_this_tick: bool,
    /// Seconds since the pending request was made.
    pub time_since_requested: f32,
    /// Seconds since the character last counted as grounded for jumping.
    pub time_since_last_grounded: f32,
}

impl Default for JumpBuffer {
    fn default() -> Self {
        Self {
            requested: false,
            consumed: false,
            jumped_this_tick: false,
            // No request yet; infinity keeps the expiry check inert.
            time_since_requested: f32::INFINITY,
            time_since_last_grounded: 0.0,
        }
    }
}

impl JumpBuffer {
    /// Record a jump input edge.
    pub fn request(&mut self) {
        self.requested = true;
        self.time_since_requested = 0.0;
    }

    /// Whether a launch is allowed right now.
    ///
    /// `grounded_for_jump` is the sliding-aware grounding definition the
    /// config selects (stable-only, or any contacted ground).
    pub fn can_launch(&self, grounded_for_jump: bool, post_grounding_grace: f32) -> bool {
        self.requested
            && !self.consumed
            && (grounded_for_jump || self.time_since_last_grounded <= post_grounding_grace)
    }

    /// Commit a launch.
    pub fn mark_launched(&mut self) {
        self.requested = false;
        self.consumed = true;
        self.jumped_this_tick = true;
    }

    /// Start-of-velocity-pass bookkeeping: age the pending request.
    pub fn begin_tick(&mut self, dt: f32) {
        self.jumped_this_tick = false;
        self.time_since_requested += dt;
    }

    /// End-of-tick bookkeeping, run after the motor has moved.
    ///
    /// Expires requests that outlived the pre-grounding grace, re-arms
    /// `consumed` after a grounded tick with no launch, and tracks the
    /// time since the character was last able to jump from the ground.
    pub fn end_tick(&mut self, grounded_for_jump: bool, pre_grounding_grace: f32, dt: f32) {
        if self.requested && self.time_since_requested > pre_grounding_grace {
            self.requested = false;
        }

        if grounded_for_jump {
            if !self.jumped_this_tick {
                self.consumed = false;
            }
            self.time_since_last_grounded = 0.0;
        } else {
            self.time_since_last_grounded += dt;
        }
    }
}
