//! The per-tick locomotion controller.
//!
//! Owns every piece of mutable solver state and exposes the tick hooks the
//! external driver calls in fixed order, once per simulation tick:
//!
//! 1. [`CharacterController::before_update`] — capture input, derive the
//!    intent, apply crouch-down, classify and transition state.
//! 2. [`CharacterController::update_rotation`] — orientation pass.
//! 3. [`CharacterController::update_velocity`] — velocity pass + jumping.
//! 4. (the external motor performs the move and refreshes its grounding)
//! 5. [`CharacterController::post_grounding_update`] — landed/left-ground
//!    edges and the posture axis.
//! 6. [`CharacterController::after_update`] — jump-buffer bookkeeping,
//!    crouch stand-up resolution, timer expiry.
//!
//! No hook suspends or blocks; every transition completes within the tick
//! that triggered it.

use crate::crouch::CrouchState;
use crate::events::{ControllerEvent, EventQueue};
use crate::input::{InputSnapshot, MotionIntent};
use crate::jump::JumpBuffer;
use crate::motor::CharacterMotor;
use crate::orientation;
use crate::settings::LocomotionConfig;
use crate::state::{CharacterState, Posture, StateMachine, StatePolicy, classify};
use crate::types::{GroundingStatus, Quat, Vec3};
use crate::velocity;

pub struct CharacterController {
    config: LocomotionConfig,

    machine: StateMachine,
    posture: Posture,
    jump: JumpBuffer,
    crouch: CrouchState,

    /// The tick's intent, rebuilt in `before_update`.
    intent: MotionIntent,
    /// The tick's state policy, looked up once in `before_update`.
    policy: StatePolicy,

    pending_impulse: Vec3,
    last_velocity: Vec3,
    last_grounding: GroundingStatus,
    landing_timer: f32,

    events: EventQueue,
}

impl CharacterController {
    pub fn new(config: LocomotionConfig) -> Self {
        let crouch = CrouchState::new(config.standing_capsule, config.crouched_capsule);
        let policy = CharacterState::Default.policy(&config);
        Self {
            config,
            machine: StateMachine::new(),
            posture: Posture::Grounded,
            jump: JumpBuffer::default(),
            crouch,
            intent: MotionIntent::default(),
            policy,
            pending_impulse: Vec3::zeros(),
            last_velocity: Vec3::zeros(),
            last_grounding: GroundingStatus::airborne(),
            landing_timer: 0.0,
            events: EventQueue::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> CharacterState {
        self.machine.current()
    }

    #[inline]
    pub fn previous_state(&self) -> CharacterState {
        self.machine.previous()
    }

    #[inline]
    pub fn posture(&self) -> Posture {
        self.posture
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    /// Mesh squash cue for the render layer.
    #[inline]
    pub fn visual_scale(&self) -> f32 {
        self.crouch.visual_scale()
    }

    /// The intent derived for the current tick.
    #[inline]
    pub fn intent(&self) -> &MotionIntent {
        &self.intent
    }

    /// Queue an external impulse; applied once by the next velocity pass.
    pub fn add_velocity(&mut self, velocity: Vec3) {
        self.pending_impulse += velocity;
    }

    /// Remove and return the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.events.drain()
    }

    /// Force a state change from outside the per-tick classification.
    ///
    /// Subject to the same debounce as internal transitions; the public
    /// entry point is the only way external code can change the state.
    pub fn transition_to(&mut self, new_state: CharacterState) -> bool {
        let changed = self
            .machine
            .transition_to(new_state, &self.config, &mut self.events);
        if changed {
            self.policy = self.machine.current().policy(&self.config);
        }
        changed
    }

    /// Hook 1: capture the tick's input and re-classify the state.
    pub fn before_update<M: CharacterMotor>(
        &mut self,
        input: &InputSnapshot,
        motor: &mut M,
        _dt: f32,
    ) {
        let up = motor.character_up();
        self.intent = MotionIntent::from_snapshot(input, up, self.config.orientation_method);

        if self.intent.jump_requested {
            self.jump.request();
        }

        self.crouch.on_crouch_input(self.intent.crouch_held, motor);

        let target = classify(&self.intent, self.crouch.is_crouching());
        if target != self.machine.current() {
            self.machine
                .transition_to(target, &self.config, &mut self.events);
        }
        self.policy = self.machine.current().policy(&self.config);
    }

    /// Hook 2: compute the tick's new rotation.
    pub fn update_rotation<M: CharacterMotor>(
        &mut self,
        current_rotation: Quat,
        motor: &mut M,
        dt: f32,
    ) -> Quat {
        orientation::update_rotation(
            current_rotation,
            self.intent.look_dir,
            &self.config,
            self.crouch.current_dims().radius,
            motor,
            dt,
        )
    }

    /// Hook 3: compute the tick's new velocity.
    pub fn update_velocity<M: CharacterMotor>(
        &mut self,
        current_velocity: Vec3,
        motor: &mut M,
        dt: f32,
    ) -> Vec3 {
        let new_velocity = velocity::update_velocity(
            current_velocity,
            &self.intent,
            self.policy,
            &mut self.jump,
            &mut self.pending_impulse,
            &self.config,
            motor,
            dt,
        );

        if self.jump.jumped_this_tick {
            self.events.push(ControllerEvent::Jumped);
        }

        self.last_velocity = new_velocity;
        new_velocity
    }

    /// Hook 5: detect grounding edges and update the posture axis.
    ///
    /// Runs after the motor has moved and refreshed its grounding report.
    pub fn post_grounding_update<M: CharacterMotor>(&mut self, motor: &mut M, _dt: f32) {
        let grounding = motor.grounding();

        if grounding.is_stable_on_ground && !self.last_grounding.is_stable_on_ground {
            self.landing_timer = self.config.landing_duration;
            self.events.push(ControllerEvent::Landed);
            if self.config.log_state_transitions {
                log::debug!("landed");
            }
        } else if !grounding.is_stable_on_ground && self.last_grounding.is_stable_on_ground {
            self.events.push(ControllerEvent::LeftGround);
            if self.config.log_state_transitions {
                log::debug!("left stable ground");
            }
        }

        self.posture = if grounding.is_stable_on_ground {
            if self.landing_timer > 0.0 {
                Posture::Landing
            } else {
                Posture::Grounded
            }
        } else if self.last_velocity.dot(&motor.character_up()) > 0.0 {
            Posture::Jumping
        } else {
            Posture::Falling
        };
    }

    /// Hook 6: end-of-tick bookkeeping.
    pub fn after_update<M: CharacterMotor>(&mut self, motor: &mut M, dt: f32) {
        let grounding = motor.grounding();
        let grounded_for_jump = if self.config.allow_jumping_when_sliding {
            grounding.found_any_ground
        } else {
            grounding.is_stable_on_ground
        };
        self.jump
            .end_tick(grounded_for_jump, self.config.jump_pre_grounding_grace, dt);

        self.crouch.resolve_stand_up(motor);

        self.machine.end_tick(dt);
        self.landing_timer = (self.landing_timer - dt).max(0.0);
        self.last_grounding = grounding;
    }
}
