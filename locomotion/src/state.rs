//! Discrete locomotion state, classification, and debounced transitions.

use crate::events::{ControllerEvent, EventQueue};
use crate::input::MotionIntent;
use crate::settings::{LocomotionConfig, MOVE_INTENT_DEADZONE_SQ};

/// Grounded locomotion family. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CharacterState {
    #[default]
    Default,
    Walk,
    Run,
    Crouch,
}

/// Orthogonal airborne/posture axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Posture {
    #[default]
    Grounded,
    Jumping,
    Falling,
    Landing,
}

/// Per-state movement policy, looked up once per tick instead of
/// re-switching on the state in every pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatePolicy {
    /// Multiplier on the base max stable move speed.
    pub speed_multiplier: f32,
    /// Whether jumping is permitted in this state.
    pub allow_jump: bool,
}

impl CharacterState {
    pub fn policy(self, config: &LocomotionConfig) -> StatePolicy {
        match self {
            CharacterState::Default | CharacterState::Walk => StatePolicy {
                speed_multiplier: 1.0,
                allow_jump: true,
            },
            CharacterState::Run => StatePolicy {
                speed_multiplier: config.run_speed_multiplier,
                allow_jump: true,
            },
            CharacterState::Crouch => StatePolicy {
                speed_multiplier: config.crouch_speed_multiplier,
                allow_jump: false,
            },
        }
    }
}

/// Classify the target state from the tick's intent.
///
/// Priority order: crouching dominates, then run, then walk, else default.
/// `crouching` is the crouch manager's actual state, so a character stuck
/// under an obstruction stays classified as crouched after releasing the
/// key.
pub fn classify(intent: &MotionIntent, crouching: bool) -> CharacterState {
    let moving = intent.move_dir.norm_squared() > MOVE_INTENT_DEADZONE_SQ;
    if crouching {
        CharacterState::Crouch
    } else if intent.run_held && moving {
        CharacterState::Run
    } else if moving {
        CharacterState::Walk
    } else {
        CharacterState::Default
    }
}

/// Debounced state holder.
///
/// A transition arms a debounce timer; while it runs, further transition
/// requests no-op. The controller re-classifies every tick, so a swallowed
/// request is simply re-applied once the window expires.
#[derive(Clone, Copy, Debug)]
pub struct StateMachine {
    current: CharacterState,
    previous: CharacterState,
    transition_timer: f32,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: CharacterState::Default,
            previous: CharacterState::Default,
            transition_timer: 0.0,
        }
    }

    #[inline]
    pub fn current(&self) -> CharacterState {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> CharacterState {
        self.previous
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition_timer > 0.0
    }

    /// Switch to `new_state`, running exit and enter notifications.
    ///
    /// Returns false (and does nothing) while the debounce window from a
    /// previous transition is still open.
    pub fn transition_to(
        &mut self,
        new_state: CharacterState,
        config: &LocomotionConfig,
        events: &mut EventQueue,
    ) -> bool {
        if self.is_transitioning() {
            return false;
        }

        let old_state = self.current;
        events.push(ControllerEvent::StateExited {
            state: old_state,
            to: new_state,
        });

        self.previous = old_state;
        self.current = new_state;
        self.transition_timer = config.state_transition_time;

        events.push(ControllerEvent::StateEntered {
            state: new_state,
            from: old_state,
        });

        if config.log_state_transitions {
            log::debug!("state transition: {:?} -> {:?}", old_state, new_state);
        }

        true
    }

    /// Advance the debounce timer; called once per tick after the move.
    pub fn end_tick(&mut self, dt: f32) {
        self.transition_timer = (self.transition_timer - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;

    fn intent(move_dir: Vec3, run_held: bool) -> MotionIntent {
        MotionIntent {
            move_dir,
            run_held,
            ..MotionIntent::default()
        }
    }

    #[test]
    fn crouch_dominates_run_and_walk() {
        let moving = intent(Vec3::z(), true);
        assert_eq!(classify(&moving, true), CharacterState::Crouch);
    }

    #[test]
    fn run_requires_movement() {
        let idle = intent(Vec3::zeros(), true);
        assert_eq!(classify(&idle, false), CharacterState::Default);

        let moving = intent(Vec3::z(), true);
        assert_eq!(classify(&moving, false), CharacterState::Run);
    }

    #[test]
    fn walk_below_run() {
        let moving = intent(Vec3::z(), false);
        assert_eq!(classify(&moving, false), CharacterState::Walk);
    }

    #[test]
    fn deadzone_filters_stick_noise() {
        let tiny = intent(Vec3::new(0.1, 0.0, 0.1), false);
        assert_eq!(classify(&tiny, false), CharacterState::Default);
    }

    #[test]
    fn transition_emits_exit_then_enter() {
        let config = LocomotionConfig::default();
        let mut events = EventQueue::default();
        let mut machine = StateMachine::new();

        assert!(machine.transition_to(CharacterState::Walk, &config, &mut events));
        assert_eq!(machine.current(), CharacterState::Walk);
        assert_eq!(machine.previous(), CharacterState::Default);

        let drained = events.drain();
        assert_eq!(
            drained,
            vec![
                ControllerEvent::StateExited {
                    state: CharacterState::Default,
                    to: CharacterState::Walk,
                },
                ControllerEvent::StateEntered {
                    state: CharacterState::Walk,
                    from: CharacterState::Default,
                },
            ]
        );
    }

    #[test]
    fn transitions_debounce_until_window_expires() {
        let config = LocomotionConfig::default();
        let mut events = EventQueue::default();
        let mut machine = StateMachine::new();

        assert!(machine.transition_to(CharacterState::Walk, &config, &mut events));
        // Swallowed while the window is open.
        assert!(!machine.transition_to(CharacterState::Run, &config, &mut events));
        assert_eq!(machine.current(), CharacterState::Walk);

        // Drain the window tick by tick.
        let dt = 1.0 / 60.0;
        let ticks = (config.state_transition_time / dt).ceil() as usize + 1;
        for _ in 0..ticks {
            machine.end_tick(dt);
        }
        assert!(!machine.is_transitioning());
        assert!(machine.transition_to(CharacterState::Run, &config, &mut events));
        assert_eq!(machine.current(), CharacterState::Run);
    }

    #[test]
    fn crouch_policy_forbids_jumping() {
        let config = LocomotionConfig::default();
        assert!(!CharacterState::Crouch.policy(&config).allow_jump);
        assert!(CharacterState::Run.policy(&config).allow_jump);
        assert_eq!(
            CharacterState::Run.policy(&config).speed_multiplier,
            config.run_speed_multiplier
        );
        assert_eq!(
            CharacterState::Crouch.policy(&config).speed_multiplier,
            config.crouch_speed_multiplier
        );
    }
}
