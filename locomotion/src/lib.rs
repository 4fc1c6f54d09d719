pub mod bitmask_flags;
pub mod controller;
pub mod crouch;
pub mod events;
pub mod input;
pub mod jump;
pub mod math;
pub mod motor;
pub mod orientation;
pub mod settings;
pub mod state;
pub mod types;
pub mod velocity;

pub use controller::CharacterController;
pub use crouch::CrouchState;
pub use events::ControllerEvent;
pub use input::{Button, ButtonFlags, InputSnapshot, MotionIntent};
pub use jump::JumpBuffer;
pub use motor::CharacterMotor;
pub use settings::{BonusOrientationMethod, LocomotionConfig, OrientationMethod};
pub use state::{CharacterState, Posture, StatePolicy};
pub use types::{CapsuleDims, GroundingStatus, Quat, Vec3};
