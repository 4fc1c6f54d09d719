//! Shared test driver: a scripted motor and a harness that runs the tick
//! hooks in the order the external engine loop would.

use nalgebra as na;

use locomotion::{
    Button, ButtonFlags, CapsuleDims, CharacterController, CharacterMotor, ControllerEvent,
    GroundingStatus, InputSnapshot, LocomotionConfig, Quat, Vec3,
};

pub const DT: f32 = 1.0 / 60.0;

/// Motor test double. Grounding is scripted by the test; the "move" step
/// integrates velocity and honors force-unground by reporting airborne.
pub struct ScriptedMotor {
    pub grounding: GroundingStatus,
    pub position: Vec3,
    pub rotation: Quat,
    pub dims: CapsuleDims,
    pub overlaps: usize,
    pub unground_requested: bool,
    pub forced_unground: bool,
}

impl ScriptedMotor {
    pub fn new(grounding: GroundingStatus) -> Self {
        Self {
            grounding,
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            dims: CapsuleDims::new(0.5, 2.0, 1.0),
            overlaps: 0,
            unground_requested: false,
            forced_unground: false,
        }
    }

    /// The external move: commit pose, then let a pending force-unground
    /// suppress the ground report for this tick.
    pub fn step(&mut self, velocity: Vec3, rotation: Quat, dt: f32) {
        self.position += velocity * dt;
        self.rotation = rotation;
        if self.unground_requested {
            self.grounding = GroundingStatus::airborne();
            self.unground_requested = false;
            self.forced_unground = true;
        }
    }
}

impl CharacterMotor for ScriptedMotor {
    fn grounding(&self) -> GroundingStatus {
        self.grounding
    }
    fn character_up(&self) -> Vec3 {
        Vec3::y()
    }
    fn character_forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }
    fn transient_position(&self) -> Vec3 {
        self.position
    }
    fn transient_rotation(&self) -> Quat {
        self.rotation
    }
    fn set_transient_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn force_unground(&mut self) {
        self.unground_requested = true;
    }
    fn set_capsule_dimensions(&mut self, dims: CapsuleDims) {
        self.dims = dims;
    }
    fn overlap_count(&mut self, _position: Vec3, _rotation: Quat) -> usize {
        self.overlaps
    }
}

/// One character plus its motor, driven through the fixed hook order.
pub struct Harness {
    pub controller: CharacterController,
    pub motor: ScriptedMotor,
    pub velocity: Vec3,
    pub rotation: Quat,
}

impl Harness {
    pub fn new(config: LocomotionConfig, grounding: GroundingStatus) -> Self {
        Self {
            controller: CharacterController::new(config),
            motor: ScriptedMotor::new(grounding),
            velocity: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }

    pub fn tick(&mut self, input: &InputSnapshot) {
        self.controller.before_update(input, &mut self.motor, DT);
        self.rotation = self
            .controller
            .update_rotation(self.rotation, &mut self.motor, DT);
        self.velocity = self
            .controller
            .update_velocity(self.velocity, &mut self.motor, DT);
        self.motor.step(self.velocity, self.rotation, DT);
        self.controller.post_grounding_update(&mut self.motor, DT);
        self.controller.after_update(&mut self.motor, DT);
    }

    /// Run `n` idle ticks and throw away whatever events they produced
    /// (spawning on ground fires an initial landing edge, as the motor
    /// reports a fresh ground contact).
    pub fn settle(&mut self, n: usize) {
        let idle = input().build();
        for _ in 0..n {
            self.tick(&idle);
        }
        self.controller.drain_events();
    }

    pub fn events(&mut self) -> Vec<ControllerEvent> {
        self.controller.drain_events()
    }
}

/// Small builder for per-tick input snapshots.
pub struct InputBuilder {
    move_axes: na::Vector2<f32>,
    camera: Quat,
    buttons: ButtonFlags,
}

pub fn input() -> InputBuilder {
    InputBuilder {
        move_axes: na::Vector2::zeros(),
        camera: Quat::identity(),
        buttons: ButtonFlags::default(),
    }
}

impl InputBuilder {
    pub fn move_axes(mut self, x: f32, y: f32) -> Self {
        self.move_axes = na::Vector2::new(x, y);
        self
    }

    pub fn camera(mut self, camera: Quat) -> Self {
        self.camera = camera;
        self
    }

    pub fn jump(mut self) -> Self {
        self.buttons.add(Button::Jump);
        self
    }

    pub fn crouch(mut self) -> Self {
        self.buttons.add(Button::Crouch);
        self
    }

    pub fn run(mut self) -> Self {
        self.buttons.add(Button::Run);
        self
    }

    pub fn build(self) -> InputSnapshot {
        InputSnapshot::new(self.move_axes, self.camera, self.buttons)
    }
}
