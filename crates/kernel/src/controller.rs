use glam::{Mat4, Vec3};
use voxwalk_common::Transform;
use voxwalk_input::{InputState, InputTracker, KeyBindings, MouseLook, MoveKey, Orientation};

use crate::body::PlayerBody;
use crate::collision::CollisionQuery;
use crate::config::MovementConfig;
use crate::integrator::{TickOutcome, integrate};

/// A player: key state, mouse-look, body and the tunables that drive them.
///
/// Input handlers (`key_down`, `key_up`, `mouse_motion`) run between ticks
/// and only touch plain state. `tick` snapshots the key state when it starts.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: MovementConfig,
    input: InputTracker,
    look: MouseLook,
    body: PlayerBody,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl PlayerController {
    /// Spawn a player at the configured respawn point with default bindings.
    pub fn new(config: MovementConfig) -> Self {
        Self::with_bindings(config, KeyBindings::default())
    }

    pub fn with_bindings(config: MovementConfig, bindings: KeyBindings) -> Self {
        let body = PlayerBody::spawn(config.respawn_point);
        let look = MouseLook::new(config.mouse_sensitivity);
        Self {
            config,
            input: InputTracker::new(bindings),
            look,
            body,
        }
    }

    /// Handle a named key press.
    ///
    /// A jump press edge while grounded sets the jump velocity right away;
    /// the next tick integrates it. Returns the logical key on a press edge.
    pub fn key_down(&mut self, name: &str) -> Option<MoveKey> {
        let key = self.input.key_down(name)?;
        if key == MoveKey::Jump {
            self.try_jump();
        }
        Some(key)
    }

    pub fn key_up(&mut self, name: &str) -> Option<MoveKey> {
        self.input.key_up(name)
    }

    /// Release every held key.
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.look.set_captured(captured);
    }

    pub fn pointer_captured(&self) -> bool {
        self.look.is_captured()
    }

    /// Relative mouse motion; dropped unless the pointer is captured.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) -> bool {
        self.look.mouse_delta(dx, dy)
    }

    /// Advance the body by `dt` seconds against `world`.
    pub fn tick(&mut self, dt: f32, world: Option<&dyn CollisionQuery>) -> TickOutcome {
        let input = self.input.snapshot();
        let (body, outcome) = integrate(
            dt,
            input,
            &self.look.orientation,
            self.body,
            &self.config,
            world,
        );
        self.body = body;
        outcome
    }

    /// Put the body back at the respawn point, at rest.
    pub fn respawn(&mut self) {
        self.body = PlayerBody::spawn(self.config.respawn_point);
    }

    fn try_jump(&mut self) -> bool {
        if !self.body.grounded {
            return false;
        }
        self.body.vertical_velocity = self.config.jump_strength;
        self.body.grounded = false;
        tracing::debug!(y = self.body.position.y, "jump");
        true
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    pub fn orientation(&self) -> &Orientation {
        &self.look.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.look.orientation
    }

    pub fn input(&self) -> InputState {
        self.input.snapshot()
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Camera world transform: body transform composed with the eye offset.
    pub fn eye_transform(&self) -> Transform {
        self.look
            .orientation
            .eye_transform(self.body.position, self.config.eye_offset)
    }

    pub fn eye_position(&self) -> Vec3 {
        self.eye_transform().position
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.look
            .orientation
            .view_matrix(self.body.position, self.config.eye_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxwalk_common::Aabb;

    fn on_floor() -> PlayerController {
        let mut c = PlayerController::default();
        c.body_mut().position = Vec3::new(0.0, 2.0, 0.0);
        c.body_mut().grounded = true;
        c
    }

    #[test]
    fn spawns_at_respawn_point() {
        let c = PlayerController::default();
        assert_eq!(c.body().position, Vec3::new(0.0, 10.0, 10.0));
        assert!(!c.body().grounded);
    }

    #[test]
    fn jump_press_while_grounded_sets_velocity() {
        let mut c = on_floor();
        assert_eq!(c.key_down("Space"), Some(MoveKey::Jump));
        assert_eq!(c.body().vertical_velocity, 25.0);
        assert!(!c.body().grounded);

        let dt = 0.05;
        c.tick(dt, None);
        let v = 25.0 - 35.0 * dt;
        assert!((c.body().vertical_velocity - v).abs() < 1e-5);
        assert!((c.body().position.y - (2.0 + v * dt)).abs() < 1e-5);
    }

    #[test]
    fn jump_is_ignored_in_the_air() {
        let mut c = PlayerController::default();
        c.key_down("Space");
        assert_eq!(c.body().vertical_velocity, 0.0);
    }

    #[test]
    fn holding_jump_does_not_rejump_on_landing() {
        let mut c = on_floor();
        c.key_down("Space");
        for _ in 0..300 {
            c.tick(1.0 / 60.0, None);
        }
        assert!(c.body().grounded);
        // Auto-repeat while still held is not an edge.
        assert_eq!(c.key_down("Space"), None);
        assert_eq!(c.body().vertical_velocity, 0.0);
        assert!(c.body().grounded);

        c.key_up("Space");
        c.key_down("Space");
        assert_eq!(c.body().vertical_velocity, 25.0);
    }

    #[test]
    fn mouse_motion_needs_capture() {
        let mut c = PlayerController::default();
        assert!(!c.mouse_motion(50.0, 0.0));
        assert_eq!(c.orientation().yaw, 0.0);
        c.set_pointer_captured(true);
        assert!(c.mouse_motion(50.0, 0.0));
        assert!((c.orientation().yaw - -0.1).abs() < 1e-6);
    }

    #[test]
    fn tick_uses_snapshot_of_held_keys() {
        let mut c = on_floor();
        c.key_down("KeyW");
        c.tick(0.1, None);
        assert!((c.body().position.z - -2.5).abs() < 1e-5);
        c.key_up("KeyW");
        c.tick(0.1, None);
        assert!((c.body().position.z - -2.5).abs() < 1e-5);
    }

    #[test]
    fn turning_changes_walk_direction() {
        let mut c = on_floor();
        c.set_pointer_captured(true);
        // Yaw +pi/2: forward becomes -X.
        c.mouse_motion(-std::f32::consts::FRAC_PI_2 / 0.002, 0.0);
        c.key_down("KeyW");
        c.tick(0.1, None);
        assert!((c.body().position.x - -2.5).abs() < 1e-3);
        assert!(c.body().position.z.abs() < 1e-3);
    }

    #[test]
    fn walls_stop_the_controller() {
        let wall = Aabb::new(Vec3::new(-10.0, 0.0, -3.0), Vec3::new(10.0, 10.0, -2.0));
        let query = move |v: &Aabb| v.intersects(&wall);
        let mut c = on_floor();
        c.key_down("KeyW");
        for _ in 0..60 {
            c.tick(1.0 / 60.0, Some(&query));
        }
        // Body front face stops short of the wall's near face at z = -2.
        assert!(c.body().position.z - 0.5 >= -2.0);
        assert!(c.body().position.z < 0.0);
    }

    #[test]
    fn eye_sits_above_body() {
        let c = on_floor();
        assert_eq!(c.eye_position(), Vec3::new(0.0, 3.5, 0.0));
        assert!(c.view_matrix().is_finite());
    }

    #[test]
    fn respawn_resets_body() {
        let mut c = on_floor();
        c.body_mut().vertical_velocity = -12.0;
        c.respawn();
        assert_eq!(c.body().position, c.config().respawn_point);
        assert_eq!(c.body().vertical_velocity, 0.0);
    }

    #[test]
    fn release_all_stops_walking() {
        let mut c = on_floor();
        c.key_down("KeyA");
        c.release_all();
        c.tick(0.1, None);
        assert_eq!(c.body().position.x, 0.0);
        assert!(!c.input().any_movement());
    }
}
