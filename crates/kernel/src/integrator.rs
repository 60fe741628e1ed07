use glam::Vec3;
use voxwalk_input::{InputState, Orientation};

use crate::body::PlayerBody;
use crate::collision::CollisionQuery;
use crate::config::MovementConfig;

/// What happened during one tick, for logging and callers that react to
/// landing or respawning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The body went from airborne to grounded.
    pub landed: bool,
    pub hit_ceiling: bool,
    pub blocked_x: bool,
    pub blocked_z: bool,
    /// The body fell below the void threshold and was moved to the respawn point.
    pub respawned: bool,
}

impl TickOutcome {
    /// Combine outcomes of consecutive ticks.
    pub fn merge(self, other: TickOutcome) -> TickOutcome {
        TickOutcome {
            landed: self.landed || other.landed,
            hit_ceiling: self.hit_ceiling || other.hit_ceiling,
            blocked_x: self.blocked_x || other.blocked_x,
            blocked_z: self.blocked_z || other.blocked_z,
            respawned: self.respawned || other.respawned,
        }
    }
}

/// Advance `body` by `dt` seconds and return the new body.
///
/// `world` of `None` means nothing ever blocks (no-clip).
pub fn tick(
    dt: f32,
    input: InputState,
    orientation: &Orientation,
    body: PlayerBody,
    config: &MovementConfig,
    world: Option<&dyn CollisionQuery>,
) -> PlayerBody {
    integrate(dt, input, orientation, body, config, world).0
}

/// Same as [`tick`], also reporting what happened.
///
/// Order within a tick: gravity, floor clamp or vertical collision,
/// horizontal X then Z, void reset.
pub fn integrate(
    dt: f32,
    input: InputState,
    orientation: &Orientation,
    body: PlayerBody,
    config: &MovementConfig,
    world: Option<&dyn CollisionQuery>,
) -> (PlayerBody, TickOutcome) {
    let mut outcome = TickOutcome::default();
    // Also rejects NaN.
    if !(dt > 0.0) || !dt.is_finite() {
        return (body, outcome);
    }

    let mut body = body;
    let was_grounded = body.grounded;
    let blocked = |b: &PlayerBody| {
        world.is_some_and(|w| w.is_blocked(&b.bounding_volume(config.body_half_extents)))
    };

    // Vertical.
    body.vertical_velocity += config.gravity * dt;
    let start_y = body.position.y;
    let candidate_y = start_y + body.vertical_velocity * dt;

    // Anything above the void and over the floor is kept on top of it.
    let over_floor = start_y >= config.void_threshold && config.floor_covers(body.position);
    if over_floor && candidate_y < config.ground_level {
        body.position.y = config.ground_level;
        body.vertical_velocity = 0.0;
        body.grounded = true;
    } else {
        body.position.y = candidate_y;
        if blocked(&body) {
            body.position.y = start_y;
            if body.vertical_velocity < 0.0 {
                body.grounded = true;
            } else {
                outcome.hit_ceiling = true;
                tracing::debug!(y = start_y, "hit ceiling");
            }
            body.vertical_velocity = 0.0;
        } else {
            body.grounded = false;
        }
    }
    if body.grounded && !was_grounded {
        outcome.landed = true;
        tracing::debug!(y = body.position.y, "landed");
    }

    // Horizontal.
    let intent = movement_intent(input, orientation);
    if intent != Vec3::ZERO {
        let step = intent.normalize() * config.speed * dt;

        if step.x != 0.0 {
            let old_x = body.position.x;
            body.position.x += step.x;
            if blocked(&body) {
                body.position.x = old_x;
                outcome.blocked_x = true;
            }
        }
        if step.z != 0.0 {
            let old_z = body.position.z;
            body.position.z += step.z;
            if blocked(&body) {
                body.position.z = old_z;
                outcome.blocked_z = true;
            }
        }
    }

    if body.position.y < config.void_threshold {
        tracing::info!(
            fell_to = body.position.y,
            respawn = ?config.respawn_point,
            "fell into the void, respawning"
        );
        body.position = config.respawn_point;
        body.vertical_velocity = 0.0;
        body.grounded = false;
        outcome.respawned = true;
    }

    tracing::trace!(
        dt,
        pos = ?body.position,
        vy = body.vertical_velocity,
        grounded = body.grounded,
        "tick"
    );
    (body, outcome)
}

/// Horizontal movement direction (not normalized) from held keys.
///
/// Forward is the body's -Z rotated by yaw. Opposing keys cancel out.
pub fn movement_intent(input: InputState, orientation: &Orientation) -> Vec3 {
    let (forward, right) = orientation.horizontal_basis();
    let mut intent = Vec3::ZERO;
    if input.forward {
        intent += forward;
    }
    if input.back {
        intent -= forward;
    }
    if input.right {
        intent += right;
    }
    if input.left {
        intent -= right;
    }
    // Opposing keys leave tiny float residue; treat it as no input.
    if intent.length_squared() < 1e-12 {
        Vec3::ZERO
    } else {
        intent
    }
}
