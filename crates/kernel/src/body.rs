use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxwalk_common::Aabb;

/// The simulated player body.
///
/// Created once at spawn and mutated every tick for the rest of the session.
/// The bounding volume is derived from `position`, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::spawn(Vec3::new(0.0, 10.0, 10.0))
    }
}

impl PlayerBody {
    /// A body at rest in mid-air at `position`.
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    /// Bounding box centered on the current position.
    pub fn bounding_volume(&self, half_extents: Vec3) -> Aabb {
        Aabb::from_center(self.position, half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_airborne_and_still() {
        let b = PlayerBody::spawn(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.vertical_velocity, 0.0);
        assert!(!b.grounded);
    }

    #[test]
    fn bounding_volume_follows_position() {
        let mut b = PlayerBody::spawn(Vec3::new(0.0, 2.0, 0.0));
        let half = Vec3::new(0.5, 2.0, 0.5);
        assert_eq!(b.bounding_volume(half).min, Vec3::new(-0.5, 0.0, -0.5));
        b.position.x = 3.0;
        assert_eq!(b.bounding_volume(half).min.x, 2.5);
        assert_eq!(b.bounding_volume(half).max.x, 3.5);
    }
}
