use voxwalk_common::Aabb;

/// Spatial overlap query against world geometry.
///
/// Implementations must be side-effect free and answer synchronously: the
/// integrator may call this several times within one tick and expects the
/// same volume to get the same answer.
pub trait CollisionQuery {
    fn is_blocked(&self, volume: &Aabb) -> bool;
}

impl<F> CollisionQuery for F
where
    F: Fn(&Aabb) -> bool,
{
    fn is_blocked(&self, volume: &Aabb) -> bool {
        self(volume)
    }
}

/// A world with nothing in it. Equivalent to passing no query at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClip;

impl CollisionQuery for NoClip {
    fn is_blocked(&self, _volume: &Aabb) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn closures_are_queries() {
        let wall = Aabb::new(Vec3::new(2.0, 0.0, -10.0), Vec3::new(3.0, 10.0, 10.0));
        let query = move |v: &Aabb| v.intersects(&wall);
        let near = Aabb::from_center(Vec3::new(2.0, 2.0, 0.0), Vec3::splat(0.5));
        let far = Aabb::from_center(Vec3::new(-2.0, 2.0, 0.0), Vec3::splat(0.5));
        assert!(query.is_blocked(&near));
        assert!(!query.is_blocked(&far));
    }

    #[test]
    fn no_clip_never_blocks() {
        let everything = Aabb::from_center(Vec3::ZERO, Vec3::splat(1e6));
        assert!(!NoClip.is_blocked(&everything));
    }
}
