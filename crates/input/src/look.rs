use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use voxwalk_common::Transform;

/// Largest pitch magnitude. Stops just short of straight up/down so the view
/// never flips over.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Yaw rotates the body about +Y; pitch tilts only the camera.
///
/// Yaw is unbounded and wraps through the trig functions. Pitch is kept in
/// `[-PITCH_LIMIT, PITCH_LIMIT]` by every mutator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Apply a relative mouse motion. Moving right turns left-handed about
    /// +Y (yaw decreases); moving down looks down (pitch decreases).
    ///
    /// A delta that is not finite after scaling is dropped whole.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        let (turn, tilt) = (dx * sensitivity, dy * sensitivity);
        if !turn.is_finite() || !tilt.is_finite() {
            tracing::trace!(dx, dy, sensitivity, "non-finite mouse delta dropped");
            return;
        }
        self.yaw -= turn;
        self.pitch = clamp_pitch(self.pitch - tilt);
    }

    /// Rotation of the body: yaw only.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Camera rotation relative to the body: pitch only.
    pub fn camera_local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// Full camera rotation in world space (yaw, then pitch).
    pub fn camera_rotation(&self) -> Quat {
        self.body_rotation() * self.camera_local_rotation()
    }

    /// Direction the camera looks in, including pitch.
    pub fn look_direction(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }

    /// Horizontal forward and right unit vectors from yaw.
    ///
    /// Pitch is ignored: these are what WASD movement uses.
    pub fn horizontal_basis(&self) -> (Vec3, Vec3) {
        let body = self.body_rotation();
        let forward = flatten(body * Vec3::NEG_Z);
        let right = flatten(body * Vec3::X);
        (forward, right)
    }

    /// World transform of the camera for a body at `body_position` with the
    /// camera mounted at `eye_offset` in body space.
    pub fn eye_transform(&self, body_position: Vec3, eye_offset: Vec3) -> Transform {
        let body = Transform {
            position: body_position,
            rotation: self.body_rotation(),
            ..Transform::default()
        };
        let camera = Transform {
            position: eye_offset,
            rotation: self.camera_local_rotation(),
            ..Transform::default()
        };
        body.compose(&camera)
    }

    pub fn view_matrix(&self, body_position: Vec3, eye_offset: Vec3) -> Mat4 {
        let eye = self.eye_transform(body_position, eye_offset);
        Mat4::look_to_rh(eye.position, self.look_direction(), Vec3::Y)
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Mouse-look gated by pointer capture.
///
/// While capture is inactive, deltas are dropped. Nothing is queued, so
/// motion made while the pointer was free never shows up later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseLook {
    pub orientation: Orientation,
    pub sensitivity: f32,
    captured: bool,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self::new(0.002)
    }
}

impl MouseLook {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            orientation: Orientation::default(),
            sensitivity,
            captured: false,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        if self.captured != captured {
            tracing::debug!(captured, "pointer capture changed");
        }
        self.captured = captured;
    }

    /// Apply a mouse delta if captured. Returns whether it was applied.
    pub fn mouse_delta(&mut self, dx: f32, dy: f32) -> bool {
        if !self.captured {
            return false;
        }
        self.orientation
            .apply_mouse_delta(dx, dy, self.sensitivity);
        true
    }
}
