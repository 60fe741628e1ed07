use serde::Serialize;
use voxwalk_input::MoveKey;
use voxwalk_kernel::PlayerController;

/// Player inspector for developer tooling.
///
/// Read-only view of a controller for debugging output.
pub struct PlayerInspector;

impl PlayerInspector {
    /// Produce a summary of the player's state.
    pub fn summary(player: &PlayerController) -> PlayerSummary {
        let body = player.body();
        let o = player.orientation();
        let input = player.input();
        PlayerSummary {
            position: body.position.to_array(),
            vertical_velocity: body.vertical_velocity,
            grounded: body.grounded,
            yaw_degrees: o.yaw.to_degrees(),
            pitch_degrees: o.pitch.to_degrees(),
            pointer_captured: player.pointer_captured(),
            held_keys: MoveKey::ALL
                .into_iter()
                .filter(|k| input.is_pressed(*k))
                .map(MoveKey::as_str)
                .collect(),
        }
    }
}

/// Summary of player state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub position: [f32; 3],
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub pointer_captured: bool,
    pub held_keys: Vec<&'static str>,
}

impl std::fmt::Display for PlayerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player pos=({:.2}, {:.2}, {:.2}) vy={:.2} {} yaw={:.1} pitch={:.1}",
            self.position[0],
            self.position[1],
            self.position[2],
            self.vertical_velocity,
            if self.grounded { "grounded" } else { "airborne" },
            self.yaw_degrees,
            self.pitch_degrees,
        )?;
        if !self.held_keys.is_empty() {
            write!(f, " keys=[{}]", self.held_keys.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn summary_of_fresh_player() {
        let player = PlayerController::default();
        let summary = PlayerInspector::summary(&player);
        assert_eq!(summary.position, [0.0, 10.0, 10.0]);
        assert!(!summary.grounded);
        assert!(summary.held_keys.is_empty());
        assert!(!summary.pointer_captured);
    }

    #[test]
    fn summary_lists_held_keys_in_order() {
        let mut player = PlayerController::default();
        player.key_down("Space");
        player.key_down("KeyW");
        let summary = PlayerInspector::summary(&player);
        assert_eq!(summary.held_keys, vec!["forward", "jump"]);
    }

    #[test]
    fn summary_display() {
        let mut player = PlayerController::default();
        player.body_mut().position = Vec3::new(1.0, 2.0, 3.0);
        player.body_mut().grounded = true;
        player.key_down("KeyA");
        let s = format!("{}", PlayerInspector::summary(&player));
        assert!(s.contains("pos=(1.00, 2.00, 3.00)"));
        assert!(s.contains("grounded"));
        assert!(s.contains("keys=[left]"));
    }
}
