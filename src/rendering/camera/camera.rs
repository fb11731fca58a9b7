use bevy::prelude::*;

use crate::app::state::SceneState;
use crate::core::config::{CameraConfig, SceneConfig, SceneVariant};
use crate::core::system::system_order::SceneMountSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SceneState::Mounted),
            setup_camera.in_set(SceneMountSet::Entities),
        );
    }
}

pub fn camera_config(cfg: &SceneConfig) -> &CameraConfig {
    match cfg.variant {
        SceneVariant::Ambient => &cfg.ambient.camera,
        SceneVariant::Card => &cfg.card.camera,
    }
}

/// Half width/height of the region visible at z = 0 for a camera on the
/// +z axis looking at the origin. `aspect` is width / height.
pub fn visible_half_extents(camera: &CameraConfig, aspect: f32) -> Vec2 {
    let half_h = camera.distance * (camera.fov_degrees.to_radians() * 0.5).tan();
    Vec2::new(half_h * aspect, half_h)
}

fn setup_camera(mut commands: Commands, cfg: Res<SceneConfig>) {
    let cam = camera_config(&cfg);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, cam.distance).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(SceneState::Mounted),
        Name::new("SceneCamera"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_view_extents() {
        let cam = CameraConfig::default();
        let v = visible_half_extents(&cam, 16.0 / 9.0);
        // 20 * tan(16.25 deg)
        assert!((v.y - 5.8295).abs() < 1e-3);
        assert!((v.x - v.y * 16.0 / 9.0).abs() < 1e-4);
    }
}
