use bevy::prelude::*;

use crate::app::state::SceneState;
use crate::core::config::{SceneConfig, SceneVariant};
use crate::core::system::system_order::SceneMountSet;

// Scene intensities are authored as unitless multipliers; these convert
// them into bevy's photometric units.
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 300.0;
const DIRECTIONAL_LUX_PER_UNIT: f32 = 2_000.0;
const SPOT_LUMENS: f32 = 2_000_000.0;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SceneState::Mounted),
            setup_lights.in_set(SceneMountSet::Entities),
        )
        .add_systems(OnExit(SceneState::Mounted), reset_ambient_light);
    }
}

fn setup_lights(mut commands: Commands, cfg: Res<SceneConfig>) {
    let (ambient, directional_pos, directional_intensity) = match cfg.variant {
        SceneVariant::Ambient => (1.0, Vec3::new(0.0, 5.0, -4.0), 2.0),
        SceneVariant::Card => (0.8, Vec3::new(2.0, 2.0, 2.0), 1.5),
    };
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: ambient * AMBIENT_BRIGHTNESS_PER_UNIT,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: directional_intensity * DIRECTIONAL_LUX_PER_UNIT,
            ..default()
        },
        Transform::from_translation(directional_pos).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(SceneState::Mounted),
        Name::new("KeyLight"),
    ));
    if cfg.variant == SceneVariant::Ambient {
        // Narrow fully-soft cone from the upper right; the only shadow caster.
        commands.spawn((
            SpotLight {
                color: Color::WHITE,
                intensity: SPOT_LUMENS,
                range: 100.0,
                outer_angle: 0.2,
                inner_angle: 0.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_xyz(20.0, 20.0, 25.0).looking_at(Vec3::ZERO, Vec3::Y),
            StateScoped(SceneState::Mounted),
            Name::new("SpotLight"),
        ));
    }
}

fn reset_ambient_light(mut commands: Commands) {
    commands.insert_resource(AmbientLight::default());
}
