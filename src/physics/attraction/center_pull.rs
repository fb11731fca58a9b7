use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::app::state::SceneState;
use crate::core::components::{BodyScale, ParticleBody};
use crate::core::config::{CenterPullConfig, SceneConfig, SceneVariant};
use crate::core::system::system_order::FieldCorrectionSet;
use crate::interaction::visibility::activity::scene_active;

/// Ambient-variant drift toward the origin, stronger vertically.
pub struct CenterPullPlugin;

impl Plugin for CenterPullPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            apply_center_pull
                .in_set(FieldCorrectionSet)
                .run_if(in_state(SceneState::Mounted).and(scene_active)),
        );
    }
}

pub fn center_pull_impulse(
    position: Vec3,
    scale: f32,
    pull: &CenterPullConfig,
    max_frame_dt: f32,
    dt: f32,
) -> Option<Vec3> {
    if position.length() <= pull.min_distance {
        return None;
    }
    let dt = dt.min(max_frame_dt);
    let k = -pull.strength.to_vec3() * dt * scale;
    Some(position.normalize() * k)
}

pub fn apply_center_pull(
    time: Res<Time>,
    cfg: Res<SceneConfig>,
    mut q: Query<
        (&Transform, &BodyScale, &mut ExternalImpulse),
        (With<ParticleBody>, With<RapierRigidBodyHandle>),
    >,
) {
    if cfg.variant != SceneVariant::Ambient || !cfg.ambient.pull.enabled {
        return;
    }
    let dt = time.delta_secs();
    for (tf, scale, mut ext) in q.iter_mut() {
        if let Some(imp) = center_pull_impulse(
            tf.translation,
            scale.0,
            &cfg.ambient.pull,
            cfg.boundary.max_frame_dt,
            dt,
        ) {
            ext.impulse += imp;
        }
    }
}
