use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::app::state::SceneState;
use crate::core::bounds::SimulationBounds;
use crate::core::components::ParticleBody;
use crate::core::config::{BoundaryConfig, SceneConfig};
use crate::core::system::system_order::FieldCorrectionSet;
use crate::interaction::visibility::activity::scene_active;

pub struct BoundaryPlugin;

impl Plugin for BoundaryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            apply_boundary_correction
                .in_set(FieldCorrectionSet)
                .run_if(in_state(SceneState::Mounted).and(scene_active)),
        );
    }
}

/// Corrective impulse for a body at `position`, or `None` inside the deadband.
///
/// The push always has magnitude `push_strength * min(dt, max_frame_dt)`
/// regardless of how far out the body is, so a long frame can never launch
/// a body across the volume.
pub fn boundary_impulse(
    position: Vec3,
    bounds: &SimulationBounds,
    tuning: &BoundaryConfig,
    dt: f32,
) -> Option<Vec3> {
    let clamped = bounds.clamp_inside(position, tuning.margin);
    let delta = clamped - position;
    if delta.abs().max_element() <= tuning.epsilon {
        return None;
    }
    let dt = dt.min(tuning.max_frame_dt);
    if dt <= 0.0 {
        return None;
    }
    Some(delta.normalize_or_zero() * tuning.push_strength * dt)
}

/// Nudge out-of-bounds spheres back inside. Bodies rapier has not attached
/// yet (no handle) are skipped until a later frame.
pub fn apply_boundary_correction(
    time: Res<Time>,
    cfg: Res<SceneConfig>,
    bounds: Option<Res<SimulationBounds>>,
    mut q: Query<
        (&Transform, &mut ExternalImpulse),
        (With<ParticleBody>, With<RapierRigidBodyHandle>),
    >,
) {
    let Some(bounds) = bounds else {
        return;
    };
    let dt = time.delta_secs();
    for (tf, mut ext) in q.iter_mut() {
        if let Some(impulse) = boundary_impulse(tf.translation, &bounds, &cfg.boundary, dt) {
            ext.impulse += impulse;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> SimulationBounds {
        SimulationBounds::new(Vec3::new(3.0, 2.0, 5.0)).unwrap()
    }

    #[test]
    fn body_on_inner_face_gets_nothing() {
        let tuning = BoundaryConfig::default();
        let at_face = Vec3::new(3.0 - tuning.margin, -(2.0 - tuning.margin), 0.0);
        assert_eq!(boundary_impulse(at_face, &bounds(), &tuning, 1.0 / 60.0), None);
        let within_eps = at_face + Vec3::new(0.005, 0.0, 0.0);
        assert_eq!(boundary_impulse(within_eps, &bounds(), &tuning, 1.0 / 60.0), None);
    }

    #[test]
    fn impulse_points_back_inside() {
        let tuning = BoundaryConfig::default();
        let imp = boundary_impulse(Vec3::new(10.0, 0.0, 0.0), &bounds(), &tuning, 0.02).unwrap();
        assert!(imp.x < 0.0);
        assert!(imp.y.abs() < 1e-6 && imp.z.abs() < 1e-6);
        assert!((imp.length() - 50.0 * 0.02).abs() < 1e-5);
    }

    #[test]
    fn long_frame_capped_to_ceiling() {
        let tuning = BoundaryConfig::default();
        let p = Vec3::new(-9.0, 4.0, 0.0);
        let slow = boundary_impulse(p, &bounds(), &tuning, 5.0).unwrap();
        let ceiling = boundary_impulse(p, &bounds(), &tuning, 0.1).unwrap();
        assert!((slow.length() - ceiling.length()).abs() < 1e-5);
        assert!((slow.length() - 5.0).abs() < 1e-5);
    }
}
