#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::core::bounds::SimulationBounds;
#[cfg(feature = "debug")]
use crate::core::components::{ParticleBody, PointerProxy};
#[cfg(feature = "debug")]
use crate::interaction::visibility::activity::ActivityFlag;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default, Debug, Clone)]
pub struct FieldStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub sphere_count: usize,
    /// Spheres currently outside the bounds (expected to be transient).
    pub outside_count: usize,
    pub proxy_position: Option<Vec3>,
    pub active: bool,
}

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<FieldStats>,
    bounds: Option<Res<SimulationBounds>>,
    flag: Option<Res<ActivityFlag>>,
    q_spheres: Query<&Transform, With<ParticleBody>>,
    q_proxy: Query<&PointerProxy>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    // Exponential smoothing; first sample seeds the average.
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 {
        inst_ms
    } else {
        stats.frame_time_ms * 0.9 + inst_ms * 0.1
    };
    stats.sphere_count = q_spheres.iter().count();
    stats.outside_count = bounds.map_or(0, |b| {
        q_spheres
            .iter()
            .filter(|tf| !b.contains(tf.translation))
            .count()
    });
    stats.proxy_position = q_proxy.iter().next().map(|p| p.tracked);
    stats.active = flag.is_some_and(|f| f.0);
}
