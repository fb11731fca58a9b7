use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::app::state::SceneState;
use crate::core::config::SceneConfig;
use crate::core::system::system_order::ActivitySet;
use crate::interaction::visibility::activity::ActivityFlag;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier for the field

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RapierPhysicsPlugin::<NoUserData>::default(), PipelinePausePlugin))
            .add_systems(PostStartup, configure_gravity);
        let debug = app
            .world()
            .get_resource::<SceneConfig>()
            .is_some_and(|c| c.rapier_debug);
        if debug {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

/// Mirrors the activity flag into every rapier context. Ordered after the
/// flag is folded so a hide takes effect before the same frame's step.
pub struct PipelinePausePlugin;

impl Plugin for PipelinePausePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            sync_pipeline_with_activity
                .after(ActivitySet)
                .run_if(in_state(SceneState::Mounted)),
        );
    }
}

fn configure_gravity(mut rapier_cfg: Query<&mut RapierConfiguration>) {
    // Spheres float; all motion comes from impulses and contacts.
    for mut cfg in &mut rapier_cfg {
        cfg.gravity = Vect::ZERO;
    }
}

/// Pause the rapier pipeline while the scene is off screen so bodies freeze
/// in place instead of coasting on their last velocity.
pub fn sync_pipeline_with_activity(
    flag: Option<Res<ActivityFlag>>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
) {
    let active = flag.is_none_or(|f| f.0);
    for mut cfg in &mut rapier_cfg {
        if cfg.physics_pipeline_active != active {
            cfg.physics_pipeline_active = active;
        }
    }
}
