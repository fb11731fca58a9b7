use bevy::prelude::*;

use crate::app::state::{SceneLifecyclePlugin, SceneState};
use crate::core::config::SceneConfig;
use crate::core::system::system_order::{
    ActivitySet, FieldCorrectionSet, InputSamplingSet, ResolvePointerSet,
};
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::interaction::input::input_sampling::InputSamplingPlugin;
use crate::interaction::pointer::pointer_proxy::PointerProxyPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::visibility::activity::ActivityPlugin;
use crate::physics::attraction::center_pull::CenterPullPlugin;
use crate::physics::boundary::boundary::BoundaryPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::physics::walls::walls::WallsPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::lighting::lighting::LightingPlugin;
use crate::rendering::materials::materials::MaterialsPlugin;
use crate::scene::layout::LayoutPlugin;
use crate::scene::spawn::SceneSpawnPlugin;

/// Outcome of loading the layered config files, logged once at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigLoadReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
}

/// Simulation logic only: lifecycle, input, activity, proxy, field
/// corrections and body spawning. Runs headless on `MinimalPlugins`.
pub struct OrbFieldCorePlugin {
    pub mount_on_startup: bool,
}

impl Default for OrbFieldCorePlugin {
    fn default() -> Self {
        Self {
            mount_on_startup: true,
        }
    }
}

impl Plugin for OrbFieldCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .configure_sets(
                Update,
                (
                    InputSamplingSet,
                    ActivitySet,
                    ResolvePointerSet,
                    FieldCorrectionSet,
                )
                    .chain(),
            )
            .add_plugins((
                SceneLifecyclePlugin,
                LayoutPlugin,
                InputSamplingPlugin,
                ActivityPlugin,
                PointerProxyPlugin,
                BoundaryPlugin,
                CenterPullPlugin,
                WallsPlugin,
                SceneSpawnPlugin,
            ))
            .add_systems(Startup, report_config);
        if self.mount_on_startup {
            app.add_systems(Startup, mount_scene);
        }
    }
}

/// Full scene: core logic plus rapier, camera, lights, materials and the
/// session helpers. Expects `DefaultPlugins`.
#[derive(Default)]
pub struct OrbFieldPlugin;

impl Plugin for OrbFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            OrbFieldCorePlugin::default(),
            PhysicsSetupPlugin,
            CameraPlugin,
            LightingPlugin,
            MaterialsPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
        #[cfg(feature = "debug")]
        app.add_plugins(DebugPlugin);
    }
}

fn mount_scene(mut next: ResMut<NextState<SceneState>>) {
    next.set(SceneState::Mounted);
}

fn report_config(cfg: Res<SceneConfig>, report: Option<Res<ConfigLoadReport>>) {
    if let Some(report) = report {
        if !report.used.is_empty() {
            info!(files = ?report.used, "config loaded");
        }
        for e in &report.errors {
            warn!("config: {e}");
        }
    }
    for w in cfg.validate() {
        warn!("config validation: {w}");
    }
}
