use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::bounds::SimulationBounds;
use crate::core::config::{SceneConfig, SceneVariant};
use crate::scene::layout::{bounds_for, container_rect, window_size, SceneContainer};

/// Which files to watch, plus the command-line overrides that must survive
/// every reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
    pub variant_override: Option<SceneVariant>,
    pub seed_override: Option<u64>,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/scene.ron"),
                PathBuf::from("assets/config/scene.local.ron"),
            ],
            interval_secs: 0.5,
            variant_override: None,
            seed_override: None,
        }
    }
}

impl ConfigReloadSettings {
    pub fn apply_overrides(&self, cfg: &mut SceneConfig) {
        if let Some(v) = self.variant_override {
            cfg.variant = v;
        }
        if self.seed_override.is_some() {
            cfg.seed = self.seed_override;
        }
    }

    fn modified_times(&self) -> impl Iterator<Item = (PathBuf, SystemTime)> + '_ {
        self.paths.iter().filter_map(|p| {
            std::fs::metadata(p)
                .and_then(|m| m.modified())
                .ok()
                .map(|t| (p.clone(), t))
        })
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Poll the layered config files and apply edits live (native only).
/// Only files edited after startup trigger a reload. Tuning constants take
/// effect next tick; the mounted container and bounds are recomputed. The
/// scene variant is fixed for the life of the process.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Startup, snapshot_config_times)
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

/// Files as loaded at startup are the baseline, not an edit.
fn snapshot_config_times(settings: Res<ConfigReloadSettings>, mut state: ResMut<ConfigReloadState>) {
    state.last_mod = settings.modified_times().collect();
}

/// Rebuild the config from disk, keeping overrides and the running variant.
/// `None` when nothing observable changed.
pub fn reloaded_config(
    current: &SceneConfig,
    mut reloaded: SceneConfig,
    settings: &ConfigReloadSettings,
) -> Option<SceneConfig> {
    settings.apply_overrides(&mut reloaded);
    if reloaded.variant != current.variant {
        warn!(requested = ?reloaded.variant, "Config hot-reload: variant change ignored until restart");
        reloaded.variant = current.variant;
    }
    (reloaded != *current).then_some(reloaded)
}

#[allow(clippy::too_many_arguments)]
fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<SceneConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    container: Option<ResMut<SceneContainer>>,
    bounds: Option<ResMut<SimulationBounds>>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    let mut dirty = false;
    for (path, mod_time) in settings.modified_times() {
        match state.last_mod.get(&path) {
            Some(seen) if *seen >= mod_time => {}
            _ => {
                state.last_mod.insert(path, mod_time);
                dirty = true;
            }
        }
    }
    if !dirty {
        return;
    }
    let (loaded, _used, errors) = SceneConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    let Some(new_cfg) = reloaded_config(&cfg_res, loaded, &settings) else {
        return;
    };
    for w in new_cfg.validate() {
        warn!("CONFIG HOT-RELOAD validation: {w}");
    }
    info!("Config hot-reload applied");
    *cfg_res = new_cfg;

    // Mounted scene: the container may depend on config (card rect), and
    // bounds on both. Sphere count follows the container/config change.
    let (Some(mut container), Some(mut bounds)) = (container, bounds) else {
        return;
    };
    let rect = container_rect(&cfg_res, window_size(&cfg_res, windows.single().ok()));
    if rect != container.0 {
        container.0 = rect;
    }
    match bounds_for(&cfg_res, rect) {
        Ok(b) if b != *bounds => *bounds = b,
        Ok(_) => {}
        Err(e) => warn!("CONFIG HOT-RELOAD: keeping previous bounds: {e}"),
    }
}
