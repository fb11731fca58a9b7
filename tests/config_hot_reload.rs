use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use orb_field::interaction::session::config_hot_reload::{
    ConfigHotReloadPlugin, ConfigReloadSettings,
};
use orb_field::scene::layout::SceneContainer;
use orb_field::{OrbFieldCorePlugin, ParticleBody, SceneConfig, SceneVariant, SimulationBounds};

const BASE: &str = r#"(
    variant: "ambient",
    card: (rect: Some((left: 0.0, top: 0.0, width: 200.0, height: 200.0))),
)"#;

const EDITED: &str = r#"(
    variant: "ambient",
    card: (
        rect: Some((left: 0.0, top: 0.0, width: 300.0, height: 200.0)),
        sphere_count: 2,
    ),
)"#;

/// Mounted card scene started as `--variant card --seed 5` over `path`.
fn app_with_overrides(path: &Path) -> App {
    let settings = ConfigReloadSettings {
        paths: vec![path.to_path_buf()],
        interval_secs: 0.5,
        variant_override: Some(SceneVariant::Card),
        seed_override: Some(5),
    };
    let (mut cfg, _used, errors) = SceneConfig::load_layered(settings.paths.iter());
    assert!(errors.is_empty(), "{errors:?}");
    settings.apply_overrides(&mut cfg);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
        .insert_resource(settings)
        .insert_resource(cfg)
        .add_plugins((OrbFieldCorePlugin::default(), ConfigHotReloadPlugin));
    app
}

fn sphere_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<ParticleBody>>()
        .iter(app.world())
        .count()
}

#[test]
fn untouched_files_keep_command_line_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.ron");
    fs::write(&path, BASE).unwrap();
    let mut app = app_with_overrides(&path);
    let before = app.world().resource::<SceneConfig>().clone();
    for _ in 0..6 {
        app.update();
    }
    let cfg = app.world().resource::<SceneConfig>();
    assert_eq!(cfg.variant, SceneVariant::Card);
    assert_eq!(cfg.seed, Some(5));
    assert_eq!(*cfg, before);
}

#[test]
fn edited_card_rect_moves_container_bounds_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.ron");
    fs::write(&path, BASE).unwrap();
    let mut app = app_with_overrides(&path);
    for _ in 0..6 {
        app.update();
    }
    assert!((app.world().resource::<SimulationBounds>().half.x - 1.2).abs() < 1e-5);
    assert_eq!(sphere_count(&mut app), 1);

    fs::write(&path, EDITED).unwrap();
    // Push the mtime clearly past the startup snapshot.
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(10))
        .unwrap();
    for _ in 0..6 {
        app.update();
    }

    let cfg = app.world().resource::<SceneConfig>();
    assert_eq!(cfg.variant, SceneVariant::Card);
    assert_eq!(cfg.seed, Some(5));
    assert_eq!(cfg.card.sphere_count, 2);
    assert_eq!(app.world().resource::<SceneContainer>().width(), 300.0);
    assert!((app.world().resource::<SimulationBounds>().half.x - 1.8).abs() < 1e-5);
    assert_eq!(sphere_count(&mut app), 2);
}
