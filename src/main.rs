use std::path::PathBuf;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;

use orb_field::core::config::{SceneConfig, SceneVariant};
use orb_field::interaction::session::config_hot_reload::ConfigReloadSettings;
use orb_field::{ConfigLoadReport, OrbFieldPlugin};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pointer-reactive sphere field", long_about = None)]
struct Cli {
    /// Scene layout to mount (overrides the config file).
    #[arg(long)]
    variant: Option<SceneVariant>,
    /// Config layers, applied in order. Defaults to scene.ron + scene.local.ron.
    #[arg(long = "config")]
    config: Vec<PathBuf>,
    /// Fixed RNG seed for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cli = Cli::parse();
    let paths = if cli.config.is_empty() {
        ConfigReloadSettings::default().paths
    } else {
        cli.config.clone()
    };
    let reload = ConfigReloadSettings {
        paths,
        variant_override: cli.variant,
        seed_override: cli.seed,
        ..default()
    };
    let (mut cfg, used, errors) = SceneConfig::load_layered(reload.paths.iter());
    reload.apply_overrides(&mut cfg);
    if cfg.window.width <= 0.0 || cfg.window.height <= 0.0 {
        anyhow::bail!(
            "window size {}x{} must be positive",
            cfg.window.width,
            cfg.window.height
        );
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(reload)
        .insert_resource(ConfigLoadReport { used, errors })
        .insert_resource(cfg)
        .add_plugins(OrbFieldPlugin)
        .run();
    Ok(())
}
