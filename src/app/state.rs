use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::bounds::SimulationBounds;
use crate::core::config::SceneConfig;
use crate::core::system::system_order::SceneMountSet;
use crate::interaction::input::mailbox::PointerMailbox;
use crate::interaction::visibility::activity::{ActivityFlag, ActivitySignal};
use crate::scene::layout::{bounds_for, container_rect, layout_signal, window_size, SceneContainer};
use crate::scene::spawn::SceneRng;

/// Mounted lifetime of the particle scene.
/// Unmounted -> Mounted (spawn + resources) -> Unmounted (everything released).
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SceneState {
    #[default]
    Unmounted,
    Mounted,
}

/// Scoped acquisition/release around the mounted scene: resources are
/// inserted on enter and removed on exit; entities carry `StateScoped` and
/// are despawned with it. Input and tick systems are all gated on
/// `SceneState::Mounted`, so nothing outlives the scene.
pub struct SceneLifecyclePlugin;

impl Plugin for SceneLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>()
            .enable_state_scoped_entities::<SceneState>()
            .add_event::<ActivitySignal>()
            .configure_sets(
                OnEnter(SceneState::Mounted),
                (SceneMountSet::Resources, SceneMountSet::Entities).chain(),
            )
            .add_systems(
                OnEnter(SceneState::Mounted),
                mount_scene_resources.in_set(SceneMountSet::Resources),
            )
            .add_systems(OnExit(SceneState::Mounted), release_scene_resources);
    }
}

pub fn mount_scene_resources(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut signals: EventWriter<ActivitySignal>,
) {
    let size = window_size(&cfg, windows.single().ok());
    let container = container_rect(&cfg, size);
    let bounds = bounds_for(&cfg, container).unwrap_or_else(|e| {
        warn!("invalid scene bounds at mount ({e}); using unit bounds");
        SimulationBounds { half: Vec3::ONE }
    });
    info!(
        variant = ?cfg.variant,
        half = ?bounds.half,
        container = ?container,
        "mounting particle scene"
    );
    commands.insert_resource(PointerMailbox::default());
    commands.insert_resource(ActivityFlag::default());
    commands.insert_resource(SceneContainer(container));
    commands.insert_resource(bounds);
    commands.insert_resource(SceneRng::from_seed(cfg.seed));
    // Initial visibility check; observers refine it later.
    signals.write(layout_signal(container, size.y));
}

pub fn release_scene_resources(mut commands: Commands) {
    commands.remove_resource::<PointerMailbox>();
    commands.remove_resource::<ActivityFlag>();
    commands.remove_resource::<SceneContainer>();
    commands.remove_resource::<SimulationBounds>();
    commands.remove_resource::<SceneRng>();
    info!("particle scene released");
}
