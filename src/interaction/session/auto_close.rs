use bevy::prelude::*;

use crate::app::state::SceneState;
use crate::core::bounds::SimulationBounds;
use crate::core::components::{BoundaryWall, ParticleBody, PointerProxy};
use crate::core::config::SceneConfig;
use crate::interaction::input::mailbox::PointerMailbox;
use crate::interaction::visibility::activity::ActivityFlag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeRunPhase {
    Running,
    /// Unmount requested; waiting for the state exit to run.
    Unmounting,
    Done,
}

/// Timed smoke run: after `window.autoClose` seconds the scene is unmounted,
/// the teardown is checked, and only then is exit requested. A teardown that
/// leaves bodies or scene resources behind exits with code 1.
#[derive(Resource, Debug)]
pub struct SmokeRun {
    timer: Timer,
    pub phase: SmokeRunPhase,
}

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_smoke_run).add_systems(
            Update,
            advance_smoke_run.run_if(resource_exists::<SmokeRun>),
        );
    }
}

fn arm_smoke_run(mut commands: Commands, cfg: Res<SceneConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "smoke run armed: unmount and exit after {secs}s");
        commands.insert_resource(SmokeRun {
            timer: Timer::from_seconds(secs, TimerMode::Once),
            phase: SmokeRunPhase::Running,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn advance_smoke_run(
    time: Res<Time>,
    mut run: ResMut<SmokeRun>,
    state: Res<State<SceneState>>,
    mut next: ResMut<NextState<SceneState>>,
    leftovers: Query<(), Or<(With<ParticleBody>, With<PointerProxy>, With<BoundaryWall>)>>,
    mailbox: Option<Res<PointerMailbox>>,
    bounds: Option<Res<SimulationBounds>>,
    flag: Option<Res<ActivityFlag>>,
    mut exit: EventWriter<AppExit>,
) {
    match run.phase {
        SmokeRunPhase::Running => {
            if !run.timer.tick(time.delta()).just_finished() {
                return;
            }
            if *state.get() == SceneState::Mounted {
                next.set(SceneState::Unmounted);
            }
            run.phase = SmokeRunPhase::Unmounting;
        }
        SmokeRunPhase::Unmounting => {
            if *state.get() == SceneState::Mounted {
                return;
            }
            let entities = leftovers.iter().count();
            let resources = mailbox.is_some() || bounds.is_some() || flag.is_some();
            if entities == 0 && !resources {
                info!("smoke run: scene released cleanly, requesting exit");
                exit.write(AppExit::Success);
            } else {
                error!(entities, resources, "smoke run: teardown left scene state behind");
                exit.write(AppExit::from_code(1));
            }
            run.phase = SmokeRunPhase::Done;
        }
        SmokeRunPhase::Done => {}
    }
}
