#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier3d::render::DebugRenderContext;

#[cfg(feature = "debug")]
use crate::app::state::SceneState;
#[cfg(feature = "debug")]
use crate::interaction::visibility::activity::{ActivityFlag, ActivitySignal};

/// M: mount/unmount the scene. V: flip visibility as if scrolled away.
/// R: toggle the rapier wireframe when the debug renderer is installed.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<SceneState>>,
    mut next: ResMut<NextState<SceneState>>,
    flag: Option<Res<ActivityFlag>>,
    mut signals: EventWriter<ActivitySignal>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    if keys.just_pressed(KeyCode::KeyM) {
        let to = match state.get() {
            SceneState::Mounted => SceneState::Unmounted,
            SceneState::Unmounted => SceneState::Mounted,
        };
        info!(from = ?state.get(), to = ?to, "debug scene toggle");
        next.set(to);
    }
    if keys.just_pressed(KeyCode::KeyV) {
        if let Some(flag) = flag {
            signals.write(ActivitySignal::Intersection {
                visible_ratio: if flag.0 { 0.0 } else { 1.0 },
            });
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        if let Some(mut c) = ctx {
            c.enabled = !c.enabled;
        }
    }
}
