use bevy::prelude::*;
use bevy::window::WindowOccluded;

use crate::app::state::SceneState;
use crate::core::config::SceneConfig;
use crate::core::system::system_order::{ActivitySet, InputSamplingSet};

/// True while the scene's container is at least partly on screen. Every
/// per-tick mutation is gated on it. Owned by the mounted scene.
#[derive(Resource, Debug, Copy, Clone, PartialEq, Eq, Deref)]
pub struct ActivityFlag(pub bool);

impl Default for ActivityFlag {
    fn default() -> Self {
        Self(true)
    }
}

/// Visibility evidence from any collaborator. Signals are applied in
/// arrival order and the last one decides the flag.
#[derive(Event, Debug, Copy, Clone, PartialEq)]
pub enum ActivitySignal {
    /// Fraction of the container currently visible (observer style).
    Intersection { visible_ratio: f32 },
    /// Container edges against the viewport height (layout/scroll recheck).
    Layout {
        top: f32,
        bottom: f32,
        viewport_height: f32,
    },
}

impl ActivitySignal {
    pub fn is_visible(&self, threshold: f32) -> bool {
        match *self {
            ActivitySignal::Intersection { visible_ratio } => visible_ratio >= threshold,
            ActivitySignal::Layout {
                top,
                bottom,
                viewport_height,
            } => top < viewport_height && bottom > 0.0,
        }
    }
}

/// Run condition for tick systems.
pub fn scene_active(flag: Option<Res<ActivityFlag>>) -> bool {
    flag.is_some_and(|f| f.0)
}

pub struct ActivityPlugin;

impl Plugin for ActivityPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActivitySignal>()
            .add_event::<WindowOccluded>()
            .add_systems(
                Update,
                (
                    observe_window_occlusion.in_set(InputSamplingSet),
                    apply_activity_signals.in_set(ActivitySet),
                )
                    .run_if(in_state(SceneState::Mounted)),
            );
    }
}

/// An occluded or minimized window hides the whole container.
pub fn observe_window_occlusion(
    mut occluded: EventReader<WindowOccluded>,
    mut signals: EventWriter<ActivitySignal>,
) {
    for ev in occluded.read() {
        signals.write(ActivitySignal::Intersection {
            visible_ratio: if ev.occluded { 0.0 } else { 1.0 },
        });
    }
}

pub fn apply_activity_signals(
    cfg: Res<SceneConfig>,
    mut signals: EventReader<ActivitySignal>,
    mut flag: ResMut<ActivityFlag>,
) {
    let Some(last) = signals.read().last() else {
        return;
    };
    let visible = last.is_visible(cfg.visibility.threshold);
    if flag.0 != visible {
        debug!(active = visible, signal = ?last, "scene activity changed");
        flag.0 = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_threshold_inclusive() {
        let s = ActivitySignal::Intersection { visible_ratio: 0.1 };
        assert!(s.is_visible(0.1));
        assert!(!ActivitySignal::Intersection { visible_ratio: 0.05 }.is_visible(0.1));
    }

    #[test]
    fn layout_requires_overlap() {
        let above = ActivitySignal::Layout {
            top: -500.0,
            bottom: 0.0,
            viewport_height: 720.0,
        };
        assert!(!above.is_visible(0.1));
        let below = ActivitySignal::Layout {
            top: 720.0,
            bottom: 1000.0,
            viewport_height: 720.0,
        };
        assert!(!below.is_visible(0.1));
        let partial = ActivitySignal::Layout {
            top: 700.0,
            bottom: 1000.0,
            viewport_height: 720.0,
        };
        assert!(partial.is_visible(0.1));
    }
}
