use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::app::state::SceneState;
use crate::core::bounds::{BoundsError, SimulationBounds};
use crate::core::config::{SceneConfig, SceneVariant};
use crate::core::system::system_order::InputSamplingSet;
use crate::interaction::visibility::activity::ActivitySignal;

/// Host rectangle of the scene in window logical pixels (top-left origin).
#[derive(Resource, Debug, Copy, Clone, PartialEq, Deref)]
pub struct SceneContainer(pub Rect);

pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WindowResized>().add_systems(
            Update,
            refresh_layout_on_resize
                .in_set(InputSamplingSet)
                .run_if(in_state(SceneState::Mounted)),
        );
    }
}

/// Ambient fills the window; a card uses its configured rect or, when none
/// is set, the whole window.
pub fn container_rect(cfg: &SceneConfig, window_size: Vec2) -> Rect {
    let full = Rect::from_corners(Vec2::ZERO, window_size);
    match cfg.variant {
        SceneVariant::Ambient => full,
        SceneVariant::Card => cfg.card.rect.map(|r| r.to_rect()).unwrap_or(full),
    }
}

pub fn bounds_for(cfg: &SceneConfig, container: Rect) -> Result<SimulationBounds, BoundsError> {
    match cfg.variant {
        SceneVariant::Ambient => SimulationBounds::from_extents(&cfg.ambient.bounds),
        SceneVariant::Card => {
            let size = container.size();
            SimulationBounds::from_card_pixels(size.x, size.y, &cfg.card)
        }
    }
}

pub fn layout_signal(container: Rect, viewport_height: f32) -> ActivitySignal {
    ActivitySignal::Layout {
        top: container.min.y,
        bottom: container.max.y,
        viewport_height,
    }
}

/// Logical size of the primary window, falling back to the configured size
/// when running headless.
pub fn window_size(cfg: &SceneConfig, window: Option<&Window>) -> Vec2 {
    window
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height))
}

/// Recompute container and bounds after a resize, then recheck visibility.
/// Invalid bounds (zero-sized card) keep the previous ones.
pub fn refresh_layout_on_resize(
    cfg: Res<SceneConfig>,
    mut resized: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut container: ResMut<SceneContainer>,
    mut bounds: ResMut<SimulationBounds>,
    mut signals: EventWriter<ActivitySignal>,
) {
    let primary = primary.single().ok();
    let Some(ev) = resized
        .read()
        .filter(|ev| primary.is_none_or(|p| p == ev.window))
        .last()
    else {
        return;
    };
    let size = Vec2::new(ev.width, ev.height);
    let rect = container_rect(&cfg, size);
    if rect != container.0 {
        container.0 = rect;
    }
    match bounds_for(&cfg, rect) {
        Ok(b) if b != *bounds => {
            debug!(half = ?b.half, "simulation bounds recomputed");
            *bounds = b;
        }
        Ok(_) => {}
        Err(e) => warn!("resize produced invalid bounds, keeping previous: {e}"),
    }
    signals.write(layout_signal(rect, size.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ContainerRect;

    #[test]
    fn card_without_rect_uses_window() {
        let mut cfg = SceneConfig::default();
        cfg.variant = SceneVariant::Card;
        let r = container_rect(&cfg, Vec2::new(400.0, 300.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 400.0, 300.0));
        cfg.card.rect = Some(ContainerRect {
            left: 10.0,
            top: 20.0,
            width: 200.0,
            height: 100.0,
        });
        let r = container_rect(&cfg, Vec2::new(400.0, 300.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 210.0, 120.0));
        let b = bounds_for(&cfg, r).unwrap();
        assert!((b.half.x - 1.2).abs() < 1e-5);
        assert!((b.half.y - 0.6).abs() < 1e-5);
    }
}
