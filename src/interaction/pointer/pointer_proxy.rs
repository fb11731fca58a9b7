//! Kinematic pointer proxy: window pixels -> normalized container coords ->
//! simulation space, smoothed every tick and written as the body's next
//! translation. The proxy only affects spheres through contacts.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierRigidBodyHandle;

use crate::app::state::SceneState;
use crate::core::bounds::SimulationBounds;
use crate::core::components::PointerProxy;
use crate::core::config::{AmbientConfig, CardConfig, SceneConfig, SceneVariant};
use crate::core::system::system_order::ResolvePointerSet;
use crate::interaction::input::mailbox::{InputSource, PointerMailbox, PointerSample};
use crate::interaction::visibility::activity::scene_active;
use crate::rendering::camera::camera::visible_half_extents;
use crate::scene::layout::SceneContainer;

pub struct PointerProxyPlugin;

impl Plugin for PointerProxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            drive_pointer_proxy
                .in_set(ResolvePointerSet)
                .run_if(in_state(SceneState::Mounted).and(scene_active)),
        );
    }
}

/// Raw (unsmoothed) target plus the interpolation factor to follow it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    pub raw: Vec3,
    pub factor: f32,
}

/// Screen point -> [-1, 1] on both axes relative to `rect`, y up.
/// A degenerate rect maps everything to the center.
pub fn normalize_in_rect(point: Vec2, rect: Rect) -> Vec2 {
    let size = rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let x = ((point.x - rect.min.x) / size.x) * 2.0 - 1.0;
    let y = -(((point.y - rect.min.y) / size.y) * 2.0 - 1.0);
    Vec2::new(x, y)
}

/// Card variant: pointer outside the card rests the proxy at the center
/// with the slow factor; inside maps into the bounds minus the margin.
pub fn resolve_card_target(
    sample: PointerSample,
    container: Rect,
    bounds: &SimulationBounds,
    margin: f32,
    card: &CardConfig,
) -> ResolvedTarget {
    let rest = ResolvedTarget {
        raw: Vec3::ZERO,
        factor: card.lerp_outside,
    };
    let PointerSample::Screen { position, .. } = sample else {
        return rest;
    };
    // Rect::contains is inclusive on both edges.
    if !container.contains(position) {
        return rest;
    }
    let n = normalize_in_rect(position, container);
    let reach = (bounds.half.truncate() - Vec2::splat(margin)).max(Vec2::ZERO);
    ResolvedTarget {
        raw: (n * reach).extend(0.0),
        factor: card.lerp_inside,
    }
}

/// Ambient variant: no containment check; maps into the camera's visible
/// half extents at depth 0. Touch follows more slowly than a mouse.
pub fn resolve_ambient_target(
    sample: PointerSample,
    last_source: InputSource,
    container: Rect,
    ambient: &AmbientConfig,
) -> ResolvedTarget {
    let factor = match last_source {
        InputSource::Mouse => ambient.lerp_mouse,
        InputSource::Touch => ambient.lerp_touch,
    };
    let PointerSample::Screen { position, .. } = sample else {
        return ResolvedTarget {
            raw: Vec3::ZERO,
            factor,
        };
    };
    let size = container.size();
    let aspect = if size.y > 0.0 { size.x / size.y } else { 1.0 };
    let view_half = visible_half_extents(&ambient.camera, aspect);
    let n = normalize_in_rect(position, container);
    ResolvedTarget {
        raw: (n * view_half).extend(0.0),
        factor,
    }
}

pub fn resolve_target(
    cfg: &SceneConfig,
    mailbox: &PointerMailbox,
    container: Rect,
    bounds: &SimulationBounds,
) -> ResolvedTarget {
    match cfg.variant {
        SceneVariant::Ambient => resolve_ambient_target(
            mailbox.latest(),
            mailbox.last_source(),
            container,
            &cfg.ambient,
        ),
        SceneVariant::Card => resolve_card_target(
            mailbox.latest(),
            container,
            bounds,
            cfg.boundary.margin,
            &cfg.card,
        ),
    }
}

pub fn drive_pointer_proxy(
    cfg: Res<SceneConfig>,
    mailbox: Res<PointerMailbox>,
    container: Res<SceneContainer>,
    bounds: Res<SimulationBounds>,
    mut q: Query<(&mut PointerProxy, &mut Transform), With<RapierRigidBodyHandle>>,
) {
    let target = resolve_target(&cfg, &mailbox, container.0, &bounds);
    for (mut proxy, mut tf) in q.iter_mut() {
        proxy.tracked = proxy.tracked.lerp(target.raw, target.factor);
        // Kinematic position-based: rapier reads this as the next translation.
        tf.translation = proxy.tracked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_rect() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn normalize_corners_and_center() {
        let r = card_rect();
        assert_eq!(normalize_in_rect(Vec2::new(100.0, 100.0), r), Vec2::ZERO);
        assert_eq!(normalize_in_rect(Vec2::new(0.0, 0.0), r), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_in_rect(Vec2::new(200.0, 200.0), r), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_in_rect(Vec2::new(5.0, 5.0), Rect::new(0.0, 0.0, 0.0, 10.0)), Vec2::ZERO);
    }

    #[test]
    fn card_edge_maps_inside_margin() {
        let cfg = SceneConfig::default();
        let bounds = SimulationBounds::new(Vec3::new(1.2, 1.2, 5.0)).unwrap();
        let t = resolve_card_target(
            PointerSample::Screen {
                position: Vec2::new(200.0, 100.0),
                source: InputSource::Mouse,
            },
            card_rect(),
            &bounds,
            cfg.boundary.margin,
            &cfg.card,
        );
        assert!((t.raw.x - 0.4).abs() < 1e-5);
        assert_eq!(t.raw.y, 0.0);
        assert_eq!(t.factor, 0.4);
    }

    #[test]
    fn ambient_touch_is_slower() {
        let cfg = SceneConfig::default();
        let t = resolve_ambient_target(
            PointerSample::Absent,
            InputSource::Touch,
            Rect::new(0.0, 0.0, 1280.0, 720.0),
            &cfg.ambient,
        );
        assert_eq!(t.raw, Vec3::ZERO);
        assert_eq!(t.factor, 0.15);
    }
}
