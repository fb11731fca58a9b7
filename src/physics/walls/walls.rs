use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::app::state::SceneState;
use crate::core::bounds::SimulationBounds;
use crate::core::components::{BodyKind, BoundaryWall};
use crate::core::config::{SceneConfig, SceneVariant};

/// Fixed cuboids on the six faces of card bounds. Rebuilt whenever the
/// bounds resource is (re)inserted or replaced.
pub struct WallsPlugin;

impl Plugin for WallsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            rebuild_walls.run_if(
                in_state(SceneState::Mounted)
                    .and(resource_exists_and_changed::<SimulationBounds>),
            ),
        );
    }
}

/// (center, half extents) for each wall, in -z, +z, -x, +x, -y, +y order.
pub fn wall_layout(bounds: &SimulationBounds, half_thickness: f32) -> [(Vec3, Vec3); 6] {
    let h = bounds.half;
    let t = half_thickness;
    [
        (Vec3::new(0.0, 0.0, -h.z), Vec3::new(h.x, h.y, t)),
        (Vec3::new(0.0, 0.0, h.z), Vec3::new(h.x, h.y, t)),
        (Vec3::new(-h.x, 0.0, 0.0), Vec3::new(t, h.y, h.z)),
        (Vec3::new(h.x, 0.0, 0.0), Vec3::new(t, h.y, h.z)),
        (Vec3::new(0.0, -h.y, 0.0), Vec3::new(h.x, t, h.z)),
        (Vec3::new(0.0, h.y, 0.0), Vec3::new(h.x, t, h.z)),
    ]
}

pub fn rebuild_walls(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    bounds: Res<SimulationBounds>,
    existing: Query<Entity, With<BoundaryWall>>,
) {
    for e in &existing {
        commands.entity(e).despawn();
    }
    if cfg.variant != SceneVariant::Card {
        return;
    }
    for (center, half) in wall_layout(&bounds, cfg.card.wall_half_thickness) {
        commands.spawn((
            BoundaryWall,
            BodyKind::Fixed,
            BodyKind::Fixed.rigid_body(),
            Collider::cuboid(half.x, half.y, half.z),
            Transform::from_translation(center),
            StateScoped(SceneState::Mounted),
            Name::new("BoundaryWall"),
        ));
    }
    debug!(half = ?bounds.half, "boundary walls rebuilt");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_sit_on_faces() {
        let b = SimulationBounds::new(Vec3::new(2.0, 1.5, 5.0)).unwrap();
        let walls = wall_layout(&b, 0.1);
        assert_eq!(walls[0].0, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(walls[3].0, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(walls[5].1, Vec3::new(2.0, 0.1, 5.0));
        for (c, _) in walls {
            assert!(b.contains(c));
        }
    }
}
