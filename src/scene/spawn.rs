use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::app::state::SceneState;
use crate::core::components::{BodyKind, BodyScale, ParticleBody, PointerProxy, SphereVisual};
use crate::core::config::{SceneConfig, SceneVariant};
use crate::core::system::system_order::SceneMountSet;
use crate::rendering::materials::materials::SphereVisuals;
use crate::scene::layout::SceneContainer;

/// Scene-owned RNG so a configured seed reproduces the same layout.
#[derive(Resource, Deref, DerefMut)]
pub struct SceneRng(pub StdRng);

impl SceneRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

pub struct SceneSpawnPlugin;

impl Plugin for SceneSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SceneState::Mounted),
            spawn_scene_bodies.in_set(SceneMountSet::Entities),
        )
        .add_systems(
            Update,
            reconcile_sphere_count.run_if(
                in_state(SceneState::Mounted).and(
                    resource_exists_and_changed::<SceneContainer>
                        .or(resource_exists_and_changed::<SceneConfig>),
                ),
            ),
        );
    }
}

/// Fewer spheres on narrow viewports; the card variant is fixed.
pub fn sphere_count_for(cfg: &SceneConfig, viewport_width: f32) -> usize {
    match cfg.variant {
        SceneVariant::Ambient if viewport_width < cfg.ambient.narrow_viewport_px => {
            cfg.ambient.sphere_count_narrow
        }
        SceneVariant::Ambient => cfg.ambient.sphere_count_wide,
        SceneVariant::Card => cfg.card.sphere_count,
    }
}

/// Uniform in `[-spread/2, spread/2]`.
fn spread(rng: &mut impl Rng, s: f32) -> f32 {
    if s <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-s * 0.5..=s * 0.5)
}

pub fn spawn_position(cfg: &SceneConfig, rng: &mut impl Rng) -> Vec3 {
    match cfg.variant {
        SceneVariant::Ambient => {
            let a = &cfg.ambient;
            let s = a.spawn_spread;
            Vec3::new(spread(rng, s), spread(rng, s), spread(rng, s)) + a.spawn_offset.to_vec3()
        }
        SceneVariant::Card => Vec3::ZERO,
    }
}

pub fn pick_scale(cfg: &SceneConfig, rng: &mut impl Rng) -> f32 {
    match cfg.variant {
        SceneVariant::Ambient => cfg.ambient.scales.choose(rng).copied().unwrap_or(1.0),
        SceneVariant::Card => cfg.card.sphere_scale,
    }
}

/// Ambient spheres carry a small cylindrical nub so they tumble instead of
/// rolling smoothly; card spheres are plain balls.
pub fn sphere_collider(variant: SceneVariant, scale: f32) -> Collider {
    match variant {
        SceneVariant::Ambient => Collider::compound(vec![
            (Vec3::ZERO, Quat::IDENTITY, Collider::ball(scale)),
            (
                Vec3::new(0.0, 0.0, 1.2 * scale),
                Quat::from_rotation_x(FRAC_PI_2),
                Collider::cylinder(0.15 * scale, 0.275 * scale),
            ),
        ]),
        SceneVariant::Card => Collider::ball(scale),
    }
}

pub fn spawn_sphere(
    commands: &mut Commands,
    cfg: &SceneConfig,
    rng: &mut impl Rng,
    visuals: Option<&SphereVisuals>,
) -> Entity {
    let scale = pick_scale(cfg, rng);
    let position = spawn_position(cfg, rng);
    let body = match cfg.variant {
        SceneVariant::Ambient => &cfg.ambient.body,
        SceneVariant::Card => &cfg.card.body,
    };
    let mut e = commands.spawn((
        ParticleBody,
        BodyKind::Dynamic,
        BodyScale(scale),
        BodyKind::Dynamic.rigid_body(),
        sphere_collider(cfg.variant, scale),
        Damping {
            linear_damping: body.linear_damping,
            angular_damping: body.angular_damping,
        },
        Friction::coefficient(body.friction),
        ExternalImpulse::default(),
        Velocity::zero(),
        Transform::from_translation(position),
        Visibility::default(),
        StateScoped(SceneState::Mounted),
        Name::new("Sphere"),
    ));
    if let Some(v) = visuals {
        let material = v.pick(rng);
        let tilt = match cfg.variant {
            SceneVariant::Ambient => Quat::from_euler(EulerRot::XYZ, 0.3, 1.0, 1.0),
            SceneVariant::Card => Quat::IDENTITY,
        };
        e.with_children(|c| {
            c.spawn((
                SphereVisual,
                Mesh3d(v.mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_rotation(tilt).with_scale(Vec3::splat(scale)),
            ));
        });
    }
    e.id()
}

pub fn spawn_pointer_proxy(commands: &mut Commands, cfg: &SceneConfig) -> Entity {
    let radius = match cfg.variant {
        SceneVariant::Ambient => cfg.ambient.proxy_radius,
        SceneVariant::Card => cfg.card.proxy_radius,
    };
    commands
        .spawn((
            PointerProxy::default(),
            BodyKind::Kinematic,
            BodyKind::Kinematic.rigid_body(),
            Collider::ball(radius),
            Transform::default(),
            StateScoped(SceneState::Mounted),
            Name::new("PointerProxy"),
        ))
        .id()
}

pub fn spawn_scene_bodies(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    container: Res<SceneContainer>,
    mut rng: ResMut<SceneRng>,
    visuals: Option<Res<SphereVisuals>>,
) {
    spawn_pointer_proxy(&mut commands, &cfg);
    let count = sphere_count_for(&cfg, container.width());
    for _ in 0..count {
        spawn_sphere(&mut commands, &cfg, &mut rng.0, visuals.as_deref());
    }
    info!(variant = ?cfg.variant, spheres = count, "scene bodies spawned");
}

/// Keep the sphere count in line with the viewport after a resize or a
/// config reload: extra bodies are despawned, missing ones spawned fresh.
pub fn reconcile_sphere_count(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    container: Res<SceneContainer>,
    mut rng: ResMut<SceneRng>,
    visuals: Option<Res<SphereVisuals>>,
    spheres: Query<Entity, With<ParticleBody>>,
) {
    let want = sphere_count_for(&cfg, container.width());
    let have = spheres.iter().count();
    if want == have {
        return;
    }
    if have > want {
        for e in spheres.iter().skip(want) {
            commands.entity(e).despawn();
        }
    } else {
        for _ in have..want {
            spawn_sphere(&mut commands, &cfg, &mut rng.0, visuals.as_deref());
        }
    }
    debug!(from = have, to = want, "sphere count reconciled");
}
