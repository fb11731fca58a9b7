use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;

/// Marker component identifying a confined sphere (dynamic body + collider).
#[derive(Component)]
pub struct ParticleBody;

/// Visual scale factor; also sizes the collider and the center-pull impulse.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BodyScale(pub f32);

/// Tag component for the sphere mesh child.
#[derive(Component)]
pub struct SphereVisual;

/// Kinematic obstacle driven by pointer input. `tracked` is the smoothed
/// target written to the body's translation every active tick.
#[derive(Component, Debug, Default, Copy, Clone)]
pub struct PointerProxy {
    pub tracked: Vec3,
}

/// One of the six fixed faces around card bounds.
#[derive(Component)]
pub struct BoundaryWall;

/// How a scene body is driven each tick.
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved only by impulses; the physics backend owns its velocity.
    Dynamic,
    /// Translation assigned directly; never pushed by contacts.
    Kinematic,
    /// Never moves.
    Fixed,
}

impl BodyKind {
    pub fn rigid_body(self) -> RigidBody {
        match self {
            BodyKind::Dynamic => RigidBody::Dynamic,
            BodyKind::Kinematic => RigidBody::KinematicPositionBased,
            BodyKind::Fixed => RigidBody::Fixed,
        }
    }
}
