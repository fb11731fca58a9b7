//! Central system ordering labels to make the frame sequence explicit.
//! Stages (high-level):
//! 1. InputSampling (window events -> pointer mailbox, activity signals)
//! 2. Activity (visibility signals -> ActivityFlag)
//! 3. ResolvePointer (mailbox -> smoothed kinematic proxy translation)
//! 4. FieldCorrection (boundary + center-pull impulses on dynamic bodies)
//! 5. Rapier (PostUpdate, handled by plugin)
//! 6. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSamplingSet; // only overwrites the mailbox / emits signals

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResolvePointerSet; // proxy target resolved before any correction

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldCorrectionSet; // impulses consumed by the next rapier step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ActivitySet; // visibility signals folded into the flag before any tick work

/// Mount-time ordering: scene resources exist before entities are spawned.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SceneMountSet {
    Resources,
    Entities,
}
