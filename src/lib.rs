pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod scene;

// Curated re-exports
pub use crate::app::plugin::{ConfigLoadReport, OrbFieldCorePlugin, OrbFieldPlugin};
pub use crate::app::state::SceneState;
pub use crate::core::bounds::{BoundsError, SimulationBounds};
pub use crate::core::components::{BodyKind, BodyScale, BoundaryWall, ParticleBody, PointerProxy};
pub use crate::core::config::{SceneConfig, SceneVariant, WindowConfig};
pub use crate::interaction::input::mailbox::{InputSource, PointerInput, PointerMailbox, PointerSample};
pub use crate::interaction::visibility::activity::{ActivityFlag, ActivitySignal};
