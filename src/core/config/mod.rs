pub mod config;

pub use config::{
    AmbientConfig, BodyConfig, BoundaryConfig, CameraConfig, CardConfig, CenterPullConfig,
    ContainerRect, HalfExtents, SceneConfig, SceneVariant, TextureConfig, VisibilityConfig,
    WindowConfig,
};
