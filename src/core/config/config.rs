use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Orb Field".into(),
            auto_close: 0.0,
        }
    }
}

/// Which of the two scene layouts to mount. Written as a lowercase string
/// in RON so it survives the untyped layered merge.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum SceneVariant {
    /// Full-page background: many spheres, center pull, camera-space pointer.
    #[default]
    Ambient,
    /// Card-scoped: one sphere, walls, bounds derived from the card size.
    Card,
}
impl TryFrom<String> for SceneVariant {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
impl std::str::FromStr for SceneVariant {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ambient" => Ok(SceneVariant::Ambient),
            "card" => Ok(SceneVariant::Card),
            other => Err(format!("unknown scene variant '{other}' (expected ambient|card)")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct HalfExtents {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl HalfExtents {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
impl Default for HalfExtents {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Soft wall tuning shared by both variants.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Approximates the sphere's visual radius.
    pub margin: f32,
    pub push_strength: f32,
    pub epsilon: f32,
    /// Elapsed time is capped to this before scaling any impulse.
    pub max_frame_dt: f32,
}
impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            margin: 0.8,
            push_strength: 50.0,
            epsilon: 0.01,
            max_frame_dt: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CenterPullConfig {
    pub enabled: bool,
    /// Per-axis impulse scale; y is stronger so spheres rise into view.
    pub strength: HalfExtents,
    pub min_distance: f32,
}
impl Default for CenterPullConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: HalfExtents::new(50.0, 150.0, 50.0),
            min_distance: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
}
impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            linear_damping: 0.75,
            angular_damping: 0.15,
            friction: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 20.0,
            fov_degrees: 32.5,
            near: 1.0,
            far: 100.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AmbientConfig {
    pub bounds: HalfExtents,
    /// Viewports narrower than this (logical px) get the reduced count.
    pub narrow_viewport_px: f32,
    pub sphere_count_narrow: usize,
    pub sphere_count_wide: usize,
    pub scales: Vec<f32>,
    pub spawn_spread: f32,
    pub spawn_offset: HalfExtents,
    pub mesh_radius: f32,
    pub body: BodyConfig,
    pub pull: CenterPullConfig,
    pub proxy_radius: f32,
    pub lerp_mouse: f32,
    pub lerp_touch: f32,
    pub camera: CameraConfig,
}
impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            bounds: HalfExtents::new(16.0, 16.0, 12.0),
            narrow_viewport_px: 768.0,
            sphere_count_narrow: 15,
            sphere_count_wide: 30,
            scales: vec![0.9, 1.3, 1.1, 1.3, 1.3],
            spawn_spread: 20.0,
            spawn_offset: HalfExtents::new(0.0, -25.0, -10.0),
            mesh_radius: 1.2,
            body: BodyConfig::default(),
            pull: CenterPullConfig::default(),
            proxy_radius: 2.5,
            lerp_mouse: 0.2,
            lerp_touch: 0.15,
            camera: CameraConfig::default(),
        }
    }
}

/// Card container rectangle in window logical pixels (top-left origin).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}
impl Default for ContainerRect {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 300.0,
            height: 300.0,
        }
    }
}
impl ContainerRect {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CardConfig {
    /// `None` makes the whole window the card.
    pub rect: Option<ContainerRect>,
    pub depth: f32,
    pub max_extent: f32,
    pub px_to_units: f32,
    pub sphere_count: usize,
    pub sphere_scale: f32,
    pub mesh_radius: f32,
    pub body: BodyConfig,
    pub proxy_radius: f32,
    pub lerp_inside: f32,
    pub lerp_outside: f32,
    pub wall_half_thickness: f32,
    pub camera: CameraConfig,
}
impl Default for CardConfig {
    fn default() -> Self {
        Self {
            rect: None,
            depth: 5.0,
            max_extent: 3.5,
            px_to_units: 0.006,
            sphere_count: 1,
            sphere_scale: 0.7,
            mesh_radius: 1.0,
            body: BodyConfig {
                linear_damping: 0.8,
                angular_damping: 0.2,
                friction: 0.1,
            },
            proxy_radius: 1.5,
            lerp_inside: 0.4,
            lerp_outside: 0.1,
            wall_half_thickness: 0.1,
            camera: CameraConfig {
                distance: 8.0,
                fov_degrees: 50.0,
                near: 0.1,
                far: 20.0,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    pub paths: Vec<String>,
    pub placeholder: String,
    pub emissive_intensity: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub clearcoat: f32,
}
impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "textures/react.png".into(),
                "textures/next.png".into(),
                "textures/typescript.png".into(),
                "textures/javascript.png".into(),
            ],
            placeholder: "textures/placeholder.png".into(),
            emissive_intensity: 0.3,
            metallic: 0.5,
            roughness: 1.0,
            clearcoat: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Fraction of the container that must be visible to count as active.
    pub threshold: f32,
}
impl Default for VisibilityConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub variant: SceneVariant,
    pub boundary: BoundaryConfig,
    pub ambient: AmbientConfig,
    pub card: CardConfig,
    pub textures: TextureConfig,
    pub visibility: VisibilityConfig,
    pub rapier_debug: bool,
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge RON documents in order (later maps override earlier keys
    /// recursively) and deserialize the result. Missing or broken files are
    /// reported in the error list and skipped.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<SceneConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (SceneConfig::default(), used, errors)
                }
            },
            None => (SceneConfig::default(), used, errors),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let b = &self.boundary;
        if b.margin < 0.0 {
            w.push(format!("boundary.margin {} negative", b.margin));
        }
        if b.push_strength <= 0.0 {
            w.push("boundary.push_strength must be > 0".into());
        }
        if b.epsilon < 0.0 {
            w.push("boundary.epsilon negative -> every tick corrects".into());
        }
        if b.max_frame_dt <= 0.0 {
            w.push("boundary.max_frame_dt must be > 0 (no correction would ever apply)".into());
        }
        fn check_extents(w: &mut Vec<String>, label: &str, e: &HalfExtents, margin: f32) {
            for (axis, v) in [("x", e.x), ("y", e.y), ("z", e.z)] {
                if v <= 0.0 {
                    w.push(format!("{label}.{axis} must be > 0 (got {v})"));
                } else if v <= margin {
                    w.push(format!(
                        "{label}.{axis} {v} not larger than boundary.margin {margin}; spheres pinned to one face"
                    ));
                }
            }
        }
        fn check_lerp(w: &mut Vec<String>, label: &str, f: f32) {
            if !(f > 0.0 && f <= 1.0) {
                w.push(format!("{label} {f} outside (0, 1]"));
            }
        }
        let a = &self.ambient;
        check_extents(&mut w, "ambient.bounds", &a.bounds, b.margin);
        if a.sphere_count_narrow == 0 || a.sphere_count_wide == 0 {
            w.push("ambient sphere count is 0; nothing will spawn".into());
        }
        if a.sphere_count_narrow > a.sphere_count_wide {
            w.push(format!(
                "ambient.sphere_count_narrow {} exceeds sphere_count_wide {}",
                a.sphere_count_narrow, a.sphere_count_wide
            ));
        }
        if a.scales.is_empty() {
            w.push("ambient.scales empty -> spheres fall back to scale 1.0".into());
        }
        if a.scales.iter().any(|s| *s <= 0.0) {
            w.push("ambient.scales must all be > 0".into());
        }
        check_lerp(&mut w, "ambient.lerp_mouse", a.lerp_mouse);
        check_lerp(&mut w, "ambient.lerp_touch", a.lerp_touch);
        if a.lerp_touch > a.lerp_mouse {
            w.push("ambient.lerp_touch faster than lerp_mouse; touch follow will jitter".into());
        }
        let c = &self.card;
        if c.max_extent <= b.margin {
            w.push(format!(
                "card.max_extent {} not larger than boundary.margin {}",
                c.max_extent, b.margin
            ));
        }
        if c.depth <= 0.0 || c.px_to_units <= 0.0 {
            w.push("card.depth and card.px_to_units must be > 0".into());
        }
        if let Some(r) = c.rect {
            if r.width <= 0.0 || r.height <= 0.0 {
                w.push(format!("card.rect size {}x{} must be > 0", r.width, r.height));
            }
        }
        if c.sphere_count == 0 {
            w.push("card.sphere_count is 0; nothing will spawn".into());
        }
        check_lerp(&mut w, "card.lerp_inside", c.lerp_inside);
        check_lerp(&mut w, "card.lerp_outside", c.lerp_outside);
        for (label, cam) in [("ambient.camera", &a.camera), ("card.camera", &c.camera)] {
            if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
                w.push(format!("{label}.fov_degrees {} outside (0, 180)", cam.fov_degrees));
            }
            if cam.near <= 0.0 || cam.far <= cam.near {
                w.push(format!("{label} near/far planes invalid ({} / {})", cam.near, cam.far));
            }
        }
        if self.textures.paths.is_empty() {
            w.push("textures.paths empty -> spheres use the placeholder texture".into());
        }
        if !(0.0..=1.0).contains(&self.visibility.threshold) {
            w.push(format!(
                "visibility.threshold {} outside 0..1",
                self.visibility.threshold
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = SceneConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg: SceneConfig = ron::from_str(r#"(variant: "card", boundary: (push_strength: 80.0))"#).unwrap();
        assert_eq!(cfg.variant, SceneVariant::Card);
        assert_eq!(cfg.boundary.push_strength, 80.0);
        assert_eq!(cfg.boundary.margin, 0.8);
        assert_eq!(cfg.card.lerp_inside, 0.4);
    }

    #[test]
    fn validate_flags_bad_lerp_and_extents() {
        let mut cfg = SceneConfig::default();
        cfg.ambient.lerp_mouse = 1.5;
        cfg.ambient.bounds.y = 0.5;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("ambient.lerp_mouse")));
        assert!(warns.iter().any(|w| w.contains("ambient.bounds.y")));
    }
}
