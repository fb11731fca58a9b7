use bevy::asset::LoadState;
use bevy::prelude::*;
use rand::prelude::*;

use crate::app::state::SceneState;
use crate::core::config::{SceneConfig, SceneVariant, TextureConfig};
use crate::core::system::system_order::SceneMountSet;

/// Shared sphere mesh plus one textured material per configured image.
/// Spheres reference these handles; they never own a material.
#[derive(Resource, Debug, Clone)]
pub struct SphereVisuals {
    pub mesh: Handle<Mesh>,
    pub materials: Vec<Handle<StandardMaterial>>,
    textures: Vec<Handle<Image>>,
    placeholder: Handle<Image>,
}

impl SphereVisuals {
    pub fn pick(&self, rng: &mut impl Rng) -> Handle<StandardMaterial> {
        self.materials.choose(rng).cloned().unwrap_or_default()
    }
}

pub struct MaterialsPlugin;

impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(SceneState::Mounted),
            setup_sphere_visuals.in_set(SceneMountSet::Resources),
        )
        .add_systems(OnExit(SceneState::Mounted), release_sphere_visuals)
        .add_systems(
            Update,
            substitute_failed_textures.run_if(resource_exists::<SphereVisuals>),
        );
    }
}

/// Textured, lightly self-lit physical material.
pub fn sphere_material(texture: Handle<Image>, t: &TextureConfig) -> StandardMaterial {
    let e = t.emissive_intensity;
    StandardMaterial {
        base_color_texture: Some(texture.clone()),
        emissive: LinearRgba::rgb(e, e, e),
        emissive_texture: Some(texture),
        metallic: t.metallic,
        perceptual_roughness: t.roughness,
        clearcoat: t.clearcoat,
        ..default()
    }
}

fn setup_sphere_visuals(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    asset_server: Option<Res<AssetServer>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    // Headless (no asset/render plugins): bodies spawn without visuals.
    let (Some(asset_server), Some(mut meshes), Some(mut materials)) =
        (asset_server, meshes, materials)
    else {
        return;
    };
    let t = &cfg.textures;
    let (radius, segments) = match cfg.variant {
        SceneVariant::Ambient => (cfg.ambient.mesh_radius, 28),
        SceneVariant::Card => (cfg.card.mesh_radius, 32),
    };
    let mesh = meshes.add(Sphere::new(radius).mesh().uv(segments, segments));
    let placeholder: Handle<Image> = asset_server.load(t.placeholder.clone());
    let mut textures: Vec<Handle<Image>> = t
        .paths
        .iter()
        .map(|p| asset_server.load(p.clone()))
        .collect();
    if textures.is_empty() {
        textures.push(placeholder.clone());
    }
    let handles = textures
        .iter()
        .map(|tex| materials.add(sphere_material(tex.clone(), t)))
        .collect();
    commands.insert_resource(SphereVisuals {
        mesh,
        materials: handles,
        textures,
        placeholder,
    });
}

fn release_sphere_visuals(mut commands: Commands) {
    commands.remove_resource::<SphereVisuals>();
}

/// Swap any texture that failed to load for the placeholder, once.
fn substitute_failed_textures(
    asset_server: Res<AssetServer>,
    mut visuals: ResMut<SphereVisuals>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let placeholder = visuals.placeholder.clone();
    let SphereVisuals {
        materials: handles,
        textures,
        ..
    } = &mut *visuals;
    for (tex, mat) in textures.iter_mut().zip(handles.iter()) {
        if *tex == placeholder {
            continue;
        }
        if !matches!(asset_server.load_state(tex.id()), LoadState::Failed(_)) {
            continue;
        }
        warn!(
            path = ?tex.path(),
            "sphere texture failed to load; using placeholder"
        );
        if let Some(m) = materials.get_mut(mat) {
            m.base_color_texture = Some(placeholder.clone());
            m.emissive_texture = Some(placeholder.clone());
        }
        *tex = placeholder.clone();
    }
}
