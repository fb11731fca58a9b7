use std::fs;

use orb_field::core::config::SceneConfig;
use orb_field::SceneVariant;

#[test]
fn defaults_match_shipped_scene_file() {
    let (from_file, err) = SceneConfig::load_or_default("assets/config/scene.ron");
    assert!(err.is_none(), "shipped config failed to load: {err:?}");
    let mut defaults = SceneConfig::default();
    // The shipped file doesn't pin texture paths or a seed.
    defaults.textures = from_file.textures.clone();
    assert_eq!(from_file, defaults);
    assert!(from_file.validate().is_empty());
}

#[test]
fn local_layer_overrides_nested_keys_only() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("scene.ron");
    let local = dir.path().join("scene.local.ron");
    fs::write(
        &base,
        r#"(
            variant: "ambient",
            boundary: (margin: 0.8, push_strength: 50.0),
            card: (lerp_inside: 0.4, lerp_outside: 0.1),
        )"#,
    )
    .unwrap();
    fs::write(
        &local,
        r#"(
            variant: "card",
            boundary: (push_strength: 80.0),
            card: (rect: Some((left: 10.0, top: 20.0, width: 200.0, height: 150.0))),
            seed: Some(42),
        )"#,
    )
    .unwrap();
    let (cfg, used, errors) = SceneConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.variant, SceneVariant::Card);
    assert_eq!(cfg.boundary.push_strength, 80.0);
    assert_eq!(cfg.boundary.margin, 0.8);
    assert_eq!(cfg.card.lerp_inside, 0.4);
    let rect = cfg.card.rect.expect("rect from local layer");
    assert_eq!((rect.left, rect.width), (10.0, 200.0));
    assert_eq!(cfg.seed, Some(42));
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "( boundary: ( margin: ").unwrap();
    let missing = dir.path().join("nope.ron");
    let (cfg, used, errors) = SceneConfig::load_layered([&missing, &broken]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 2);
    assert_eq!(cfg, SceneConfig::default());
}

#[test]
fn unknown_variant_falls_back_to_defaults_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("scene.ron");
    fs::write(&p, r#"( variant: "fullscreen" )"#).unwrap();
    let (cfg, _used, errors) = SceneConfig::load_layered([&p]);
    assert_eq!(cfg.variant, SceneVariant::Ambient);
    assert!(errors.iter().any(|e| e.contains("fullscreen")));
}

#[test]
fn default_textures_ship_as_png() {
    let textures = SceneConfig::default().textures;
    let assets = std::path::Path::new("assets");
    for rel in textures.paths.iter().chain(std::iter::once(&textures.placeholder)) {
        let bytes = fs::read(assets.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"));
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{rel} is not a png");
    }
}
