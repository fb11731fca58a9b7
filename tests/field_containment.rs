use bevy::prelude::*;

use orb_field::core::config::BoundaryConfig;
use orb_field::physics::boundary::boundary::boundary_impulse;
use orb_field::SimulationBounds;

/// Semi-implicit Euler with rapier's damping model, enough to check that the
/// soft walls turn a body around well before the hard bound.
fn step(p: &mut Vec3, v: &mut Vec3, impulse: Option<Vec3>, mass: f32, damping: f32, dt: f32) {
    if let Some(j) = impulse {
        *v += j / mass;
    }
    *v *= 1.0 / (1.0 + damping * dt);
    *p += *v * dt;
}

#[test]
fn body_heading_out_turns_back_before_the_bound() {
    let bounds = SimulationBounds::new(Vec3::new(3.0, 3.0, 3.0)).unwrap();
    let tuning = BoundaryConfig::default();
    let dt = 1.0 / 60.0;
    let mut p = Vec3::new(2.0, 0.0, 0.0);
    let mut v = Vec3::new(3.0, 0.0, 0.0);
    let mut turned = false;
    for tick in 0..600 {
        let imp = boundary_impulse(p, &bounds, &tuning, dt);
        step(&mut p, &mut v, imp, 4.19, 0.8, dt);
        assert!(p.x.abs() <= 3.0, "escaped at tick {tick}: {p:?}");
        turned |= v.x < 0.0;
    }
    assert!(turned, "body never reversed");
}

#[test]
fn settled_body_gets_no_correction() {
    let bounds = SimulationBounds::new(Vec3::new(3.0, 3.0, 3.0)).unwrap();
    let tuning = BoundaryConfig::default();
    // 0.005 beyond the inner face on x, inside on the rest.
    let p = Vec3::new(3.0 - tuning.margin + 0.005, 1.0, -1.0);
    assert_eq!(boundary_impulse(p, &bounds, &tuning, 1.0 / 60.0), None);
    let past = Vec3::new(3.0 - tuning.margin + 0.02, 1.0, -1.0);
    assert!(boundary_impulse(past, &bounds, &tuning, 1.0 / 60.0).is_some());
}

#[test]
fn stalled_frame_uses_capped_dt() {
    let bounds = SimulationBounds::new(Vec3::new(3.0, 3.0, 3.0)).unwrap();
    let tuning = BoundaryConfig::default();
    let p = Vec3::new(0.0, 0.0, 40.0);
    let imp = boundary_impulse(p, &bounds, &tuning, 2.0).unwrap();
    assert!((imp.length() - tuning.push_strength * 0.1).abs() < 1e-4);
    assert!(imp.z < 0.0);
}

#[test]
fn tiny_bounds_clamp_to_the_lower_face() {
    // Half extent smaller than the margin: the inner box inverts and the
    // lower clamp (+0.3 on x) is applied last.
    let bounds = SimulationBounds::new(Vec3::new(0.5, 3.0, 3.0)).unwrap();
    let tuning = BoundaryConfig::default();
    let imp = boundary_impulse(Vec3::ZERO, &bounds, &tuning, 1.0 / 60.0).unwrap();
    assert!(imp.x > 0.0);
    assert!(imp.y.abs() < 1e-6 && imp.z.abs() < 1e-6);
}
