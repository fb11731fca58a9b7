use bevy::prelude::*;

use crate::core::config::config::{CardConfig, HalfExtents};

/// Axis-aligned confinement box, stored as half extents around the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimulationBounds {
    pub half: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BoundsError {
    /// Container reported a zero or negative pixel size.
    #[error("container size must be > 0 (got {width}x{height})")]
    NonPositiveContainer { width: f32, height: f32 },
    /// One of the resulting half extents is not > 0.
    #[error("half extents must be > 0 (got {0})")]
    NonPositiveExtent(Vec3),
}

impl SimulationBounds {
    pub fn new(half: Vec3) -> Result<Self, BoundsError> {
        if half.x > 0.0 && half.y > 0.0 && half.z > 0.0 {
            Ok(Self { half })
        } else {
            Err(BoundsError::NonPositiveExtent(half))
        }
    }

    pub fn from_extents(e: &HalfExtents) -> Result<Self, BoundsError> {
        Self::new(e.to_vec3())
    }

    /// Derive card bounds from the card's pixel size. Width and height map
    /// linearly into world units and saturate at `max_extent`; depth is fixed.
    pub fn from_card_pixels(width: f32, height: f32, card: &CardConfig) -> Result<Self, BoundsError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(BoundsError::NonPositiveContainer { width, height });
        }
        let x = (width * card.px_to_units).min(card.max_extent);
        let y = (height * card.px_to_units).min(card.max_extent);
        Self::new(Vec3::new(x, y, card.depth))
    }

    /// Inner box shrunk by `margin` on every face. If the margin exceeds a
    /// half extent the lower face wins, so this never produces an inverted range.
    pub fn clamp_inside(&self, position: Vec3, margin: f32) -> Vec3 {
        let hi = self.half - Vec3::splat(margin);
        let lo = -hi;
        position.min(hi).max(lo)
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.abs().cmple(self.half).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_bounds_scale_and_saturate() {
        let card = CardConfig::default();
        let b = SimulationBounds::from_card_pixels(300.0, 200.0, &card).unwrap();
        assert!((b.half.x - 1.8).abs() < 1e-5);
        assert!((b.half.y - 1.2).abs() < 1e-5);
        assert_eq!(b.half.z, 5.0);

        let wide = SimulationBounds::from_card_pixels(2000.0, 1200.0, &card).unwrap();
        assert_eq!(wide.half.x, 3.5);
        assert_eq!(wide.half.y, 3.5);
    }

    #[test]
    fn zero_sized_container_rejected() {
        let card = CardConfig::default();
        assert_eq!(
            SimulationBounds::from_card_pixels(0.0, 100.0, &card),
            Err(BoundsError::NonPositiveContainer {
                width: 0.0,
                height: 100.0
            })
        );
        assert!(SimulationBounds::new(Vec3::new(1.0, -1.0, 1.0)).is_err());
    }

    #[test]
    fn errors_render_for_logs() {
        let card = CardConfig::default();
        let err = SimulationBounds::from_card_pixels(0.0, 100.0, &card).unwrap_err();
        assert_eq!(err.to_string(), "container size must be > 0 (got 0x100)");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.to_string().starts_with("container size"));
        let extent = SimulationBounds::new(Vec3::new(1.0, 0.0, 1.0)).unwrap_err();
        assert!(extent.to_string().starts_with("half extents must be > 0"));
    }

    #[test]
    fn clamp_with_oversized_margin_picks_lower_face() {
        let b = SimulationBounds::new(Vec3::new(0.5, 2.0, 2.0)).unwrap();
        let c = b.clamp_inside(Vec3::new(3.0, 0.0, 0.0), 0.8);
        assert!((c.x - 0.3).abs() < 1e-6);
    }
}
