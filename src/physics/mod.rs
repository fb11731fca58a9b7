pub mod attraction;
pub mod boundary;
pub mod rapier;
pub mod walls;
