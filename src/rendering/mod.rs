pub mod camera;
pub mod lighting;
pub mod materials;
