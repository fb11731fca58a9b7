pub mod bounds;
pub mod components;
pub mod config;
pub mod system;
