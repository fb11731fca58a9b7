pub mod layout;
pub mod spawn;
