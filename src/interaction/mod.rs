pub mod input;
pub mod pointer;
pub mod session;
pub mod visibility;
