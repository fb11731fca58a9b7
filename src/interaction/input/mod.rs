pub mod input_sampling;
pub mod mailbox;

pub use mailbox::{InputSource, PointerMailbox, PointerSample};
