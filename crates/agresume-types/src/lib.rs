pub mod event;
mod summary;

pub use event::*;
pub use summary::*;
