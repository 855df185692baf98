pub mod document;
pub mod error;
pub mod event;
pub mod summary;
pub mod volume;

pub use document::*;
pub use error::{Error, Result};
pub use event::*;
pub use summary::*;
pub use volume::*;
