pub mod error;
pub mod event_file;
pub mod offset_file;

pub use error::*;
pub use event_file::*;
pub use offset_file::*;
