// Domain value objects
pub mod scan_mode;
pub mod scan_offset;

pub use scan_mode::*;
pub use scan_offset::*;
