pub mod format;
pub mod monitoring;
pub mod time;

pub use format::*;
pub use time::*;
