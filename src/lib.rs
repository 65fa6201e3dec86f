pub mod cleaner;
pub mod config;
pub mod error;
pub mod subtitle;

pub use cleaner::{clean_file, CleanOptions, CleanReport};
pub use config::{JunkPattern, PatternSet};
pub use error::{Result, SrtCleanError};
