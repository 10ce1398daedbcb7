//! Nurture Core: shared error type and configuration.

pub mod config;
pub mod de;
pub mod error;

pub use config::{DataPaths, NurtureConfig};
pub use error::{Error, Result};
