pub mod config;
pub mod dynamic;
pub mod error;
pub mod import;

pub use config::Limits;
pub use dynamic::*;
pub use error::{Error, Result};
