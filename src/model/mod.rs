pub mod config;
pub mod date;
pub mod keys;

pub use config::*;
pub use date::*;
pub use keys::*;
