pub mod config_io;
pub mod repository;
pub mod scratchpad;
pub mod state;
pub mod watcher;
