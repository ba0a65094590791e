mod config;
mod handler;
mod lifecycle;
mod mime;
pub mod utils;

pub use config::ServerConfig;
pub use lifecycle::DevServer;
