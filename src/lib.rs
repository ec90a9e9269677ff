pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod reshape;
pub mod types;
pub mod wiki;

pub use config::Config;
pub use error::{Error, Result};
