pub mod application;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::*;
