pub mod config;

pub use config::{PlaceholderConfig, Rgba8};
