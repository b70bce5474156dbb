mod client;
mod config;

pub use client::PineconeIndex;
pub use config::PineconeConfig;
