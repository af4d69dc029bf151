//! Configuration module for Skriv.

mod settings;

pub use settings::{DiscoverySettings, EngineSettings, GeneralSettings, Settings};
